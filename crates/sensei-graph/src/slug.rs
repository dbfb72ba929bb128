use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

const SLUG_BASE_CHARS: usize = 30;

static SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("invalid slug regex"));

/// URL-safe, unique slug: up to 30 characters of the text followed by a UUID.
pub fn create_slug(text: &str) -> String {
    let lowered = text.to_lowercase();
    let dashed = SEPARATORS.replace_all(&lowered, "-");
    let base: String = dashed.trim_matches('-').chars().take(SLUG_BASE_CHARS).collect();
    let base = base.trim_end_matches('-');

    let id = Uuid::new_v4();
    if base.is_empty() {
        id.to_string()
    } else {
        format!("{base}-{id}")
    }
}

/// Thread name: the first `max_chars` characters of the query
pub fn thread_name(query: &str, max_chars: usize) -> String {
    query.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_shape() {
        let slug = create_slug("What is the capital of France?");
        let (base, id) = slug.split_at("what-is-the-capital-of-france".len());
        assert_eq!(base, "what-is-the-capital-of-france");
        assert!(Uuid::parse_str(&id[1..]).is_ok());
    }

    #[test]
    fn test_slug_is_unique() {
        assert_ne!(create_slug("same"), create_slug("same"));
    }

    #[test]
    fn test_slug_base_truncated_without_trailing_dash() {
        let slug = create_slug("How does the borrow checker handle closures?");
        assert!(slug.starts_with("how-does-the-borrow-checker-ha-"));

        let slug = create_slug("What is the capital of France, really?");
        let id = slug.strip_prefix("what-is-the-capital-of-france-").unwrap();
        assert!(Uuid::parse_str(id).is_ok());
    }

    #[test]
    fn test_slug_drops_non_ascii() {
        assert!(create_slug("Qu'est-ce que l'été?").starts_with("qu-est-ce-que-l-t-"));
        assert!(Uuid::parse_str(&create_slug("!!!")).is_ok());
    }

    #[test]
    fn test_thread_name_counts_chars() {
        assert_eq!(thread_name("short", 50), "short");
        let long = "é".repeat(60);
        assert_eq!(thread_name(&long, 50).chars().count(), 50);
    }
}
