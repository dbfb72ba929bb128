//! Main-content extraction from article-style HTML.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

/// Candidate content roots, most specific first
static ROOTS: Lazy<Vec<Selector>> = Lazy::new(|| {
    ["article", "main", "[role=main]", "body"]
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .collect()
});

static BLOCKS: Lazy<Option<Selector>> =
    Lazy::new(|| Selector::parse("p, h1, h2, h3, h4, h5, h6, li, pre, blockquote").ok());

const BLOCK_TAGS: &[&str] = &["p", "h1", "h2", "h3", "h4", "h5", "h6", "li", "pre", "blockquote"];

const BOILERPLATE_TAGS: &[&str] = &[
    "script", "style", "nav", "header", "footer", "aside", "form", "noscript",
];

/// Readable text of the page's main content, one block per line.
/// Empty when nothing readable is found.
pub fn extract_main_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let Some(root) = ROOTS
        .iter()
        .find_map(|selector| document.select(selector).next())
    else {
        return html_to_text(html);
    };

    let blocks = collect_blocks(root);
    if !blocks.is_empty() {
        return blocks.join("\n");
    }

    html_to_text(&root.html())
}

fn collect_blocks(root: ElementRef<'_>) -> Vec<String> {
    let Some(selector) = BLOCKS.as_ref() else {
        return Vec::new();
    };

    root.select(selector)
        .filter(|el| is_outermost_content(*el, root))
        .map(|el| normalize_whitespace(&el.text().collect::<String>()))
        .filter(|text| !text.is_empty())
        .collect()
}

/// True when no ancestor below `root` is boilerplate or another block.
fn is_outermost_content(el: ElementRef<'_>, root: ElementRef<'_>) -> bool {
    for node in el.ancestors() {
        if node.id() == root.id() {
            return true;
        }
        if let Some(ancestor) = ElementRef::wrap(node) {
            let name = ancestor.value().name();
            if BOILERPLATE_TAGS.contains(&name) || BLOCK_TAGS.contains(&name) {
                return false;
            }
        }
    }
    true
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Fallback rendering for pages without block markup
fn html_to_text(html: &str) -> String {
    let text = html2text::from_read(html.as_bytes(), 100);

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_article_and_skips_boilerplate() {
        let html = r#"
            <html><body>
              <nav><p>Home | About</p></nav>
              <article>
                <h1>France</h1>
                <p>Paris is   the capital
                   of France.</p>
                <aside><p>Advertisement</p></aside>
                <ul><li>Population: 68 million</li></ul>
                <script>var x = 1;</script>
              </article>
              <footer><p>Copyright</p></footer>
            </body></html>
        "#;

        assert_eq!(
            extract_main_text(html),
            "France\nParis is the capital of France.\nPopulation: 68 million"
        );
    }

    #[test]
    fn test_nested_blocks_counted_once() {
        let html = "<main><blockquote><p>Quoted line</p></blockquote><li><p>item</p></li></main>";

        assert_eq!(extract_main_text(html), "Quoted line\nitem");
    }

    #[test]
    fn test_falls_back_to_body() {
        let html = "<html><body><div><p>Only paragraph</p></div><header><p>Menu</p></header></body></html>";

        assert_eq!(extract_main_text(html), "Only paragraph");
    }

    #[test]
    fn test_plain_markup_uses_text_rendering() {
        let html = "<html><body><div>Loose text without blocks</div></body></html>";

        assert!(extract_main_text(html).contains("Loose text without blocks"));
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(extract_main_text(""), "");
    }
}
