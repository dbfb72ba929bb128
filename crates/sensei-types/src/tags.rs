use serde::{Deserialize, Serialize};

/// Classification of one query.
///
/// Every field has a default so a partially parsed classification still
/// yields a usable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryTags {
    pub needs_search: bool,
    pub needs_image: bool,
    pub needs_video: bool,
    pub content_violation: bool,
    pub has_math: bool,
}

impl Default for QueryTags {
    fn default() -> Self {
        Self {
            needs_search: true,
            needs_image: false,
            needs_video: false,
            content_violation: false,
            has_math: false,
        }
    }
}

/// Output of query enrichment. `tags` is `None` when classification was not
/// run for this turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedQuery {
    pub search_query: String,
    pub tags: Option<QueryTags>,
}

impl EnrichedQuery {
    /// Absent tags mean "search".
    pub fn needs_search(&self) -> bool {
        self.tags.map_or(true, |t| t.needs_search)
    }
}

/// Per-turn metadata sent to the client and stored with the turn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnMetadata {
    pub has_math: bool,
}

impl From<&QueryTags> for TurnMetadata {
    fn from(tags: &QueryTags) -> Self {
        Self {
            has_math: tags.has_math,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let tags = QueryTags::default();
        assert!(tags.needs_search);
        assert!(!tags.needs_image && !tags.needs_video && !tags.content_violation && !tags.has_math);
    }

    #[test]
    fn test_absent_tags_mean_search() {
        let query = EnrichedQuery {
            search_query: "capital of France".to_string(),
            tags: None,
        };
        assert!(query.needs_search());

        let query = EnrichedQuery {
            tags: Some(QueryTags {
                needs_search: false,
                ..Default::default()
            }),
            ..query
        };
        assert!(!query.needs_search());
    }
}
