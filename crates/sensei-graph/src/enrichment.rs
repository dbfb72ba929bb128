//! Query rewrite and classification on the fast tier.

use chrono::{DateTime, Utc};
use sensei_llm::{ChatClient, Message};
use sensei_types::{EnrichedQuery, LLMConfig, QueryTags};

use crate::error::TurnError;
use crate::history::{request, transcript};
use crate::prompts::{fill, CLASSIFICATION_PROMPT, NO_SEARCH_NEEDED, REWRITE_PROMPT};

const QUOTES: &[char] = &['"', '\'', '`', '“', '”', '‘', '’'];

/// Rewrite the latest query for search and, when `classify` is set,
/// classify it. Both requests run concurrently.
///
/// `messages` is the conversation including the latest query.
pub async fn enrich(
    client: &dyn ChatClient,
    config: &LLMConfig,
    messages: &[Message],
    query: &str,
    classify: bool,
    now: DateTime<Utc>,
) -> Result<EnrichedQuery, TurnError> {
    let chat_history = transcript(messages);
    let current_date = now.to_rfc3339();

    let rewrite_prompt = fill(
        REWRITE_PROMPT,
        &[
            ("chat_history", &chat_history),
            ("query", query),
            ("current_date", &current_date),
        ],
    );
    let rewrite = client.chat(request(config, vec![Message::human(rewrite_prompt)]));

    let classification = async {
        if classify {
            Some(classify_query(client, config, messages, query).await)
        } else {
            None
        }
    };

    let (rewrite, classification) = tokio::join!(rewrite, classification);

    let rewrite = rewrite?;
    let rewritten = rewrite
        .text()
        .map(clean_query)
        .filter(|q| !q.is_empty())
        .ok_or(TurnError::EmptyUpstream("query rewrite"))?;

    let mut tags = match classification {
        Some(result) => Some(result?),
        None => None,
    };

    let search_query = resolve_search_query(rewritten, query, &mut tags);

    tracing::info!(search_query = %search_query, tags = ?tags, "Query enriched");
    Ok(EnrichedQuery { search_query, tags })
}

/// The sentinel may arrive wrapped in punctuation or prose. When present,
/// the user's own query is kept and search is switched off.
fn resolve_search_query(rewritten: String, query: &str, tags: &mut Option<QueryTags>) -> String {
    if rewritten.contains(NO_SEARCH_NEEDED) {
        tracing::debug!(rewritten = %rewritten, "Rewrite reported no search needed");
        tags.get_or_insert_with(QueryTags::default).needs_search = false;
        query.to_string()
    } else {
        rewritten
    }
}

/// One classification request, parsed into tags.
pub async fn classify_query(
    client: &dyn ChatClient,
    config: &LLMConfig,
    messages: &[Message],
    query: &str,
) -> Result<QueryTags, TurnError> {
    let prompt = fill(
        CLASSIFICATION_PROMPT,
        &[("chat_history", &transcript(messages)), ("query", query)],
    );

    let response = client
        .chat(request(config, vec![Message::human(prompt)]))
        .await?;

    let raw = response
        .text()
        .ok_or(TurnError::EmptyUpstream("query classification"))?;

    Ok(parse_tags(raw))
}

/// Parse `KEY:YES, KEY:NO, ...` into tags.
///
/// Never fails: a malformed segment is skipped and its tag keeps the default.
pub fn parse_tags(raw: &str) -> QueryTags {
    let mut tags = QueryTags::default();

    let body = raw.trim().trim_matches(QUOTES).trim();
    for segment in body.split([',', '\n']) {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        let Some((key, value)) = segment.split_once(':') else {
            tracing::warn!(segment, "Classification segment without a colon");
            continue;
        };

        let value = match value.trim().trim_matches('*').to_ascii_uppercase().as_str() {
            "YES" => true,
            "NO" => false,
            _ => {
                tracing::warn!(segment, "Classification value is not YES or NO");
                continue;
            }
        };

        match key.trim().trim_matches('*').to_ascii_uppercase().as_str() {
            "SEARCH_NEEDED" => tags.needs_search = value,
            "SEARCH_IMAGE" => tags.needs_image = value,
            "SEARCH_VIDEO" => tags.needs_video = value,
            "CONTENT_VIOLATION" => tags.content_violation = value,
            "MATH" => tags.has_math = value,
            _ => tracing::warn!(segment, "Unknown classification key"),
        }
    }

    tags
}

/// Strip whitespace and surrounding quotes from a rewritten query.
pub fn clean_query(raw: &str) -> String {
    raw.trim().trim_matches(QUOTES).trim().to_string()
}
