use once_cell::sync::Lazy;
use regex::Regex;
use sensei_llm::{ChatClient, Message};
use sensei_types::LLMConfig;

use crate::history::request;
use crate::prompts::{fill, RELATED_PROMPT};

static ENUMERATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:\d+[.)]|[-*•])(?:\s+|$)").expect("invalid enumeration regex"));

/// Follow-up questions for the query, grounded on the fetched pages.
/// Any failure yields an empty list.
pub async fn gen_related(
    client: &dyn ChatClient,
    config: &LLMConfig,
    query: &str,
    pages: &[String],
    max_context_chars: usize,
    max_questions: usize,
) -> Vec<String> {
    let documents = documents(pages, max_context_chars);
    let prompt = fill(RELATED_PROMPT, &[("query", query), ("documents", &documents)]);

    match client.chat(request(config, vec![Message::human(prompt)])).await {
        Ok(response) => match response.text() {
            Some(text) => parse_related(text, max_questions),
            None => {
                tracing::warn!("Related questions response was empty");
                Vec::new()
            }
        },
        Err(e) => {
            tracing::warn!("Related questions request failed: {:#}", e);
            Vec::new()
        }
    }
}

/// `Document: i` sections, truncated to `max_chars` characters
fn documents(pages: &[String], max_chars: usize) -> String {
    pages
        .iter()
        .enumerate()
        .map(|(i, page)| format!("Document: {}\n{}", i + 1, page))
        .collect::<Vec<_>>()
        .join("\n\n")
        .chars()
        .take(max_chars)
        .collect()
}

/// One question per line, enumeration markers stripped, blank lines dropped.
pub fn parse_related(text: &str, max_questions: usize) -> Vec<String> {
    text.lines()
        .map(|line| ENUMERATION.replace(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .take(max_questions)
        .collect()
}
