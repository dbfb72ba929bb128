use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use futures::StreamExt;
use sensei_llm::{ChatClient, Message, StreamEvent};
use sensei_types::{EventSender, LLMConfig, TurnEvent};

use crate::history::{request, transcript};
use crate::prompts::{fill, ANSWER_PROMPT, ANSWER_REMINDER};

/// Stream the answer on the capable tier.
///
/// Each fragment is sent on `event_tx` before the next one is pulled from the
/// provider. Returns the full answer.
pub async fn stream_answer(
    client: &dyn ChatClient,
    config: &LLMConfig,
    messages: &[Message],
    query: &str,
    pages: &[String],
    now: DateTime<Utc>,
    event_tx: &EventSender,
) -> Result<String> {
    let system_prompt = fill(
        ANSWER_PROMPT,
        &[
            ("chat_history", &transcript(messages)),
            ("search_results", &format_pages(pages)),
            ("current_date", &now.to_rfc3339()),
        ],
    );

    let request = request(
        config,
        vec![
            Message::system(system_prompt),
            Message::human(query),
            Message::system(ANSWER_REMINDER),
        ],
    );

    let mut stream = client
        .chat_stream(request)
        .await
        .context("Failed to start answer stream")?;

    let mut answer = String::new();
    let mut fragments = 0usize;

    while let Some(event) = stream.next().await {
        match event.context("Answer stream failed")? {
            StreamEvent::Message { content } => {
                if content.is_empty() {
                    continue;
                }
                answer.push_str(&content);
                fragments += 1;
                event_tx.send(TurnEvent::Answer(content)).await?;
            }
            StreamEvent::Done { finish_reason } => {
                tracing::debug!(?finish_reason, "Answer stream finished");
                break;
            }
        }
    }

    tracing::info!(fragments, chars = answer.chars().count(), "Answer streamed");
    Ok(answer)
}

/// Pages labelled `[1]`, `[2]`, ... in order. Empty pages keep their label.
pub fn format_pages(pages: &[String]) -> String {
    pages
        .iter()
        .enumerate()
        .map(|(i, page)| format!("[{}]\n{}", i + 1, page))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_keep_labels() {
        let pages = vec!["Paris is the capital.".to_string(), String::new()];
        assert_eq!(format_pages(&pages), "[1]\nParis is the capital.\n\n[2]\n");
        assert_eq!(format_pages(&[]), "");
    }
}
