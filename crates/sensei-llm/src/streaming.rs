use anyhow::Result;
use futures::StreamExt;
use reqwest::Response;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::traits::EventStream;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// One text fragment of the assistant message
    Message { content: String },

    Done {
        #[serde(skip_serializing_if = "Option::is_none")]
        finish_reason: Option<String>,
    },
}

/// One `data:` payload of a chat-completions stream. Only the fields we read
/// are required; OpenAI-compatible servers disagree on the rest.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatStreamChunk {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<StreamChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StreamChoice {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub delta: Delta,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Delta {
    pub role: Option<String>,
    pub content: Option<String>,
}

impl ChatStreamChunk {
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.delta.content.as_deref())
    }

    fn to_stream_events(&self) -> Vec<StreamEvent> {
        let mut events = Vec::new();

        if let Some(choice) = self.choices.first() {
            if let Some(content) = &choice.delta.content {
                if !content.is_empty() {
                    events.push(StreamEvent::Message {
                        content: content.clone(),
                    });
                }
            }

            if let Some(finish_reason) = &choice.finish_reason {
                events.push(StreamEvent::Done {
                    finish_reason: Some(finish_reason.clone()),
                });
            }
        }

        events
    }
}

/// Turn a chat-completions SSE response into a lazy stream of events.
///
/// Lines are split on `\n` across network chunk boundaries, so a `data:`
/// payload cut in half by the transport is reassembled before parsing.
pub fn parse_chat_sse_stream(response: Response) -> EventStream {
    let stream = response.bytes_stream();

    Box::pin(async_stream::stream! {
        let mut byte_chunks = Box::pin(stream);
        let mut buffer = VecDeque::with_capacity(8192);

        'outer: while let Some(chunk_result) = byte_chunks.next().await {
            match chunk_result {
                Ok(bytes) => {
                    buffer.extend(bytes);

                    while let Some(newline_pos) = buffer.iter().position(|&b| b == b'\n') {
                        let line_bytes: Vec<u8> = buffer.drain(..=newline_pos).collect();

                        let Ok(line_str) = std::str::from_utf8(&line_bytes) else {
                            tracing::warn!("Skipping non UTF-8 line in completion stream");
                            continue;
                        };
                        let line = line_str.trim();
                        if line.is_empty() {
                            continue;
                        }

                        if let Some(data) = line.strip_prefix("data:") {
                            let data = data.trim_start();
                            if data == "[DONE]" {
                                yield Ok(StreamEvent::Done { finish_reason: None });
                                break 'outer;
                            }

                            match serde_json::from_str::<ChatStreamChunk>(data) {
                                Ok(chunk) => {
                                    for event in chunk.to_stream_events() {
                                        yield Ok(event);
                                    }
                                }
                                Err(e) => yield Err(anyhow::anyhow!("Failed to parse chat chunk: {}", e)),
                            }
                        }
                    }
                }
                Err(e) => {
                    yield Err(anyhow::anyhow!("Stream error: {}", e));
                    break;
                }
            }
        }
    })
}
