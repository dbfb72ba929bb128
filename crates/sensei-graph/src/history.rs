use sensei_llm::{ChatOptions, ChatRequest, Message};
use sensei_persist::Turn;
use sensei_types::LLMConfig;

/// Prior turns as chat messages, oldest first.
pub fn to_messages(turns: &[Turn], include_assistant: bool) -> Vec<Message> {
    let mut messages = Vec::with_capacity(turns.len() * 2);
    for turn in turns {
        messages.push(Message::human(turn.query.as_str()));
        if include_assistant && !turn.answer.is_empty() {
            messages.push(Message::ai(turn.answer.as_str()));
        }
    }
    messages
}

/// `role: content` lines for embedding the conversation in a prompt
pub fn transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", m.role(), m.content()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn request(config: &LLMConfig, messages: Vec<Message>) -> ChatRequest {
    let mut options = ChatOptions::new();
    if let Some(temperature) = config.temperature {
        options = options.temperature(temperature);
    }
    if let Some(max_tokens) = config.max_tokens {
        options = options.max_tokens(max_tokens);
    }
    ChatRequest::new(config.model.clone(), messages).with_options(options)
}
