use sensei_llm::{ChatOptions, ChatRequest, ChatResponse, Message};

#[test]
fn test_chat_request_creation() {
    let messages = vec![Message::human("Hello")];
    let request = ChatRequest::new("gpt-4o", messages);

    assert_eq!(request.model, "gpt-4o");
    assert_eq!(request.messages.len(), 1);
    assert_eq!(request.options.temperature, None);
}

#[test]
fn test_chat_request_with_options() {
    let options = ChatOptions::new().temperature(0.0).max_tokens(2500);

    let request = ChatRequest::new("gpt-4o", vec![Message::human("Hello")]).with_options(options);

    assert_eq!(request.options.temperature, Some(0.0));
    assert_eq!(request.options.max_tokens, Some(2500));
}

#[test]
fn test_response_text_trims_and_rejects_blank() {
    let response = |content: Option<&str>| ChatResponse {
        content: content.map(str::to_string),
        usage: None,
        finish_reason: None,
        raw: serde_json::Value::Null,
    };

    assert_eq!(response(Some("  paris \n")).text(), Some("paris"));
    assert_eq!(response(Some("   ")).text(), None);
    assert_eq!(response(None).text(), None);
}
