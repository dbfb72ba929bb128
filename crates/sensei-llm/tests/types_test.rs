use sensei_llm::Message;
use serde_json::json;

#[test]
fn test_message_roles() {
    assert_eq!(Message::system("You are helpful").role(), "system");
    assert_eq!(Message::human("Hello").role(), "user");
    assert_eq!(Message::ai("Hi there!").role(), "assistant");
}

#[test]
fn test_message_wire_shape() {
    let msg = Message::human("What is the capital of France?");
    let value = serde_json::to_value(&msg).unwrap();

    assert_eq!(
        value,
        json!({"role": "user", "content": "What is the capital of France?"})
    );
}

#[test]
fn test_message_deserialize_assistant() {
    let msg: Message = serde_json::from_value(json!({"role": "assistant", "content": "Paris"})).unwrap();

    assert_eq!(msg, Message::ai("Paris"));
    assert_eq!(msg.content(), "Paris");
}
