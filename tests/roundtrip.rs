use anyhow::Result;
use serde_json::{json, Value};

use chatwire::errors::SchemaError;
use chatwire::models::chat::ChatMessage;
use chatwire::models::envelope::{ChatHistory, Envelope, Feedback, UserInput};
use chatwire::models::message::Message;
use chatwire::models::role::Role;
use chatwire::models::tool::ToolCall;

/// Walk a full exchange through the conversion layer: an engine-produced
/// turn with segmented content and a tool call goes out over the wire as
/// canonical messages, comes back, and is reconstructed losslessly.
#[test]
fn test_full_conversation_round_trip() -> Result<()> {
    let run_id = uuid::Uuid::new_v4().to_string();

    // What the engine hands us: a user turn, an AI turn with provider
    // metadata and a tool call, and the tool's answer.
    let user = Message::human("What is the weather in Tokyo?");
    let ai: Message = serde_json::from_value(json!({
        "type": "ai",
        "data": {
            "content": [
                {"type": "text", "text": "Let me check"},
                {"type": "image", "url": "ignored"}
            ],
            "tool_calls": [
                {"name": "get_weather", "arguments": {"city": "Tokyo"}, "id": "call_1"}
            ],
            "usage": {"total_tokens": 21}
        }
    }))?;
    let tool = Message::tool("70 degrees", "call_1");

    let thread: Vec<ChatMessage> = [&user, &ai, &tool]
        .into_iter()
        .map(ChatMessage::from_message)
        .collect::<Result<_, _>>()?;

    assert_eq!(thread[0].role, Role::Human);
    assert_eq!(thread[1].role, Role::Ai);
    assert_eq!(thread[1].content, "Let me check");
    assert_eq!(thread[1].tool_calls[0].name, "get_weather");
    assert_eq!(thread[2].role, Role::Tool);
    assert_eq!(thread[2].tool_call_id.as_deref(), Some("call_1"));

    // Over the wire and back as a history envelope.
    let history = ChatHistory { messages: thread };
    let wire = serde_json::to_value(&history)?;
    let history: ChatHistory = serde_json::from_value(wire)?;

    // Reconstruction replays the snapshots, provider metadata intact.
    let rebuilt: Vec<Message> = history
        .messages
        .iter()
        .map(|chat| chat.to_message())
        .collect::<Result<_, _>>()?;

    assert_eq!(rebuilt[0], user);
    assert_eq!(rebuilt[1].tool_calls(), ai.tool_calls());
    if let Message::Ai(rebuilt_ai) = &rebuilt[1] {
        assert_eq!(rebuilt_ai.extra["usage"], json!({"total_tokens": 21}));
    } else {
        panic!("Expected an AI message");
    }
    assert_eq!(rebuilt[2], tool);

    // A run id attaches without disturbing anything else.
    let tagged = history.messages[1].clone().with_run_id(run_id.clone());
    assert_eq!(tagged.run_id, Some(run_id));
    assert_eq!(tagged.content, history.messages[1].content);
    Ok(())
}

#[test]
fn test_client_authored_request_flows_to_engine() -> Result<()> {
    let input = UserInput::parse(json!({
        "message": "What is the weather in Tokyo?",
        "thread_id": "t1"
    }))?;

    // A client request has no underlying object; the canonical message is
    // synthesized with an empty snapshot and built fresh on conversion.
    let chat = ChatMessage::human(input.message.clone());
    assert!(chat.original.is_empty());

    let message = chat.to_message()?;
    assert_eq!(message, Message::human("What is the weather in Tokyo?"));
    Ok(())
}

#[test]
fn test_batch_conversion_fails_per_message() {
    let thread = vec![
        Message::human("hi"),
        Message::system("be terse"),
        Message::ai("hello"),
    ];

    // The unsupported message fails alone; the caller chooses to skip it and
    // the rest of the batch converts cleanly.
    let converted: Vec<ChatMessage> = thread
        .iter()
        .filter_map(|message| ChatMessage::from_message(message).ok())
        .collect();
    assert_eq!(converted.len(), 2);
    assert_eq!(converted[0].role, Role::Human);
    assert_eq!(converted[1].role, Role::Ai);

    let error = ChatMessage::from_message(&thread[1]).unwrap_err();
    assert!(matches!(error, SchemaError::UnsupportedMessageType(_)));
}

#[test]
fn test_agent_response_carries_serialized_message() -> Result<()> {
    let final_message = Message::ai("The weather in Tokyo is 70 degrees.");
    let chat = ChatMessage::from_message(&final_message)?;

    let response = chatwire::models::envelope::AgentResponse {
        message: chat.original.clone(),
    };
    let wire = serde_json::to_value(&response)?;
    assert_eq!(wire["message"]["type"], "ai");
    assert_eq!(
        wire["message"]["data"]["content"],
        Value::from("The weather in Tokyo is 70 degrees.")
    );
    Ok(())
}

#[test]
fn test_feedback_flow() -> Result<()> {
    let feedback = Feedback::parse(json!({
        "run_id": "r1",
        "key": "stars",
        "score": 0.8,
        "kwargs": {"comment": "helpful"}
    }))?;
    assert_eq!(feedback.score, 0.8);
    assert_eq!(feedback.kwargs["comment"], "helpful");

    let tool_call = ToolCall::new("noop", json!({}), "call_0");
    // Feedback references a run, not a message; nothing on the message side
    // is consulted or mutated.
    let chat = ChatMessage::ai("done", vec![tool_call]).with_run_id("r1");
    assert_eq!(chat.run_id.as_deref(), Some(feedback.run_id.as_str()));
    Ok(())
}
