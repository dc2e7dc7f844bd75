use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::content::MessageContent;
use super::tool::ToolCall;
use crate::errors::{SchemaError, SchemaResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HumanMessage {
    pub content: MessageContent,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiMessage {
    pub content: MessageContent,
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolMessage {
    pub content: MessageContent,
    pub tool_call_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemMessage {
    pub content: MessageContent,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A message to or from the agent engine.
///
/// This is the underlying object model the canonical chat form fronts. Each
/// payload keeps an open `extra` map so provider metadata (usage counters,
/// response ids) survives the serialize/replay cycle untouched. System
/// messages exist here for the engine's benefit but have no canonical
/// representation.
///
/// The serialized form is `{"type": "...", "data": {...}}`, and that form is
/// exactly what gets captured as a canonical message's `original` snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Message {
    Human(HumanMessage),
    Ai(AiMessage),
    Tool(ToolMessage),
    System(SystemMessage),
}

impl Message {
    /// Create a human message with plain text content
    pub fn human<S: Into<String>>(text: S) -> Self {
        Message::Human(HumanMessage {
            content: MessageContent::text(text),
            extra: Map::new(),
        })
    }

    /// Create an AI message with plain text content and no tool calls
    pub fn ai<S: Into<String>>(text: S) -> Self {
        Self::ai_with_tools(text, Vec::new())
    }

    /// Create an AI message carrying tool calls
    pub fn ai_with_tools<S: Into<String>>(text: S, tool_calls: Vec<ToolCall>) -> Self {
        Message::Ai(AiMessage {
            content: MessageContent::text(text),
            tool_calls,
            extra: Map::new(),
        })
    }

    /// Create a tool-result message answering the given tool call
    pub fn tool<S: Into<String>, T: Into<String>>(text: S, tool_call_id: T) -> Self {
        Message::Tool(ToolMessage {
            content: MessageContent::text(text),
            tool_call_id: tool_call_id.into(),
            extra: Map::new(),
        })
    }

    /// Create a system message with plain text content
    pub fn system<S: Into<String>>(text: S) -> Self {
        Message::System(SystemMessage {
            content: MessageContent::text(text),
            extra: Map::new(),
        })
    }

    /// The wire name of this message's variant
    pub fn type_name(&self) -> &'static str {
        match self {
            Message::Human(_) => "human",
            Message::Ai(_) => "ai",
            Message::Tool(_) => "tool",
            Message::System(_) => "system",
        }
    }

    pub fn content(&self) -> &MessageContent {
        match self {
            Message::Human(message) => &message.content,
            Message::Ai(message) => &message.content,
            Message::Tool(message) => &message.content,
            Message::System(message) => &message.content,
        }
    }

    pub fn set_content(&mut self, content: MessageContent) {
        match self {
            Message::Human(message) => message.content = content,
            Message::Ai(message) => message.content = content,
            Message::Tool(message) => message.content = content,
            Message::System(message) => message.content = content,
        }
    }

    /// Flattened text of the message content
    pub fn text(&self) -> String {
        self.content().flatten()
    }

    /// Tool calls carried by the message; empty for anything but AI messages
    pub fn tool_calls(&self) -> &[ToolCall] {
        match self {
            Message::Ai(message) => &message.tool_calls,
            _ => &[],
        }
    }

    /// Serialize to the generic structured form carried as an `original`
    /// snapshot. Messages always serialize to an object, so the fallback arm
    /// is inert.
    pub fn to_original(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Rebuild a message from an `original` snapshot
    pub fn from_original(original: Map<String, Value>) -> SchemaResult<Self> {
        serde_json::from_value(Value::Object(original))
            .map_err(|err| SchemaError::SchemaValidation(format!("original: {err}")))
    }

    /// Human-readable rendering of the message
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{:=^80}\n",
            format!(" {} Message ", capitalize(self.type_name()))
        ));
        out.push('\n');
        let text = self.text();
        if !text.is_empty() {
            out.push_str(&text);
            out.push('\n');
        }
        match self {
            Message::Ai(message) if !message.tool_calls.is_empty() => {
                out.push_str("Tool Calls:\n");
                for call in &message.tool_calls {
                    out.push_str(&format!("  {} ({})\n", call.name, call.id));
                    out.push_str(&format!("    args: {}\n", call.arguments));
                }
            }
            Message::Tool(message) => {
                out.push_str(&format!("Tool Call ID: {}\n", message.tool_call_id));
            }
            _ => {}
        }
        out
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
