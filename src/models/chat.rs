use std::io::Write;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::content::MessageContent;
use super::message::Message;
use super::role::Role;
use super::tool::ToolCall;
use crate::errors::{SchemaError, SchemaResult};

/// A message in a chat, in the canonical wire-safe form.
///
/// `content` is always flattened text. `original` holds the full serialized
/// underlying message when one existed; it is empty only for messages a
/// client authored directly as canonical. Conversion back to the object
/// model replays the snapshot when present, so metadata the canonical form
/// does not carry survives the round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
    #[serde(default)]
    pub tool_call_id: Option<String>,
    #[serde(default)]
    pub run_id: Option<String>,
    #[serde(default)]
    pub original: Map<String, Value>,
}

impl ChatMessage {
    /// Create a human message authored directly as canonical
    pub fn human<S: Into<String>>(content: S) -> Self {
        ChatMessage {
            role: Role::Human,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
            run_id: None,
            original: Map::new(),
        }
    }

    /// Create an AI message authored directly as canonical
    pub fn ai<S: Into<String>>(content: S, tool_calls: Vec<ToolCall>) -> Self {
        ChatMessage {
            role: Role::Ai,
            content: content.into(),
            tool_calls,
            tool_call_id: None,
            run_id: None,
            original: Map::new(),
        }
    }

    /// Create a tool-result message authored directly as canonical
    pub fn tool<S: Into<String>, T: Into<String>>(content: S, tool_call_id: T) -> Self {
        ChatMessage {
            role: Role::Tool,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: Some(tool_call_id.into()),
            run_id: None,
            original: Map::new(),
        }
    }

    /// Attach the run id correlating this message to an execution trace
    pub fn with_run_id<S: Into<String>>(mut self, run_id: S) -> Self {
        self.run_id = Some(run_id.into());
        self
    }

    /// Convert an underlying message into its canonical form.
    ///
    /// The full serialized message is captured as the `original` snapshot and
    /// the content is flattened to text. System messages (and any future
    /// variant) have no canonical form and fail the single conversion call.
    pub fn from_message(message: &Message) -> SchemaResult<Self> {
        let original = message.to_original();
        let content = message.text();
        match message {
            Message::Human(_) => Ok(ChatMessage {
                role: Role::Human,
                content,
                tool_calls: Vec::new(),
                tool_call_id: None,
                run_id: None,
                original,
            }),
            Message::Ai(ai) => Ok(ChatMessage {
                role: Role::Ai,
                content,
                tool_calls: ai.tool_calls.clone(),
                tool_call_id: None,
                run_id: None,
                original,
            }),
            Message::Tool(tool) => Ok(ChatMessage {
                role: Role::Tool,
                content,
                tool_calls: Vec::new(),
                tool_call_id: Some(tool.tool_call_id.clone()),
                run_id: None,
                original,
            }),
            other => Err(SchemaError::UnsupportedMessageType(
                other.type_name().to_string(),
            )),
        }
    }

    /// Convert back to an underlying message.
    ///
    /// When an `original` snapshot is present it wins: the snapshot is
    /// replayed and only its content is overwritten with the canonical text.
    /// Without a snapshot the message is built fresh from the role fields.
    pub fn to_message(&self) -> SchemaResult<Message> {
        if !self.original.is_empty() {
            let mut message = Message::from_original(self.original.clone())?;
            message.set_content(MessageContent::text(self.content.clone()));
            return Ok(message);
        }
        match self.role {
            Role::Human => Ok(Message::human(self.content.clone())),
            Role::Ai => Ok(Message::ai_with_tools(
                self.content.clone(),
                self.tool_calls.clone(),
            )),
            Role::Tool => {
                let tool_call_id = self.tool_call_id.clone().ok_or_else(|| {
                    SchemaError::SchemaValidation(
                        "tool_call_id: required for a tool message without an original snapshot"
                            .to_string(),
                    )
                })?;
                Ok(Message::tool(self.content.clone(), tool_call_id))
            }
        }
    }

    /// Check the role/field exclusivity invariant. Messages built through
    /// the constructors or `from_message` hold it by construction; this is
    /// for values assembled by hand.
    pub fn validate(&self) -> SchemaResult<()> {
        match self.role {
            Role::Human => {
                if !self.tool_calls.is_empty() {
                    return Err(SchemaError::SchemaValidation(
                        "tool_calls: not allowed on a human message".to_string(),
                    ));
                }
                if self.tool_call_id.is_some() {
                    return Err(SchemaError::SchemaValidation(
                        "tool_call_id: not allowed on a human message".to_string(),
                    ));
                }
            }
            Role::Ai => {
                if self.tool_call_id.is_some() {
                    return Err(SchemaError::SchemaValidation(
                        "tool_call_id: not allowed on an ai message".to_string(),
                    ));
                }
            }
            Role::Tool => {
                if !self.tool_calls.is_empty() {
                    return Err(SchemaError::SchemaValidation(
                        "tool_calls: not allowed on a tool message".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Reconstruct the underlying message and write its human-readable
    /// rendering to the sink. Conversion failures propagate unchanged.
    pub fn pretty_print<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        let message = self.to_message()?;
        writeln!(out, "{}", message.render())?;
        Ok(())
    }
}
