use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::chat::ChatMessage;
use crate::errors::{SchemaError, SchemaResult};

/// Model identifier used when a request does not name one.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

fn default_model() -> Option<String> {
    Some(DEFAULT_MODEL.to_string())
}

fn default_true() -> bool {
    true
}

/// An API envelope validated at the service boundary.
///
/// `parse` performs the only validation this layer owns: structural
/// deserialization (missing fields, wrong primitive types, enumeration
/// mismatches) followed by the envelope's own semantic checks. Business
/// rules like score ranges or thread existence belong to the callers.
pub trait Envelope: DeserializeOwned {
    fn validate(&self) -> SchemaResult<()> {
        Ok(())
    }

    fn parse(value: Value) -> SchemaResult<Self> {
        let envelope: Self = serde_json::from_value(value)
            .map_err(|err| SchemaError::SchemaValidation(err.to_string()))?;
        envelope.validate()?;
        Ok(envelope)
    }
}

/// Basic user input for the agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInput {
    /// User input to the agent
    pub message: String,
    /// Model to use for the agent
    #[serde(default = "default_model")]
    pub model: Option<String>,
    /// Thread to continue a multi-turn conversation; absent means a new one
    #[serde(default)]
    pub thread_id: Option<String>,
}

impl Envelope for UserInput {
    fn validate(&self) -> SchemaResult<()> {
        if self.message.is_empty() {
            return Err(SchemaError::SchemaValidation(
                "message: must be a non-empty string".to_string(),
            ));
        }
        Ok(())
    }
}

/// User input for streaming the agent's response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamInput {
    #[serde(flatten)]
    pub input: UserInput,
    /// Whether to stream generated tokens to the client
    #[serde(default = "default_true")]
    pub stream_tokens: bool,
}

impl Envelope for StreamInput {
    fn validate(&self) -> SchemaResult<()> {
        self.input.validate()
    }
}

/// Response from the agent when invoked for a single turn: the final
/// message in its serialized underlying form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    pub message: Map<String, Value>,
}

/// Input for retrieving chat history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatHistoryInput {
    pub thread_id: String,
}

impl Envelope for ChatHistoryInput {}

/// Chat history for a thread, in conversation order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatHistory {
    pub messages: Vec<ChatMessage>,
}

/// Feedback for a run, recorded by an external tracing backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub run_id: String,
    /// Label naming the feedback dimension
    pub key: String,
    /// Unconstrained at this layer; range checks belong to the backend
    pub score: f64,
    #[serde(default)]
    pub kwargs: Map<String, Value>,
}

impl Envelope for Feedback {}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackStatus {
    #[default]
    Success,
}

/// Fixed acknowledgement returned after submitting feedback
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackResponse {
    #[serde(default)]
    pub status: FeedbackStatus,
}
