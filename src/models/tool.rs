use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A request to invoke a tool, as issued by the model inside an AI message.
/// The id correlates the eventual tool-result message back to this call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    pub arguments: Value,
    pub id: String,
}

impl ToolCall {
    pub fn new<S: Into<String>, T: Into<String>>(name: S, arguments: Value, id: T) -> Self {
        ToolCall {
            name: name.into(),
            arguments,
            id: id.into(),
        }
    }
}
