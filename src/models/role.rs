use serde::{Deserialize, Serialize};

/// Role of a canonical chat message. This is a closed set: a payload carrying
/// any other role string is rejected at the deserialization boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Human,
    Ai,
    Tool,
}
