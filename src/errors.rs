use serde::{Deserialize, Serialize};
use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug, Clone, Deserialize, Serialize)]
pub enum SchemaError {
    #[error("Unsupported message type: {0}")]
    UnsupportedMessageType(String),

    #[error("Schema validation failed: {0}")]
    SchemaValidation(String),
}

pub type SchemaResult<T> = Result<T, SchemaError>;
