//! Model Errors

use serde::{Deserialize, Serialize};

/// Common result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Model-level errors
///
/// Only the persistence seam produces these. Item and collection operations
/// are total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModelError {
    Sync(String),
    Serialize(String),
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::Sync(msg) => write!(f, "Sync failed: {}", msg),
            ModelError::Serialize(msg) => write!(f, "Serialization failed: {}", msg),
        }
    }
}

impl std::error::Error for ModelError {}

impl From<serde_json::Error> for ModelError {
    fn from(e: serde_json::Error) -> Self {
        ModelError::Serialize(e.to_string())
    }
}
