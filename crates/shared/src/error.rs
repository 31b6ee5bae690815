use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ReplyStatus;

/// Body the backend returns when it refuses a request: `{"status": "error", "message": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub status: ReplyStatus,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("backend reported an error: {}", message.as_deref().unwrap_or("no message"))]
    Logical { message: Option<String> },
    #[error("malformed backend reply: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl From<ErrorEnvelope> for ReplyError {
    fn from(value: ErrorEnvelope) -> Self {
        Self::Logical {
            message: value.message,
        }
    }
}
