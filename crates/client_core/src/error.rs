use std::path::PathBuf;

use shared::error::ReplyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend answered but refused the request with an error envelope.
    #[error("backend reported an error: {}", message.as_deref().unwrap_or("no message"))]
    Logical { message: Option<String> },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend responded with HTTP {status}")]
    Status { status: u16 },
    #[error("failed to decode backend reply: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("failed to read '{}': {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ClientError {
    /// Logical errors carry a message meant for the user; everything else is a transport failure.
    pub fn is_logical(&self) -> bool {
        matches!(self, Self::Logical { .. })
    }

    pub fn logical_message(&self) -> Option<&str> {
        match self {
            Self::Logical { message } => message.as_deref(),
            _ => None,
        }
    }
}

impl From<ReplyError> for ClientError {
    fn from(value: ReplyError) -> Self {
        match value {
            ReplyError::Logical { message } => Self::Logical { message },
            ReplyError::Malformed(err) => Self::Decode(err),
        }
    }
}
