use std::fmt;

use serde::{Deserialize, Serialize};

/// Largest document the client will hand to the backend.
pub const MAX_PDF_BYTES: u64 = 10 * 1024 * 1024;
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Backend-assigned name of an uploaded document. Questions are scoped to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentName(pub String);

impl DocumentName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyStatus {
    Success,
    Error,
    Healthy,
    Unhealthy,
    #[serde(other)]
    Unknown,
}
