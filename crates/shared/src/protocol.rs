//! JSON contract of the document Q&A backend.
//!
//! Every endpoint answers HTTP 200 even when it fails, so a reply has to be
//! inspected for an error envelope before it is decoded as the success shape.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::{
    domain::{DocumentName, ReplyStatus},
    error::{ErrorEnvelope, ReplyError},
};

/// Reply of `POST /upload-pdf`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub filename: DocumentName,
    pub chunks_stored: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages_processed: Option<u64>,
}

/// Body of `POST /ask`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
    pub filename: DocumentName,
}

/// Reply of `POST /ask`. The backend may omit `answer`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnswerReceipt {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources_found: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_length: Option<u64>,
}

/// Reply of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: ReplyStatus,
    #[serde(default)]
    pub qdrant_connected: Option<bool>,
    #[serde(default)]
    pub collection_exists: Option<bool>,
    #[serde(default)]
    pub total_collections: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status == ReplyStatus::Healthy
    }
}

/// Reply of maintenance endpoints such as `DELETE /clear-collection`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub status: ReplyStatus,
    #[serde(default)]
    pub message: Option<String>,
}

/// Decodes a backend reply, turning an error envelope into [`ReplyError::Logical`].
pub fn decode_reply<T: DeserializeOwned>(body: &[u8]) -> Result<T, ReplyError> {
    let value: Value = serde_json::from_slice(body)?;
    if let Some(envelope) = error_envelope(&value) {
        return Err(envelope.into());
    }
    Ok(serde_json::from_value(value)?)
}

fn error_envelope(value: &Value) -> Option<ErrorEnvelope> {
    let is_error = value
        .get("status")
        .and_then(Value::as_str)
        .is_some_and(|status| status == "error");
    if !is_error {
        return None;
    }

    Some(ErrorEnvelope {
        status: ReplyStatus::Error,
        message: value
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
