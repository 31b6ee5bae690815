use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, Response,
};
use serde::de::DeserializeOwned;
use shared::{
    domain::{DocumentName, PDF_MIME_TYPE},
    error::ReplyError,
    protocol::{decode_reply, AnswerReceipt, AskRequest, HealthReport, StatusMessage, UploadReceipt},
};
use tracing::{debug, info};

pub mod error;
pub use error::ClientError;

/// A PDF read from disk and ready to be sent as the `file` multipart field.
#[derive(Debug, Clone)]
pub struct PdfUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl PdfUpload {
    pub async fn read(path: &Path, filename: impl Into<String>) -> Result<Self, ClientError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ClientError::ReadFile {
                path: PathBuf::from(path),
                source,
            })?;
        Ok(Self {
            filename: filename.into(),
            bytes,
        })
    }
}

#[async_trait]
pub trait DocumentBackend: Send + Sync {
    async fn upload_pdf(&self, upload: PdfUpload) -> Result<UploadReceipt, ClientError>;
    async fn ask(
        &self,
        question: &str,
        filename: &DocumentName,
    ) -> Result<AnswerReceipt, ClientError>;
    async fn health(&self) -> Result<HealthReport, ClientError>;
    async fn clear_collection(&self) -> Result<StatusMessage, ClientError>;
}

/// [`DocumentBackend`] over the backend's HTTP API. No client-side timeout is set.
pub struct HttpDocumentBackend {
    http: Client,
    base_url: String,
}

impl HttpDocumentBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

async fn read_reply<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.bytes().await?;
    match decode_reply::<T>(&body) {
        Ok(value) if status.is_success() => Ok(value),
        Ok(_) => Err(ClientError::Status {
            status: status.as_u16(),
        }),
        Err(err) if status.is_success() => Err(err.into()),
        Err(err @ ReplyError::Logical { .. }) => Err(err.into()),
        Err(_) => Err(ClientError::Status {
            status: status.as_u16(),
        }),
    }
}

#[async_trait]
impl DocumentBackend for HttpDocumentBackend {
    async fn upload_pdf(&self, upload: PdfUpload) -> Result<UploadReceipt, ClientError> {
        debug!(
            filename = %upload.filename,
            size_bytes = upload.bytes.len(),
            "uploading pdf"
        );
        let part = Part::bytes(upload.bytes)
            .file_name(upload.filename)
            .mime_str(PDF_MIME_TYPE)?;
        let response = self
            .http
            .post(self.endpoint("/upload-pdf"))
            .multipart(Form::new().part("file", part))
            .send()
            .await?;

        let receipt: UploadReceipt = read_reply(response).await?;
        info!(
            filename = %receipt.filename,
            chunks_stored = receipt.chunks_stored,
            "pdf stored by backend"
        );
        Ok(receipt)
    }

    async fn ask(
        &self,
        question: &str,
        filename: &DocumentName,
    ) -> Result<AnswerReceipt, ClientError> {
        let response = self
            .http
            .post(self.endpoint("/ask"))
            .json(&AskRequest {
                question: question.to_string(),
                filename: filename.clone(),
            })
            .send()
            .await?;

        let receipt: AnswerReceipt = read_reply(response).await?;
        info!(
            filename = %filename,
            sources_found = ?receipt.sources_found,
            "question answered"
        );
        Ok(receipt)
    }

    async fn health(&self) -> Result<HealthReport, ClientError> {
        let response = self.http.get(self.endpoint("/health")).send().await?;
        read_reply(response).await
    }

    async fn clear_collection(&self) -> Result<StatusMessage, ClientError> {
        let response = self
            .http
            .delete(self.endpoint("/clear-collection"))
            .send()
            .await?;
        let message: StatusMessage = read_reply(response).await?;
        info!("backend document collection cleared");
        Ok(message)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
