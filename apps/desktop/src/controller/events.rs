//! Backend results delivered to the controller and error modeling for the UI.

use client_core::ClientError;
use shared::protocol::{AnswerReceipt, HealthReport, StatusMessage, UploadReceipt};

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    Uploaded {
        generation: u64,
        receipt: UploadReceipt,
    },
    Answered {
        generation: u64,
        receipt: AnswerReceipt,
    },
    HealthReported(HealthReport),
    CollectionCleared(StatusMessage),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    /// The backend refused the request and said why.
    Logical,
    /// Network, HTTP, decode or local I/O failure.
    Transport,
    /// Rejected before any request was made.
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    SelectFile,
    Upload,
    Ask,
    Health,
    ClearCollection,
}

fn generic_failure_message(context: UiErrorContext) -> &'static str {
    match context {
        UiErrorContext::BackendStartup => "Backend worker failed to start; restart the client.",
        UiErrorContext::SelectFile => "Could not use the selected file.",
        UiErrorContext::Upload => "Upload failed. Please try again.",
        UiErrorContext::Ask => "Error getting answer. Please try again.",
        UiErrorContext::Health => "Backend is unreachable.",
        UiErrorContext::ClearCollection => "Could not clear stored documents.",
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
    generation: Option<u64>,
}

impl UiError {
    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        if err.is_logical() {
            let message = err
                .logical_message()
                .unwrap_or_else(|| generic_failure_message(context))
                .to_string();
            return Self {
                category: UiErrorCategory::Logical,
                context,
                message,
                generation: None,
            };
        }

        Self::transport(context, err.to_string())
    }

    pub fn transport(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Transport,
            context,
            message: message.into(),
            generation: None,
        }
    }

    pub fn validation(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Validation,
            context,
            message: message.into(),
            generation: None,
        }
    }

    /// Ties the error to the selection generation of the request that failed.
    pub fn with_generation(mut self, generation: Option<u64>) -> Self {
        self.generation = generation;
        self
    }

    /// Text shown to the user. Transport details stay in the logs.
    pub fn user_message(&self) -> String {
        match self.category {
            UiErrorCategory::Logical | UiErrorCategory::Validation => self.message.clone(),
            UiErrorCategory::Transport => generic_failure_message(self.context).to_string(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn generation(&self) -> Option<u64> {
        self.generation
    }
}
