//! Per-session controller state and its transitions.
//!
//! Intent methods validate a user action and return the command to dispatch,
//! or `None` when the action is rejected before any request. [`ControllerState::apply`]
//! folds backend results back in. Upload and ask keep separate phases and never
//! wait on each other; the only coupling is that asking needs an active document.
//!
//! Every accepted selection starts a new generation. Upload and ask results that
//! come back under an older generation are dropped.

use std::path::PathBuf;

use chrono::{DateTime, Local};
use shared::{
    domain::DocumentName,
    protocol::{AnswerReceipt, HealthReport, StatusMessage, UploadReceipt},
};

use tracing::debug;

use crate::backend_bridge::commands::BackendCommand;

use super::events::{UiError, UiErrorContext, UiEvent};

pub const NO_ANSWER_PLACEHOLDER: &str = "No answer returned.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadPhase {
    #[default]
    Idle,
    Selecting,
    Uploading,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AskPhase {
    #[default]
    Idle,
    Asking,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub text: String,
    pub raised_at: DateTime<Local>,
}

#[derive(Debug)]
pub struct ControllerState {
    max_upload_bytes: u64,
    generation: u64,
    selected_file: Option<SelectedFile>,
    active_document: Option<UploadReceipt>,
    upload_phase: UploadPhase,
    ask_phase: AskPhase,
    last_question: Option<String>,
    answer: Option<String>,
    status: String,
    health: Option<HealthReport>,
    checking_health: bool,
    clearing_collection: bool,
    notifications: Vec<Notification>,
}

impl ControllerState {
    pub fn new(max_upload_bytes: u64) -> Self {
        Self {
            max_upload_bytes,
            generation: 0,
            selected_file: None,
            active_document: None,
            upload_phase: UploadPhase::Idle,
            ask_phase: AskPhase::Idle,
            last_question: None,
            answer: None,
            status: "Select a PDF to get started".to_string(),
            health: None,
            checking_health: false,
            clearing_collection: false,
            notifications: Vec::new(),
        }
    }

    pub fn select_file(&mut self, file: SelectedFile) -> bool {
        if file.size_bytes > self.max_upload_bytes {
            self.selected_file = None;
            if self.upload_phase != UploadPhase::Uploading {
                self.upload_phase = UploadPhase::Idle;
            }
            self.notify_error(&UiError::validation(
                UiErrorContext::SelectFile,
                format!(
                    "File too large. Max allowed size is {}.",
                    format_size(self.max_upload_bytes)
                ),
            ));
            return false;
        }

        // A new selection supersedes whatever was uploaded before it.
        self.generation = self.generation.wrapping_add(1);
        self.status = format!("Selected {}", file.name);
        self.selected_file = Some(file);
        self.active_document = None;
        self.answer = None;
        if self.upload_phase != UploadPhase::Uploading {
            self.upload_phase = UploadPhase::Selecting;
        }
        true
    }

    pub fn begin_upload(&mut self) -> Option<BackendCommand> {
        if self.upload_phase == UploadPhase::Uploading {
            self.notify(NotificationLevel::Info, "Upload already in progress.");
            return None;
        }
        let Some(file) = self.selected_file.clone() else {
            self.notify_error(&UiError::validation(
                UiErrorContext::Upload,
                "Please select a PDF file first.",
            ));
            return None;
        };

        self.upload_phase = UploadPhase::Uploading;
        self.status = format!("Uploading {}...", file.name);
        Some(BackendCommand::UploadPdf {
            file,
            generation: self.generation,
        })
    }

    pub fn begin_ask(&mut self, question: &str) -> Option<BackendCommand> {
        if self.ask_phase == AskPhase::Asking {
            self.notify(NotificationLevel::Info, "Still waiting for the previous answer.");
            return None;
        }
        let question = question.trim();
        if question.is_empty() {
            self.notify_error(&UiError::validation(
                UiErrorContext::Ask,
                "Please enter a question.",
            ));
            return None;
        }
        let Some(filename) = self.active_filename().cloned() else {
            self.notify_error(&UiError::validation(
                UiErrorContext::Ask,
                "Please upload a PDF first.",
            ));
            return None;
        };

        self.ask_phase = AskPhase::Asking;
        self.last_question = Some(question.to_string());
        Some(BackendCommand::Ask {
            question: question.to_string(),
            filename,
            generation: self.generation,
        })
    }

    pub fn begin_health_check(&mut self) -> Option<BackendCommand> {
        if self.checking_health {
            self.notify(NotificationLevel::Info, "Health check already running.");
            return None;
        }
        self.checking_health = true;
        Some(BackendCommand::CheckHealth)
    }

    pub fn begin_clear_collection(&mut self) -> Option<BackendCommand> {
        if self.clearing_collection {
            self.notify(NotificationLevel::Info, "Already clearing stored documents.");
            return None;
        }
        self.clearing_collection = true;
        Some(BackendCommand::ClearCollection)
    }

    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(text) => self.notify(NotificationLevel::Info, text),
            UiEvent::Uploaded {
                generation,
                receipt,
            } => {
                if generation != self.generation {
                    debug!(
                        filename = %receipt.filename,
                        "dropping upload result for a replaced selection"
                    );
                    self.release_stale_upload();
                    return;
                }
                self.upload_phase = UploadPhase::Succeeded;
                self.status = upload_status_line(&receipt);
                self.notify(
                    NotificationLevel::Success,
                    format!("Uploaded {}", receipt.filename),
                );
                self.answer = None;
                self.active_document = Some(receipt);
            }
            UiEvent::Answered {
                generation,
                receipt,
            } => {
                if generation != self.generation {
                    debug!("dropping answer for a replaced selection");
                    self.release_stale_ask();
                    return;
                }
                self.apply_answer(receipt);
            }
            UiEvent::HealthReported(report) => {
                self.checking_health = false;
                let level = if report.is_healthy() {
                    NotificationLevel::Success
                } else {
                    NotificationLevel::Error
                };
                self.notify(level, health_summary(&report));
                self.health = Some(report);
            }
            UiEvent::CollectionCleared(message) => self.apply_collection_cleared(message),
            UiEvent::Error(err) => self.apply_error(err),
        }
    }

    fn apply_answer(&mut self, receipt: AnswerReceipt) {
        self.ask_phase = AskPhase::Succeeded;
        self.answer = Some(
            receipt
                .answer
                .filter(|answer| !answer.trim().is_empty())
                .unwrap_or_else(|| NO_ANSWER_PLACEHOLDER.to_string()),
        );
    }

    fn apply_collection_cleared(&mut self, message: StatusMessage) {
        self.clearing_collection = false;
        self.active_document = None;
        self.answer = None;
        if self.upload_phase != UploadPhase::Uploading {
            self.upload_phase = if self.selected_file.is_some() {
                UploadPhase::Selecting
            } else {
                UploadPhase::Idle
            };
        }
        self.status = "Stored documents cleared; upload a PDF again".to_string();
        self.notify(
            NotificationLevel::Success,
            message
                .message
                .unwrap_or_else(|| "Stored documents cleared.".to_string()),
        );
    }

    fn release_stale_upload(&mut self) {
        if self.upload_phase == UploadPhase::Uploading {
            self.upload_phase = if self.selected_file.is_some() {
                UploadPhase::Selecting
            } else {
                UploadPhase::Idle
            };
        }
    }

    fn release_stale_ask(&mut self) {
        if self.ask_phase == AskPhase::Asking {
            self.ask_phase = AskPhase::Idle;
        }
    }

    fn apply_error(&mut self, err: UiError) {
        if err.generation().is_some_and(|g| g != self.generation) {
            debug!(
                context = ?err.context(),
                "dropping failure for a replaced selection: {}",
                err.message()
            );
            match err.context() {
                UiErrorContext::Upload => self.release_stale_upload(),
                UiErrorContext::Ask => self.release_stale_ask(),
                _ => {}
            }
            return;
        }

        match err.context() {
            UiErrorContext::Upload => {
                // Only the phase changes; the previous active document stays usable.
                if self.upload_phase == UploadPhase::Uploading {
                    self.upload_phase = UploadPhase::Failed;
                    self.status = "Upload failed".to_string();
                }
            }
            UiErrorContext::Ask => {
                if self.ask_phase == AskPhase::Asking {
                    self.ask_phase = AskPhase::Failed;
                }
                self.answer = None;
            }
            UiErrorContext::Health => self.checking_health = false,
            UiErrorContext::ClearCollection => self.clearing_collection = false,
            UiErrorContext::BackendStartup | UiErrorContext::SelectFile => {}
        }
        self.notify_error(&err);
    }

    pub fn report_error(&mut self, err: UiError) {
        self.apply_error(err);
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn notify(&mut self, level: NotificationLevel, text: impl Into<String>) {
        self.notifications.push(Notification {
            level,
            text: text.into(),
            raised_at: Local::now(),
        });
    }

    fn notify_error(&mut self, err: &UiError) {
        self.notify(NotificationLevel::Error, err.user_message());
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// True while any request is waiting on the backend.
    pub fn is_busy(&self) -> bool {
        self.upload_phase == UploadPhase::Uploading
            || self.ask_phase == AskPhase::Asking
            || self.checking_health
            || self.clearing_collection
    }

    /// Upload can be triggered unless one is already running.
    pub fn upload_enabled(&self) -> bool {
        self.upload_phase != UploadPhase::Uploading
    }

    /// Asking can be triggered unless a question is already pending.
    pub fn ask_enabled(&self) -> bool {
        self.ask_phase != AskPhase::Asking
    }

    pub fn is_checking_health(&self) -> bool {
        self.checking_health
    }

    pub fn is_clearing_collection(&self) -> bool {
        self.clearing_collection
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    pub fn active_document(&self) -> Option<&UploadReceipt> {
        self.active_document.as_ref()
    }

    pub fn active_filename(&self) -> Option<&DocumentName> {
        self.active_document.as_ref().map(|receipt| &receipt.filename)
    }

    pub fn upload_phase(&self) -> UploadPhase {
        self.upload_phase
    }

    pub fn ask_phase(&self) -> AskPhase {
        self.ask_phase
    }

    pub fn last_question(&self) -> Option<&str> {
        self.last_question.as_deref()
    }

    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn health(&self) -> Option<&HealthReport> {
        self.health.as_ref()
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }
}

/// Human readable byte count: `512 B`, `1.5 KB`, `10 MB`.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes < KB {
        return format!("{bytes} B");
    }
    if bytes < MB {
        return format_scaled_unit(bytes, KB, "KB");
    }
    if bytes < GB {
        return format_scaled_unit(bytes, MB, "MB");
    }
    format_scaled_unit(bytes, GB, "GB")
}

fn format_scaled_unit(bytes: u64, unit_size: u64, unit_label: &str) -> String {
    let value = bytes as f64 / unit_size as f64;
    let value_text = format!("{value:.1}");
    let compact_value = value_text.strip_suffix(".0").unwrap_or(&value_text);
    format!("{compact_value} {unit_label}")
}

fn upload_status_line(receipt: &UploadReceipt) -> String {
    let mut line = format!(
        "Uploaded {}: {} chunks stored",
        receipt.filename, receipt.chunks_stored
    );
    if let Some(pages) = receipt.pages_processed {
        line.push_str(&format!(" from {pages} pages"));
    }
    line
}

fn health_summary(report: &HealthReport) -> String {
    if report.is_healthy() {
        let collection = match report.collection_exists {
            Some(true) => "document collection ready",
            Some(false) => "document collection missing",
            None => "document collection unknown",
        };
        format!("Backend healthy ({collection})")
    } else {
        match report.error.as_deref() {
            Some(error) => format!("Backend unhealthy: {error}"),
            None => "Backend unhealthy".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
