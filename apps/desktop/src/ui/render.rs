//! Text shown by the panels and toasts.

use shared::protocol::HealthReport;

use crate::controller::reducer::{
    format_size, AskPhase, ControllerState, Notification, NotificationLevel, UploadPhase,
};

pub fn upload_phase_label(phase: UploadPhase) -> &'static str {
    match phase {
        UploadPhase::Idle => "No file selected",
        UploadPhase::Selecting => "Ready to upload",
        UploadPhase::Uploading => "Uploading...",
        UploadPhase::Succeeded => "Uploaded",
        UploadPhase::Failed => "Upload failed",
    }
}

pub fn ask_phase_label(phase: AskPhase) -> &'static str {
    match phase {
        AskPhase::Idle => "",
        AskPhase::Asking => "Thinking...",
        AskPhase::Succeeded => "Answered",
        AskPhase::Failed => "No answer",
    }
}

pub fn selection_line(state: &ControllerState) -> String {
    match state.selected_file() {
        Some(file) => format!("{} ({})", file.name, format_size(file.size_bytes)),
        None => "No file selected".to_string(),
    }
}

pub fn upload_limit_hint(state: &ControllerState) -> String {
    format!("PDF only, up to {}", format_size(state.max_upload_bytes()))
}

/// Summary of the document questions currently go to.
pub fn document_line(state: &ControllerState) -> Option<String> {
    let receipt = state.active_document()?;
    let mut line = format!(
        "{}: {} chunks stored",
        receipt.filename, receipt.chunks_stored
    );
    if let Some(pages) = receipt.pages_processed {
        line.push_str(&format!(", {pages} pages"));
    }
    Some(line)
}

pub fn health_line(report: &HealthReport) -> String {
    if !report.is_healthy() {
        return match report.error.as_deref() {
            Some(error) => format!("Unhealthy: {error}"),
            None => "Unhealthy".to_string(),
        };
    }
    match report.total_collections {
        Some(total) => format!("Healthy ({total} collections)"),
        None => "Healthy".to_string(),
    }
}

pub fn render_notification(notification: &Notification) -> String {
    let marker = match notification.level {
        NotificationLevel::Success => "✓",
        NotificationLevel::Error => "✗",
        NotificationLevel::Info => "·",
    };
    format!(
        "[{}] {marker} {}",
        notification.raised_at.format("%H:%M:%S"),
        notification.text
    )
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
