//! Backend commands queued from the controller to the backend worker.

use shared::domain::DocumentName;

use crate::controller::{events::UiErrorContext, reducer::SelectedFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    UploadPdf {
        file: SelectedFile,
        generation: u64,
    },
    Ask {
        question: String,
        filename: DocumentName,
        generation: u64,
    },
    CheckHealth,
    ClearCollection,
}

impl BackendCommand {
    /// The flow a failure of this command is reported against.
    pub fn context(&self) -> UiErrorContext {
        match self {
            BackendCommand::UploadPdf { .. } => UiErrorContext::Upload,
            BackendCommand::Ask { .. } => UiErrorContext::Ask,
            BackendCommand::CheckHealth => UiErrorContext::Health,
            BackendCommand::ClearCollection => UiErrorContext::ClearCollection,
        }
    }

    /// Selection generation the command was issued under, for flows tied to a selection.
    pub fn generation(&self) -> Option<u64> {
        match self {
            BackendCommand::UploadPdf { generation, .. } | BackendCommand::Ask { generation, .. } => {
                Some(*generation)
            }
            BackendCommand::CheckHealth | BackendCommand::ClearCollection => None,
        }
    }
}
