//! Runtime bridge between UI command queue and backend event intake.

use std::{path::Path, sync::Arc, thread};

use client_core::{ClientError, DocumentBackend, PdfUpload};
use crossbeam_channel::{Receiver, Sender};
use shared::protocol::UploadReceipt;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Starts the backend worker thread. Every command runs as its own task, so a slow
/// upload never holds back a question. The worker exits once the command queue closes.
pub fn launch(
    backend: Arc<dyn DocumentBackend>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::transport(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                let backend = Arc::clone(&backend);
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let event = execute(backend.as_ref(), cmd).await;
                    if ui_tx.try_send(event).is_err() {
                        tracing::error!("ui event queue unavailable; dropping backend result");
                    }
                });
            }
            tracing::debug!("backend command queue closed; worker stopping");
        });
    })
}

async fn execute(backend: &dyn DocumentBackend, cmd: BackendCommand) -> UiEvent {
    let context = cmd.context();
    let generation = cmd.generation();
    let result = match cmd {
        BackendCommand::UploadPdf { file, generation } => {
            upload(backend, &file.path, &file.name)
                .await
                .map(|receipt| UiEvent::Uploaded {
                    generation,
                    receipt,
                })
        }
        BackendCommand::Ask {
            question,
            filename,
            generation,
        } => backend
            .ask(&question, &filename)
            .await
            .map(|receipt| UiEvent::Answered {
                generation,
                receipt,
            }),
        BackendCommand::CheckHealth => backend.health().await.map(UiEvent::HealthReported),
        BackendCommand::ClearCollection => backend
            .clear_collection()
            .await
            .map(UiEvent::CollectionCleared),
    };

    result.unwrap_or_else(|err| {
        if err.is_logical() {
            tracing::warn!(?context, "backend rejected request: {err}");
        } else {
            tracing::error!(?context, "backend request failed: {err}");
        }
        UiEvent::Error(UiError::from_client_error(context, &err).with_generation(generation))
    })
}

async fn upload(
    backend: &dyn DocumentBackend,
    path: &Path,
    name: &str,
) -> Result<UploadReceipt, ClientError> {
    let upload = PdfUpload::read(path, name).await?;
    backend.upload_pdf(upload).await
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
