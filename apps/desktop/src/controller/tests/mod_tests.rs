use super::*;
use crate::controller::reducer::{AskPhase, UploadPhase};
use crossbeam_channel::{bounded, Receiver, TryRecvError};
use shared::{
    domain::{DocumentName, MAX_PDF_BYTES},
    protocol::UploadReceipt,
};
use std::path::PathBuf;

fn controller(capacity: usize) -> (Controller, Receiver<BackendCommand>) {
    let (cmd_tx, cmd_rx) = bounded(capacity);
    (Controller::new(MAX_PDF_BYTES, cmd_tx), cmd_rx)
}

fn pdf(name: &str, size_bytes: u64) -> SelectedFile {
    SelectedFile {
        path: PathBuf::from(name),
        name: name.to_string(),
        size_bytes,
        mime_type: "application/pdf".to_string(),
    }
}

fn complete_upload(controller: &mut Controller, name: &str) {
    let generation = controller.state().generation();
    controller.handle_event(UiEvent::Uploaded {
        generation,
        receipt: UploadReceipt {
            filename: DocumentName::from(name),
            chunks_stored: 5,
            text_length: None,
            pages_processed: None,
        },
    });
}

#[test]
fn upload_without_file_never_queues_a_request() {
    let (mut controller, cmd_rx) = controller(4);
    assert!(!controller.upload());
    assert_eq!(cmd_rx.try_recv(), Err(TryRecvError::Empty));
}

#[test]
fn oversize_file_then_upload_never_queues_a_request() {
    let (mut controller, cmd_rx) = controller(4);
    assert!(!controller.select_file(pdf("big.pdf", MAX_PDF_BYTES + 1)));
    assert!(!controller.upload());
    assert_eq!(cmd_rx.try_recv(), Err(TryRecvError::Empty));
}

#[test]
fn blank_or_premature_questions_never_queue_a_request() {
    let (mut controller, cmd_rx) = controller(4);
    assert!(!controller.ask("what?"));

    controller.select_file(pdf("a.pdf", 1));
    assert!(controller.upload());
    cmd_rx.try_recv().expect("upload queued");
    complete_upload(&mut controller, "a.pdf");

    assert!(!controller.ask(""));
    assert!(!controller.ask("    "));
    assert_eq!(cmd_rx.try_recv(), Err(TryRecvError::Empty));
}

#[test]
fn ask_queues_question_for_active_document() {
    let (mut controller, cmd_rx) = controller(4);
    controller.select_file(pdf("a.pdf", 1));
    controller.upload();
    cmd_rx.try_recv().expect("upload queued");
    complete_upload(&mut controller, "a.pdf");

    assert!(controller.ask("summary please"));
    assert_eq!(
        cmd_rx.try_recv(),
        Ok(BackendCommand::Ask {
            question: "summary please".to_string(),
            filename: DocumentName::from("a.pdf"),
            generation: controller.state().generation(),
        })
    );
}

#[test]
fn full_queue_rolls_flow_back_and_reports_status() {
    let (mut controller, cmd_rx) = controller(1);
    controller.select_file(pdf("a.pdf", 1));
    assert!(controller.check_health());

    assert!(!controller.upload());

    assert_eq!(controller.state().upload_phase(), UploadPhase::Failed);
    assert_eq!(controller.state().status(), "UI command queue is full; please retry");

    assert_eq!(cmd_rx.try_recv(), Ok(BackendCommand::CheckHealth));
    assert!(controller.upload());
    assert_eq!(controller.state().upload_phase(), UploadPhase::Uploading);
}

#[test]
fn disconnected_worker_is_reported() {
    let (mut controller, cmd_rx) = controller(4);
    drop(cmd_rx);
    controller.select_file(pdf("a.pdf", 1));
    controller.upload();
    complete_upload(&mut controller, "a.pdf");

    assert!(!controller.ask("anyone there?"));

    assert_eq!(controller.state().ask_phase(), AskPhase::Failed);
    assert!(controller
        .state()
        .status()
        .starts_with("Backend command processor disconnected"));
    let notifications = controller.take_notifications();
    assert_eq!(
        notifications.last().map(|n| n.text.as_str()),
        Some("Error getting answer. Please try again.")
    );
}

#[test]
fn reselecting_during_upload_keeps_questions_off_the_old_document() {
    let (mut controller, cmd_rx) = controller(4);
    controller.select_file(pdf("a.pdf", 1));
    assert!(controller.upload());
    let Ok(BackendCommand::UploadPdf { generation, .. }) = cmd_rx.try_recv() else {
        panic!("upload queued");
    };

    controller.select_file(pdf("b.pdf", 1));
    controller.handle_event(UiEvent::Uploaded {
        generation,
        receipt: UploadReceipt {
            filename: DocumentName::from("a.pdf"),
            chunks_stored: 5,
            text_length: None,
            pages_processed: None,
        },
    });

    assert!(!controller.ask("what is in a?"));
    assert_eq!(cmd_rx.try_recv(), Err(TryRecvError::Empty));
    assert!(controller.upload());
    assert!(matches!(
        cmd_rx.try_recv(),
        Ok(BackendCommand::UploadPdf { file, .. }) if file.name == "b.pdf"
    ));
}
