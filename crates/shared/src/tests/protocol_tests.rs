use super::*;
use serde_json::json;

fn body(value: serde_json::Value) -> Vec<u8> {
    serde_json::to_vec(&value).expect("encode")
}

#[test]
fn decodes_upload_receipt_with_extra_fields() {
    let receipt: UploadReceipt = decode_reply(&body(json!({
        "status": "success",
        "filename": "a.pdf",
        "chunks_stored": 5,
        "text_length": 1200,
        "pages_processed": 3,
    })))
    .expect("decode");

    assert_eq!(receipt.filename, DocumentName::from("a.pdf"));
    assert_eq!(receipt.chunks_stored, 5);
    assert_eq!(receipt.pages_processed, Some(3));
}

#[test]
fn error_envelope_becomes_logical_error() {
    let err = decode_reply::<AnswerReceipt>(&body(json!({
        "status": "error",
        "message": "bad file",
    })))
    .expect_err("must fail");

    match err {
        ReplyError::Logical { message } => assert_eq!(message.as_deref(), Some("bad file")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn error_envelope_without_message_is_still_logical() {
    let err = decode_reply::<UploadReceipt>(&body(json!({ "status": "error" })))
        .expect_err("must fail");
    assert!(matches!(err, ReplyError::Logical { message: None }));
}

#[test]
fn missing_answer_decodes_as_none() {
    let receipt: AnswerReceipt =
        decode_reply(&body(json!({ "sources_found": 0 }))).expect("decode");
    assert_eq!(receipt.answer, None);
    assert_eq!(receipt.sources_found, Some(0));
}

#[test]
fn unhealthy_report_is_not_an_error_envelope() {
    let report: HealthReport = decode_reply(&body(json!({
        "status": "unhealthy",
        "error": "connection refused",
    })))
    .expect("decode");

    assert!(!report.is_healthy());
    assert_eq!(report.error.as_deref(), Some("connection refused"));
}

#[test]
fn unknown_status_values_are_tolerated() {
    let message: StatusMessage =
        decode_reply(&body(json!({ "status": "degraded", "message": "slow" }))).expect("decode");
    assert_eq!(message.status, ReplyStatus::Unknown);
}

#[test]
fn non_json_body_is_malformed() {
    let err = decode_reply::<UploadReceipt>(b"<html>Bad Gateway</html>").expect_err("must fail");
    assert!(matches!(err, ReplyError::Malformed(_)));
}

#[test]
fn success_shape_mismatch_is_malformed() {
    let err = decode_reply::<UploadReceipt>(&body(json!({ "filename": "a.pdf" })))
        .expect_err("must fail");
    assert!(matches!(err, ReplyError::Malformed(_)));
}
