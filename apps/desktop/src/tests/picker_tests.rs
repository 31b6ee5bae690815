use super::*;

use std::io::Write;

fn temp_file_with_suffix(suffix: &str, contents: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("picker-")
        .suffix(suffix)
        .tempfile()
        .expect("tempfile");
    file.write_all(contents).expect("write");
    file.flush().expect("flush");
    file
}

#[test]
fn picks_pdf_with_size_and_mime() {
    let file = temp_file_with_suffix(".pdf", b"%PDF-1.4 hello");

    let selected = pick_pdf(file.path()).expect("pick");
    assert_eq!(selected.size_bytes, 14);
    assert_eq!(selected.mime_type, PDF_MIME_TYPE);
    assert!(selected.name.ends_with(".pdf"));
    assert_eq!(selected.path, file.path());
}

#[test]
fn uppercase_extension_is_accepted() {
    let file = temp_file_with_suffix(".PDF", b"%PDF-1.4");
    assert!(pick_pdf(file.path()).is_ok());
}

#[test]
fn rejects_other_extensions() {
    let file = temp_file_with_suffix(".txt", b"plain text");
    let err = pick_pdf(file.path()).expect_err("must reject");
    assert!(matches!(err, PickError::NotPdf { .. }));
}

#[test]
fn spoofed_extension_is_not_sniffed() {
    let file = temp_file_with_suffix(".pdf", b"PK\x03\x04 definitely a zip");
    let selected = pick_pdf(file.path()).expect("extension filter only");
    assert_eq!(selected.mime_type, PDF_MIME_TYPE);
}

#[test]
fn missing_file_is_unreadable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = pick_pdf(&dir.path().join("absent.pdf")).expect_err("must fail");
    assert!(matches!(err, PickError::Unreadable { .. }));
}

#[test]
fn directory_named_like_pdf_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let fake = dir.path().join("folder.pdf");
    std::fs::create_dir(&fake).expect("mkdir");
    let err = pick_pdf(&fake).expect_err("must fail");
    assert!(matches!(err, PickError::NotAFile { .. }));
}
