//! File selection filtered to PDFs by extension, like an `accept="application/pdf"` file input.
//! Paths from the native dialog and from dropped files go through the same check.

use std::{
    fs,
    path::{Path, PathBuf},
};

use shared::domain::PDF_MIME_TYPE;
use thiserror::Error;

use crate::controller::reducer::SelectedFile;

#[derive(Debug, Error)]
pub enum PickError {
    #[error("'{}' is not a PDF; only PDF files can be selected", path.display())]
    NotPdf { path: PathBuf },
    #[error("'{}' is not a regular file", path.display())]
    NotAFile { path: PathBuf },
    #[error("cannot open '{}': {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Only the extension is checked; file content is never sniffed.
pub fn pick_pdf(path: &Path) -> Result<SelectedFile, PickError> {
    let mime_type = mime_guess::from_path(path).first_or_octet_stream();
    if mime_type.essence_str() != PDF_MIME_TYPE {
        return Err(PickError::NotPdf {
            path: path.to_path_buf(),
        });
    }

    let metadata = fs::metadata(path).map_err(|source| PickError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    if !metadata.is_file() {
        return Err(PickError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(SelectedFile {
        path: path.to_path_buf(),
        name,
        size_bytes: metadata.len(),
        mime_type: mime_type.essence_str().to_string(),
    })
}

/// Opens the native file dialog limited to PDFs. `None` when the user cancels.
pub fn choose_pdf() -> Option<Result<SelectedFile, PickError>> {
    let path = rfd::FileDialog::new()
        .set_title("Select a PDF")
        .add_filter("PDF", &["pdf"])
        .pick_file()?;
    Some(pick_pdf(&path))
}

#[cfg(test)]
#[path = "tests/picker_tests.rs"]
mod tests;
