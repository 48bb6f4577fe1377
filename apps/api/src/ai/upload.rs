//! Upload admission for resume imports: PDF only, bounded size.
//!
//! Checks run on the declared content type, the file name and the leading
//! bytes, before anything is handed to the PDF parser.

use crate::errors::AppError;

pub const PDF_MIME: &str = "application/pdf";
const PDF_MAGIC: &[u8] = b"%PDF-";

/// A file received from the multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: bytes::Bytes,
}

pub fn check_upload(file: &UploadedFile, max_bytes: usize) -> Result<(), AppError> {
    if file.bytes.len() > max_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "file is {} bytes; the limit is {} bytes",
            file.bytes.len(),
            max_bytes
        )));
    }
    if file.bytes.is_empty() {
        return Err(AppError::Validation("file is empty".to_string()));
    }

    let declared_pdf = file
        .content_type
        .as_deref()
        .map(|ct| ct.split(';').next().unwrap_or("").trim().eq_ignore_ascii_case(PDF_MIME));
    let named_pdf = file
        .file_name
        .as_deref()
        .map(|name| name.to_ascii_lowercase().ends_with(".pdf"));

    // A declared non-PDF type is rejected even when the name says otherwise.
    let looks_pdf = match (declared_pdf, named_pdf) {
        (Some(declared), _) => declared,
        (None, Some(named)) => named,
        (None, None) => false,
    };
    if !looks_pdf || !file.bytes.starts_with(PDF_MAGIC) {
        return Err(AppError::UnsupportedMediaType(
            "only application/pdf uploads are accepted".to_string(),
        ));
    }
    Ok(())
}
