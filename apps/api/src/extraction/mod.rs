//! Resume text extraction. PDF bytes in, plain text out.
//!
//! `pdf-extract` is CPU-bound, so the async entry point runs it on the blocking pool.

pub mod upload;

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to parse PDF: {0}")]
    Pdf(String),

    #[error("document contains no extractable text")]
    NoText,

    #[error("extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Extracts text from PDF bytes on the blocking pool.
pub async fn extract_text(bytes: Bytes) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || extract_pdf_text(&bytes)).await?
}

/// Synchronous extraction. Rejects documents whose text is empty after trimming
/// (scanned images, for example).
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let text =
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    if text.trim().is_empty() {
        return Err(ExtractionError::NoText);
    }

    debug!("Extracted {} characters from PDF", text.len());
    Ok(text)
}

/// Accepts an upload as a PDF when the declared content type, the file extension,
/// or the `%PDF` magic says so.
pub fn looks_like_pdf(content_type: Option<&str>, file_name: Option<&str>, bytes: &[u8]) -> bool {
    let by_type = content_type
        .map(|ct| ct.eq_ignore_ascii_case("application/pdf"))
        .unwrap_or(false);
    let by_name = file_name
        .map(|name| name.to_ascii_lowercase().ends_with(".pdf"))
        .unwrap_or(false);
    let by_magic = bytes.starts_with(b"%PDF");

    by_type || by_name || by_magic
}
