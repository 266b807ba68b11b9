//! Document text extraction. PDF parsing is CPU-bound, so it runs on the
//! blocking pool rather than on the request task.

use anyhow::anyhow;
use async_trait::async_trait;
use tracing::debug;

use crate::errors::AppError;

/// Turns document bytes into plain text. Either the whole text is returned
/// or the call fails; a document without a text layer yields an empty string.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, bytes: Vec<u8>) -> Result<String, AppError>;
}

/// Extracts the text layer of a PDF with `pdf-extract`.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, bytes: Vec<u8>) -> Result<String, AppError> {
        let size = bytes.len();
        // A panic inside the parser surfaces as a JoinError.
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| AppError::Extraction(anyhow!("PDF parser aborted: {e}")))?
            .map_err(|e| AppError::Extraction(anyhow!("{e}")))?;

        debug!("Extracted {} chars from {} byte document", text.len(), size);
        Ok(text)
    }
}
