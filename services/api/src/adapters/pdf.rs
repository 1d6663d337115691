//! services/api/src/adapters/pdf.rs
//!
//! Implements the `TextExtractionService` port with the `pdf-extract` crate.

use async_trait::async_trait;
use study_planner_core::ports::{PortError, PortResult, TextExtractionService};
use tracing::debug;

/// Extracts text from in-memory PDF documents.
///
/// Parsing is CPU-bound, so it runs on the blocking pool to keep the
/// request executor free while a large guide is processed.
#[derive(Clone, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextExtractionService for PdfTextExtractor {
    async fn extract_text(&self, pdf_bytes: &[u8]) -> PortResult<String> {
        let bytes = pdf_bytes.to_vec();
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| PortError::Unexpected(format!("extraction task failed: {}", e)))?
            .map_err(|e| PortError::Unexpected(format!("pdf-extract failed: {}", e)))?;

        debug!(chars = text.chars().count(), "Extracted text from PDF");
        Ok(text)
    }
}
