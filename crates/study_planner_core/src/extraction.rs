//! crates/study_planner_core/src/extraction.rs
//!
//! Guards the text-extraction collaborator: only PDFs are handed to it.

use tracing::warn;

use crate::domain::UploadedFile;
use crate::error::PlannerError;
use crate::ports::TextExtractionService;

/// Extracts the study-guide text from an uploaded file.
///
/// Files that do not declare a PDF content type are rejected before the
/// extractor is called. No retry is attempted on failure.
pub async fn extract_study_guide(
    extractor: &dyn TextExtractionService,
    file: &UploadedFile,
) -> Result<String, PlannerError> {
    if !file.is_pdf() {
        warn!(
            file_name = ?file.file_name,
            content_type = ?file.content_type,
            "Rejected study guide upload with a non-PDF content type"
        );
        return Err(PlannerError::InvalidFileType);
    }

    extractor.extract_text(&file.data).await.map_err(|e| {
        warn!(file_name = ?file.file_name, "Failed to extract text from PDF: {}", e);
        PlannerError::ExtractionFailed(e.to_string())
    })
}
