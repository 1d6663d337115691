//! crates/study_planner_core/src/error.rs
//!
//! The error taxonomy for every user-triggered operation. Each variant maps to
//! the single message shown in the page's error banner.

use crate::ports::PortError;

#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    /// The uploaded file did not declare a PDF content type.
    #[error("uploaded file is not a PDF")]
    InvalidFileType,

    /// The extraction collaborator failed. The detail is kept for logs only.
    #[error("failed to extract text from PDF: {0}")]
    ExtractionFailed(String),

    /// The upload was larger than the service accepts.
    #[error("study guide upload exceeds the size limit")]
    UploadTooLarge,

    /// The form body could not be read. The detail is kept for logs only.
    #[error("failed to read the uploaded form: {0}")]
    UploadFailed(String),

    #[error("no tests have been added")]
    NoTests,

    #[error("no API key was provided")]
    MissingCredential,

    /// Non-success status or an unreadable success body from the completion API.
    #[error("{}", api_detail(.status, .detail))]
    Api { status: Option<u16>, detail: String },
}

fn api_detail(status: &Option<u16>, detail: &str) -> String {
    match status {
        Some(status) => format!("API Error: {} - {}", status, detail),
        None => detail.to_string(),
    }
}

impl PlannerError {
    /// The text shown to the user in the error banner.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidFileType => "Please upload a valid PDF file.".to_string(),
            Self::ExtractionFailed(_) => "Failed to extract text from PDF.".to_string(),
            Self::UploadTooLarge => "Study guide exceeds the upload limit.".to_string(),
            Self::UploadFailed(_) => "Failed to read the uploaded study guide.".to_string(),
            Self::NoTests => {
                "Please add at least one test before generating a study plan.".to_string()
            }
            Self::MissingCredential => "Please enter your OpenAI API key.".to_string(),
            Self::Api { .. } => format!(
                "Error generating study plan: {}. Please check your API key and try again.",
                self
            ),
        }
    }
}

impl From<PortError> for PlannerError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::Api { status, body } => Self::Api {
                status: Some(status),
                detail: body,
            },
            PortError::Unexpected(detail) => Self::Api {
                status: None,
                detail,
            },
        }
    }
}
