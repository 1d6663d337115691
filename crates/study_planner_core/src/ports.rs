//! crates/study_planner_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the two external collaborators:
//! PDF text extraction and the language-model completion API.
//! Keeping them behind traits lets the core run without either of them.

use async_trait::async_trait;

use crate::domain::{ChatPrompt, Credential};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// The remote service answered with a non-success HTTP status.
    /// `body` is the compact JSON error document, or the raw text if it was not JSON.
    #[error("API Error: {status} - {body}")]
    Api { status: u16, body: String },
    #[error("{0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait TextExtractionService: Send + Sync {
    /// Extracts the plain text of a PDF document.
    async fn extract_text(&self, pdf_bytes: &[u8]) -> PortResult<String>;
}

#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Sends one chat completion request and returns the first choice's content.
    async fn complete(
        &self,
        prompt: &ChatPrompt,
        credential: &Credential,
        max_tokens: u32,
    ) -> PortResult<String>;
}
