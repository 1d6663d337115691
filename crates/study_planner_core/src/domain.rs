//! crates/study_planner_core/src/domain.rs
//!
//! Defines the pure, core data structures for the study planner.
//! These structs are independent of any web framework or wire format.

use chrono::{DateTime, Utc};
use std::fmt;

/// The only content type the study-guide upload accepts.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// A scheduled test that has been committed to the registry.
///
/// Entries are never edited after they are added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestEntry {
    pub name: String,
    /// Calendar date, kept as the `YYYY-MM-DD` string the form submitted.
    pub date: String,
    pub study_guide: String,
    pub added_at: DateTime<Utc>,
}

/// The in-progress test being edited in the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftTest {
    pub name: String,
    pub date: String,
    pub study_guide: String,
}

impl DraftTest {
    /// True when every field is non-empty. No trimming is applied.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.date.is_empty() && !self.study_guide.is_empty()
    }
}

/// The user-supplied secret for the completion API.
///
/// Lives only in memory. `Debug` is redacted so it cannot leak through logs.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hands out the raw secret for the authorization header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("Credential(<empty>)")
        } else {
            f.write_str("Credential(<redacted>)")
        }
    }
}

/// A file received from the upload field.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl UploadedFile {
    /// Compares the essence of the declared content type against `application/pdf`,
    /// ignoring parameters and case.
    pub fn is_pdf(&self) -> bool {
        self.content_type
            .as_deref()
            .and_then(|ct| ct.split(';').next())
            .map(|essence| essence.trim().eq_ignore_ascii_case(PDF_CONTENT_TYPE))
            .unwrap_or(false)
    }
}

/// The two role-tagged messages sent to the completion API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPrompt {
    pub system: String,
    pub user: String,
}
