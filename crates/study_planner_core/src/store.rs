//! crates/study_planner_core/src/store.rs
//!
//! The single state container for a planning session. All mutation goes through
//! the update operations below; each one completes synchronously once the
//! (possibly awaited) result it applies is available.

use tracing::{debug, warn};

use crate::domain::{Credential, DraftTest, TestEntry};
use crate::error::PlannerError;
use crate::registry;

#[derive(Debug, Default)]
pub struct SessionState {
    tests: Vec<TestEntry>,
    draft: DraftTest,
    credential: Credential,
    study_plan: Option<String>,
    error_message: Option<String>,
    pending_generations: usize,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Read access ---

    pub fn tests(&self) -> &[TestEntry] {
        &self.tests
    }

    pub fn draft(&self) -> &DraftTest {
        &self.draft
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn study_plan(&self) -> Option<&str> {
        self.study_plan.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Number of plan generations issued but not yet applied.
    pub fn pending_generations(&self) -> usize {
        self.pending_generations
    }

    // --- Draft edits ---

    pub fn set_draft_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_draft_date(&mut self, date: impl Into<String>) {
        self.draft.date = date.into();
    }

    /// Writes extracted text into the draft, or records the failure.
    /// A failure leaves the draft's study guide untouched.
    pub fn apply_extraction(&mut self, result: Result<String, PlannerError>) {
        match result {
            Ok(text) => {
                debug!(chars = text.chars().count(), "Study guide text loaded into draft");
                self.draft.study_guide = text;
            }
            Err(e) => self.record_error(&e),
        }
    }

    /// Commits the draft to the test list. Returns whether it was accepted.
    pub fn add_test(&mut self) -> bool {
        registry::add_test(&mut self.tests, &mut self.draft)
    }

    pub fn set_credential(&mut self, credential: Credential) {
        self.credential = credential;
    }

    // --- Plan generation ---

    /// Marks a generation as outstanding.
    pub fn begin_generation(&mut self) {
        self.pending_generations += 1;
    }

    /// Applies the outcome of one generation attempt.
    ///
    /// Success replaces the plan and clears the error. Failure sets the error and
    /// keeps whatever plan was shown before. Overlapping attempts are applied in
    /// completion order, so the last one to finish wins.
    pub fn apply_plan_result(&mut self, result: Result<String, PlannerError>) {
        self.pending_generations = self.pending_generations.saturating_sub(1);
        match result {
            Ok(plan) => {
                self.study_plan = Some(plan);
                self.error_message = None;
            }
            Err(e) => self.record_error(&e),
        }
    }

    /// Replaces the error banner with the message for `err`.
    pub fn record_error(&mut self, err: &PlannerError) {
        warn!("Operation failed: {}", err);
        self.error_message = Some(err.user_message());
    }
}
