//! crates/study_planner_core/src/registry.rs
//!
//! Commits a completed draft to the ordered list of tests.

use chrono::Utc;
use tracing::debug;

use crate::domain::{DraftTest, TestEntry};

/// Appends a copy of `draft` to `tests` and resets the draft.
///
/// Returns `false` without touching either argument when any draft field is empty.
/// Incomplete submissions are deliberately not reported to the user.
pub fn add_test(tests: &mut Vec<TestEntry>, draft: &mut DraftTest) -> bool {
    if !draft.is_complete() {
        debug!("Ignoring add-test request for an incomplete draft");
        return false;
    }

    let DraftTest {
        name,
        date,
        study_guide,
    } = std::mem::take(draft);
    tests.push(TestEntry {
        name,
        date,
        study_guide,
        added_at: Utc::now(),
    });
    true
}
