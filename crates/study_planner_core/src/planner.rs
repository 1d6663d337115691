//! crates/study_planner_core/src/planner.rs
//!
//! Builds the study-plan prompt from the registered tests and runs one
//! generation attempt against the completion port.

use tracing::{debug, info};

use crate::domain::{ChatPrompt, Credential, TestEntry};
use crate::error::PlannerError;
use crate::ports::CompletionService;

/// Upper bound on the generated response, in model tokens.
pub const MAX_COMPLETION_TOKENS: u32 = 1000;

/// Number of study-guide characters forwarded per test. The rest is never sent.
pub const STUDY_GUIDE_CHAR_LIMIT: usize = 1000;

const SYSTEM_PERSONA: &str = "You are a helpful AI assistant that creates study plans.";

const PROMPT_HEADER: &str = "Create a study plan for the following tests:";

const PROMPT_FOOTER: &str =
    "Please provide a day-by-day plan leading up to the latest test date.";

/// Returns the first `STUDY_GUIDE_CHAR_LIMIT` characters followed by `...`.
fn study_guide_excerpt(study_guide: &str) -> String {
    let mut excerpt: String = study_guide.chars().take(STUDY_GUIDE_CHAR_LIMIT).collect();
    excerpt.push_str("...");
    excerpt
}

/// Builds the system and user messages for the given tests, in insertion order.
pub fn build_prompt(tests: &[TestEntry]) -> ChatPrompt {
    let sections = tests
        .iter()
        .map(|test| {
            format!(
                "Test: {}\nDate: {}\nStudy Guide: {}\n",
                test.name,
                test.date,
                study_guide_excerpt(&test.study_guide)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    ChatPrompt {
        system: SYSTEM_PERSONA.to_string(),
        user: format!("{}\n\n{}\n{}", PROMPT_HEADER, sections, PROMPT_FOOTER),
    }
}

/// Fails with `NoTests` first, then `MissingCredential`.
pub fn check_preconditions(tests: &[TestEntry], credential: &Credential) -> Result<(), PlannerError> {
    if tests.is_empty() {
        return Err(PlannerError::NoTests);
    }
    if credential.is_empty() {
        return Err(PlannerError::MissingCredential);
    }
    Ok(())
}

/// Requests a study plan for `tests`.
///
/// Preconditions are checked in order (tests, then credential) and no request is
/// issued when either fails.
pub async fn generate_plan(
    completion: &dyn CompletionService,
    tests: &[TestEntry],
    credential: &Credential,
) -> Result<String, PlannerError> {
    check_preconditions(tests, credential)?;

    let prompt = build_prompt(tests);
    debug!(
        tests = tests.len(),
        prompt_chars = prompt.user.chars().count(),
        "Built study plan prompt"
    );

    let plan = completion
        .complete(&prompt, credential, MAX_COMPLETION_TOKENS)
        .await?;
    info!(plan_chars = plan.chars().count(), "Received study plan");
    Ok(plan)
}
