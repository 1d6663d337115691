//! services/api/src/web/form.rs
//!
//! Handlers for the two forms on the page. They only route input to the core
//! operations and then send the browser back to `/` to re-render.

use crate::web::{plan_task::spawn_plan_generation, state::AppState};
use axum::{
    extract::{multipart::MultipartError, Form, Multipart, State},
    http::StatusCode,
    response::Redirect,
};
use bytes::Bytes;
use serde::Deserialize;
use std::sync::Arc;
use study_planner_core::{
    domain::{Credential, UploadedFile},
    extraction, planner, PlannerError,
};
use tracing::{debug, info, warn};
use utoipa::ToSchema;

/// Which button submitted the test form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Intent {
    /// Only apply field edits and load the study guide.
    #[default]
    Upload,
    /// Additionally commit the draft to the test list.
    Add,
}

/// Everything the multipart test form carried.
#[derive(Default)]
struct TestForm {
    name: Option<String>,
    date: Option<String>,
    study_guide: Option<UploadedFile>,
    intent: Intent,
    /// Set when the body stopped short; fields read before the failure are kept.
    read_error: Option<PlannerError>,
}

async fn read_fields(multipart: &mut Multipart, form: &mut TestForm) -> Result<(), MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "name" => form.name = Some(field.text().await?),
            "date" => form.date = Some(field.text().await?),
            "intent" => {
                form.intent = match field.text().await?.as_str() {
                    "add" => Intent::Add,
                    _ => Intent::Upload,
                }
            }
            "study_guide" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data: Bytes = field.bytes().await?;
                // Browsers send an empty part when no file was chosen.
                let chosen = !data.is_empty() || file_name.as_deref().is_some_and(|n| !n.is_empty());
                if chosen {
                    form.study_guide = Some(UploadedFile {
                        file_name,
                        content_type,
                        data: data.to_vec(),
                    });
                }
            }
            other => debug!("Ignoring unknown form field '{}'", other),
        }
    }
    Ok(())
}

async fn read_test_form(mut multipart: Multipart) -> TestForm {
    let mut form = TestForm::default();
    if let Err(e) = read_fields(&mut multipart, &mut form).await {
        warn!(status = %e.status(), "Failed to read multipart data: {}", e);
        form.read_error = Some(if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            PlannerError::UploadTooLarge
        } else {
            PlannerError::UploadFailed(e.body_text())
        });
    }
    form
}

/// Add New Test form: field edits, study-guide upload and add-test.
///
/// Every failure, including an unreadable or oversized body, ends up in the
/// page's error banner.
#[utoipa::path(
    post,
    path = "/tests",
    request_body(
        content_type = "multipart/form-data",
        description = "Fields `name`, `date`, `study_guide` (PDF file) and `intent` (`upload` or `add`)."
    ),
    responses(
        (status = 303, description = "Draft updated or error recorded; the page should be reloaded"),
        (status = 400, description = "Not a multipart/form-data request")
    )
)]
pub async fn submit_test_form(
    State(app_state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Redirect {
    let form = read_test_form(multipart).await;

    // Extraction may suspend; the session lock is not held meanwhile.
    let extracted = match &form.study_guide {
        Some(file) => Some(extraction::extract_study_guide(app_state.extractor.as_ref(), file).await),
        None => None,
    };

    let mut session = app_state.session.write().await;
    if let Some(name) = form.name {
        session.set_draft_name(name);
    }
    if let Some(date) = form.date {
        session.set_draft_date(date);
    }
    if let Some(result) = extracted {
        session.apply_extraction(result);
    }
    if let Some(e) = form.read_error {
        session.record_error(&e);
        return Redirect::to("/");
    }
    if form.intent == Intent::Add && session.add_test() {
        info!(tests = session.tests().len(), "Test added.");
    }

    Redirect::to("/")
}

/// The Generate Study Plan form.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PlanForm {
    /// The completion API key. Left blank, the key already held for this session is reused.
    #[serde(default)]
    pub api_key: String,
}

/// Generate Study Plan form: stores the key and starts a generation in the background.
#[utoipa::path(
    post,
    path = "/plan",
    request_body(content_type = "application/x-www-form-urlencoded", content = PlanForm),
    responses(
        (status = 303, description = "Generation started or rejected; the page should be reloaded")
    )
)]
pub async fn request_plan_handler(
    State(app_state): State<Arc<AppState>>,
    Form(form): Form<PlanForm>,
) -> Redirect {
    let (tests, credential) = {
        let mut session = app_state.session.write().await;
        if !form.api_key.is_empty() {
            session.set_credential(Credential::new(form.api_key));
        }

        if let Err(e) = planner::check_preconditions(session.tests(), session.credential()) {
            session.record_error(&e);
            return Redirect::to("/");
        }

        session.begin_generation();
        (session.tests().to_vec(), session.credential().clone())
    };

    spawn_plan_generation(app_state.clone(), tests, credential);
    Redirect::to("/")
}
