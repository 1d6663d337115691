//! services/api/src/web/rest.rs
//!
//! Contains the JSON endpoints and the master definition for the OpenAPI
//! specification.

use crate::web::{form, state::AppState};
use axum::{extract::State, response::Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use study_planner_core::store::SessionState;
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        form::submit_test_form,
        form::request_plan_handler,
        state_handler,
        health_handler,
    ),
    components(
        schemas(StateResponse, TestSummary, DraftSummary, form::PlanForm)
    ),
    tags(
        (name = "Study Planner API", description = "Form endpoints and read model for the study planner.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response Structs
//=========================================================================================

/// One added test, without its study-guide text.
#[derive(Debug, Serialize, ToSchema)]
pub struct TestSummary {
    pub name: String,
    pub date: String,
    pub study_guide_chars: usize,
    pub added_at: DateTime<Utc>,
}

/// The in-progress draft. Only whether a study guide is loaded is reported.
#[derive(Debug, Serialize, ToSchema)]
pub struct DraftSummary {
    pub name: String,
    pub date: String,
    pub study_guide_loaded: bool,
}

/// A read-only snapshot of the session. The credential is reduced to a flag.
#[derive(Debug, Serialize, ToSchema)]
pub struct StateResponse {
    pub tests: Vec<TestSummary>,
    pub draft: DraftSummary,
    pub credential_set: bool,
    pub study_plan: Option<String>,
    pub error: Option<String>,
    pub pending_generations: usize,
}

impl From<&SessionState> for StateResponse {
    fn from(session: &SessionState) -> Self {
        let draft = session.draft();
        Self {
            tests: session
                .tests()
                .iter()
                .map(|test| TestSummary {
                    name: test.name.clone(),
                    date: test.date.clone(),
                    study_guide_chars: test.study_guide.chars().count(),
                    added_at: test.added_at,
                })
                .collect(),
            draft: DraftSummary {
                name: draft.name.clone(),
                date: draft.date.clone(),
                study_guide_loaded: !draft.study_guide.is_empty(),
            },
            credential_set: !session.credential().is_empty(),
            study_plan: session.study_plan().map(str::to_string),
            error: session.error_message().map(str::to_string),
            pending_generations: session.pending_generations(),
        }
    }
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Current session state.
#[utoipa::path(
    get,
    path = "/api/state",
    responses(
        (status = 200, description = "Snapshot of the planning session", body = StateResponse)
    )
)]
pub async fn state_handler(State(app_state): State<Arc<AppState>>) -> Json<StateResponse> {
    let session = app_state.session.read().await;
    Json(StateResponse::from(&*session))
}

/// Liveness check.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "The service is running"))
)]
pub async fn health_handler() -> &'static str {
    "ok"
}
