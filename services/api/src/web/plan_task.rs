//! services/api/src/web/plan_task.rs
//!
//! The background worker for a single study-plan generation.

use crate::web::state::AppState;
use std::sync::Arc;
use study_planner_core::{domain::Credential, planner, PlannerError, TestEntry};
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

/// Issues one generation attempt on its own task and returns immediately.
///
/// The caller must already have marked the generation as outstanding. Attempts
/// are not serialized: whichever finishes last decides the shown plan and error.
/// There is no cancellation and no timeout.
pub fn spawn_plan_generation(app_state: Arc<AppState>, tests: Vec<TestEntry>, credential: Credential) {
    let generation_id = Uuid::new_v4();
    let span = info_span!("plan_generation", %generation_id, tests = tests.len());

    let worker_state = app_state.clone();
    let worker = tokio::spawn(
        async move {
            info!("Plan generation started.");
            let result =
                planner::generate_plan(worker_state.completion.as_ref(), &tests, &credential)
                    .await;
            let succeeded = result.is_ok();

            worker_state.session.write().await.apply_plan_result(result);
            info!(succeeded, "Plan generation finished.");
        }
        .instrument(span.clone()),
    );

    // The worker settles its own outcome. If it dies first, the outstanding
    // count must still come down or the page keeps refreshing.
    tokio::spawn(
        async move {
            if let Err(e) = worker.await {
                error!("Plan generation task aborted: {}", e);
                app_state
                    .session
                    .write()
                    .await
                    .apply_plan_result(Err(PlannerError::Api {
                        status: None,
                        detail: "Plan generation stopped unexpectedly".to_string(),
                    }));
            }
        }
        .instrument(span),
    );
}
