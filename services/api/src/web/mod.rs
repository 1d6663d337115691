pub mod form;
pub mod plan_task;
pub mod rest;
pub mod state;
pub mod view;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use form::{request_plan_handler, submit_test_form};
pub use rest::{health_handler, state_handler, ApiDoc};
pub use state::AppState;
pub use view::index_handler;

/// Builds the complete router: the page, its form endpoints, the JSON read
/// model and the Swagger UI.
pub fn router(app_state: Arc<AppState>) -> Router {
    let max_upload_bytes = app_state.config.max_upload_bytes;

    let app_router = Router::new()
        .route("/", get(index_handler))
        .route("/tests", post(submit_test_form))
        .route("/plan", post(request_plan_handler))
        .route("/api/state", get(state_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(app_state);

    Router::new()
        .merge(app_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
