//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{OpenAiCompletionClient, PdfTextExtractor},
    config::Config,
    error::ApiError,
    web::{self, AppState},
};
use axum::http::{
    header::{ACCEPT, CONTENT_TYPE},
    Method,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize Service Adapters ---
    let http_client = reqwest::Client::builder().build()?;
    let completion = Arc::new(OpenAiCompletionClient::new(
        http_client,
        config.completion_url.clone(),
        config.plan_model.clone(),
    ));
    let extractor = Arc::new(PdfTextExtractor::new());
    info!(
        model = %config.plan_model,
        endpoint = %config.completion_url,
        "Completion client ready"
    );

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState::new(config.clone(), extractor, completion));

    // --- 4. Create the Web Router ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT]);
    let app = web::router(app_state).layer(cors);

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
