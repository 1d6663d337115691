//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use std::sync::Arc;
use study_planner_core::{
    ports::{CompletionService, TextExtractionService},
    store::SessionState,
};
use tokio::sync::RwLock;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// The one planning session this process serves.
    pub session: Arc<RwLock<SessionState>>,
    pub extractor: Arc<dyn TextExtractionService>,
    pub completion: Arc<dyn CompletionService>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        extractor: Arc<dyn TextExtractionService>,
        completion: Arc<dyn CompletionService>,
    ) -> Self {
        Self {
            config,
            session: Arc::new(RwLock::new(SessionState::new())),
            extractor,
            completion,
        }
    }
}
