use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::scoring::engine::AtsScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Generative backend for the narrative analysis. Gemini in production, a stub in tests.
    pub llm: Arc<dyn TextGenerator>,
    /// Heuristic scorer. Owns the role → skill generator and its LRU cache.
    pub scorer: Arc<AtsScorer>,
}
