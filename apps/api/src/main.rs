mod analysis;
mod config;
mod errors;
mod extraction;
mod job_links;
mod llm_client;
mod motivation;
mod report;
mod routes;
mod scoring;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{GeminiClient, TextGenerator};
use crate::routes::build_router;
use crate::scoring::cache::SkillCache;
use crate::scoring::engine::AtsScorer;
use crate::scoring::role_skills::RoleSkillGenerator;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResumeOps API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let gemini = GeminiClient::new(
        config.google_api_key.clone(),
        config.gemini_api_base.clone(),
        config.gemini_model.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )?;
    info!("LLM client initialized (model: {})", gemini.model());
    let llm: Arc<dyn TextGenerator> = Arc::new(gemini);

    // Role → skill cache, shared by every scoring request
    let cache = Arc::new(SkillCache::new(config.skill_cache_capacity));
    info!("Skill cache capacity: {} roles", cache.capacity());
    let scorer = Arc::new(AtsScorer::new(RoleSkillGenerator::new(llm.clone(), cache)));

    let state = AppState {
        config: config.clone(),
        llm,
        scorer,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
