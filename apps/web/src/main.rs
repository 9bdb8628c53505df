mod config;
mod document;
mod errors;
mod llm_client;
mod questions;
mod routes;
mod session;
mod state;
mod ui;

#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::questions::QuestionGenerator;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Help Hire v{}", env!("CARGO_PKG_VERSION"));

    // The credential is resolved once here; without it the UI only explains what is missing.
    let generator = match &config.mistral_api_key {
        Some(api_key) => {
            let llm = LlmClient::new(api_key.clone(), &config.mistral_api_base)
                .context("Failed to build HTTP client for the LLM API")?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(QuestionGenerator::new(Arc::new(llm)))
        }
        None => {
            warn!("MISTRAL_API_KEY is not set; question generation is disabled");
            None
        }
    };

    let state = AppState::new(config.clone(), generator)
        .context("Failed to initialize page templates")?;

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
