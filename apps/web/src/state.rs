use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::errors::AppError;
use crate::questions::QuestionGenerator;
use crate::session::SessionStore;
use crate::ui::PageRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// `None` when no credential is configured; the UI then only shows the
    /// missing-credential message and never offers generation.
    pub generator: Option<Arc<QuestionGenerator>>,
    pub sessions: SessionStore,
    pub pages: PageRenderer,
}

impl AppState {
    pub fn new(config: Config, generator: Option<QuestionGenerator>) -> Result<Self, AppError> {
        let idle = Duration::from_secs(config.session_idle_minutes.saturating_mul(60));
        Ok(Self {
            config,
            generator: generator.map(Arc::new),
            sessions: SessionStore::new(idle),
            pages: PageRenderer::new()?,
        })
    }

    pub fn generator(&self) -> Result<&QuestionGenerator, AppError> {
        self.generator.as_deref().ok_or(AppError::MissingCredential)
    }
}
