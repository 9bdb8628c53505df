pub mod health;
pub mod pages;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(pages::handle_index))
        .route("/generate", post(pages::handle_generate))
        .route("/download", get(pages::handle_download))
        .route("/health", get(health::health_handler))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
