use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Shown once at startup when the credential is missing. Nothing else renders.
pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "Mistral API key not found in environment variables. Please check your .env file.";

/// Application-level error type.
///
/// Page handlers turn these into inline notices via [`AppError::user_message`];
/// other endpoints return them directly through `IntoResponse`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Mistral API key is not configured")]
    MissingCredential,

    #[error("Could not read PDF: {0}")]
    DocumentRead(String),

    #[error("Question generation failed: {0}")]
    Generation(#[from] LlmError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Fixed user-facing text for each error kind, rendered inline on the page.
    pub fn user_message(&self) -> String {
        match self {
            AppError::MissingCredential => MISSING_CREDENTIAL_MESSAGE.to_string(),
            AppError::DocumentRead(msg) => {
                format!("Error processing resume: could not read PDF ({msg})")
            }
            AppError::Generation(e) => format!("Error processing resume: {e}"),
            AppError::Validation(msg) => format!("Error processing resume: {msg}"),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Internal(_) => {
                "Error processing resume: an internal error occurred".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::MissingCredential => (
                StatusCode::SERVICE_UNAVAILABLE,
                "MISSING_CREDENTIAL",
                MISSING_CREDENTIAL_MESSAGE.to_string(),
            ),
            AppError::DocumentRead(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "DOCUMENT_READ_ERROR",
                msg.clone(),
            ),
            AppError::Generation(e) => {
                tracing::error!("Generation error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_ERROR",
                    e.to_string(),
                )
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
