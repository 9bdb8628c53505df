use anyhow::{Context, Result};

const DEFAULT_MISTRAL_API_BASE: &str = "https://api.mistral.ai/v1";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_SESSION_IDLE_MINUTES: u64 = 60;

/// Application configuration loaded from environment variables.
///
/// The LLM credential is optional here: a missing key must not stop the
/// process, it only disables generation (see `AppState::generator`).
#[derive(Debug, Clone)]
pub struct Config {
    pub mistral_api_key: Option<String>,
    pub mistral_api_base: String,
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub session_idle_minutes: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            mistral_api_key: optional_env("MISTRAL_API_KEY"),
            mistral_api_base: optional_env("MISTRAL_API_BASE")
                .unwrap_or_else(|| DEFAULT_MISTRAL_API_BASE.to_string()),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            session_idle_minutes: parse_env("SESSION_IDLE_MINUTES", DEFAULT_SESSION_IDLE_MINUTES)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mistral_api_key: None,
            mistral_api_base: DEFAULT_MISTRAL_API_BASE.to_string(),
            port: 8080,
            rust_log: "info".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            session_idle_minutes: DEFAULT_SESSION_IDLE_MINUTES,
        }
    }
}

/// Unset and blank values are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
