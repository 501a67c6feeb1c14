use anyhow::{Context, Result};

use crate::llm_client::{DEFAULT_BASE_URL, DEFAULT_MODEL};

const DEFAULT_REQUEST_DELAY_MS: u64 = 500;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Analyzer configuration loaded from environment variables.
/// `from_env` fails if the service credential is missing; the run must not start without it.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub request_delay_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            openai_api_key: lookup("OPENAI_API_KEY")
                .filter(|v| !v.trim().is_empty())
                .context(
                    "Required environment variable 'OPENAI_API_KEY' is not set \
                     (example: export OPENAI_API_KEY='your-api-key')",
                )?,
            openai_base_url: lookup("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            openai_model: lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            request_delay_ms: lookup("REQUEST_DELAY_MS")
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("REQUEST_DELAY_MS must be a whole number of milliseconds")?
                .unwrap_or(DEFAULT_REQUEST_DELAY_MS),
        })
    }
}

/// Loads `.env` if present; ignored if missing.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Filter directive used when `RUST_LOG` is unset or unparseable.
pub fn fallback_log_directive() -> String {
    format!("{}={DEFAULT_LOG_LEVEL}", env!("CARGO_PKG_NAME"))
}
