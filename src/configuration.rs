use std::time::Duration;

use anyhow::Context;
use secrecy::Secret;

/// Runtime settings, read from the environment once at startup.
#[derive(Clone)]
pub struct Settings {
    pub database_url: String,
    pub listen_address: String,
    pub search_base_url: String,
    pub summarizer_api_url: String,
    pub summarizer_api_key: Secret<String>,
    pub summarizer_model: String,
    pub fetch_timeout: Duration,
    pub enrich_concurrency: usize,
    pub refresh_schedule: String,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is required")?;

        Ok(Settings {
            database_url,
            listen_address: format!("0.0.0.0:{}", env_or("PORT", "8000")),
            search_base_url: env_or("SEARCH_BASE_URL", "https://www.bing.com"),
            summarizer_api_url: env_or(
                "OPENAI_API_URL",
                "https://api.openai.com/v1/chat/completions",
            ),
            summarizer_api_key: Secret::new(
                std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            ),
            summarizer_model: env_or("OPENAI_MODEL", "gpt-4o-mini"),
            fetch_timeout: Duration::from_secs(parse_or("FETCH_TIMEOUT_SECONDS", 10)),
            enrich_concurrency: parse_or("ENRICH_CONCURRENCY", 5) as usize,
            refresh_schedule: env_or("REFRESH_CRON", "0 * * * * *"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_or(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
