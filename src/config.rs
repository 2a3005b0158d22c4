//! Configuration management

use anyhow::{Context, Result};

pub const DEFAULT_NAVER_BASE_URL: &str = "https://naveropenapi.apigw.ntruss.com";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Naver API gateway base URL
    pub naver_base_url: String,

    /// Naver API key id (optional, fallback-only mode without it)
    pub naver_client_id: Option<String>,

    /// Naver API key secret
    pub naver_client_secret: Option<String>,

    /// Master switch for the directions API
    pub naver_use: bool,

    /// Per-call directions request timeout in seconds
    pub directions_timeout_seconds: u64,

    /// Max in-flight directions calls while building the travel matrix
    pub matrix_concurrency: usize,

    /// Wall-clock budget for the tour solver in milliseconds
    pub solver_time_budget_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let naver_base_url = std::env::var("NAVER_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_NAVER_BASE_URL.to_string());

        // Empty credential strings count as absent.
        let naver_client_id = std::env::var("NAVER_CLIENT_ID")
            .ok()
            .filter(|v| !v.is_empty());
        let naver_client_secret = std::env::var("NAVER_CLIENT_SECRET")
            .ok()
            .filter(|v| !v.is_empty());

        let naver_use = std::env::var("NAVER_USE")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let directions_timeout_seconds = parse_env("DIRECTIONS_TIMEOUT_SECONDS", 10)?;
        let matrix_concurrency = parse_env("MATRIX_CONCURRENCY", 8)?;
        let solver_time_budget_ms = parse_env("SOLVER_TIME_BUDGET_MS", 3000)?;

        Ok(Self {
            naver_base_url,
            naver_client_id,
            naver_client_secret,
            naver_use,
            directions_timeout_seconds,
            matrix_concurrency,
            solver_time_budget_ms,
        })
    }

    /// Credentials for the directions API, present only when the enable flag
    /// is set and both key halves are configured.
    pub fn directions_credentials(&self) -> Option<(&str, &str)> {
        if !self.naver_use {
            return None;
        }
        match (&self.naver_client_id, &self.naver_client_secret) {
            (Some(id), Some(secret)) => Some((id, secret)),
            _ => None,
        }
    }

    pub fn directions_enabled(&self) -> bool {
        self.directions_credentials().is_some()
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{} must be a number (got '{}')", name, raw)),
        Err(_) => Ok(default),
    }
}
