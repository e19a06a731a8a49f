//! Configuration loading from environment.

use std::env;
use std::time::Duration;

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub biller_base_url: String,
    pub biller_timeout: Duration,
    pub seed_demo_data: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()?;

        let biller_base_url = env::var("BILLER_BASE_URL")
            .map_err(|_| anyhow::anyhow!("BILLER_BASE_URL environment variable is required"))?;

        let biller_timeout_ms: u64 = env::var("BILLER_TIMEOUT_MS")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()?;

        let seed_demo_data = env::var("SEED_DEMO_DATA")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            port,
            biller_base_url,
            biller_timeout: Duration::from_millis(biller_timeout_ms),
            seed_demo_data,
        })
    }
}
