use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from `TMDB_`-prefixed environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API read access token, sent as a bearer token
    pub api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Region whose watch providers are shown on movie cards
    #[serde(default = "default_watch_region")]
    pub watch_region: String,

    /// How long the search input must be stable before a fetch is issued
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Attach streaming provider info to every movie in a result page
    #[serde(default = "default_enrich_providers")]
    pub enrich_providers: bool,

    /// Maximum in-flight watch-provider requests per result page
    #[serde(default = "default_enrichment_concurrency")]
    pub enrichment_concurrency: usize,

    /// Per-request timeout for the shared HTTP client
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_watch_region() -> String {
    "HU".to_string()
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_enrich_providers() -> bool {
    true
}

fn default_enrichment_concurrency() -> usize {
    8
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::prefixed("TMDB_")
            .from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would leave the client unusable
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_key.trim().is_empty() {
            anyhow::bail!("TMDB_API_KEY must not be empty");
        }
        if self.enrichment_concurrency == 0 {
            anyhow::bail!("TMDB_ENRICHMENT_CONCURRENCY must be at least 1");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("TMDB_REQUEST_TIMEOUT_SECS must be at least 1");
        }
        Ok(())
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
