use serde::Deserialize;
use std::time::Duration;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key. Enrichment is disabled when unset or empty.
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// TMDB image CDN base URL (size token and path are appended)
    #[serde(default = "default_tmdb_image_url")]
    pub tmdb_image_url: String,

    /// Letterboxd site base URL
    #[serde(default = "default_letterboxd_url")]
    pub letterboxd_url: String,

    /// Delay between watchlist pages, in milliseconds
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,

    /// Per-request timeout for outbound HTTP calls, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// User-Agent sent on every outbound request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum number of metadata lookups in flight at once
    #[serde(default = "default_enrichment_concurrency")]
    pub enrichment_concurrency: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_letterboxd_url() -> String {
    "https://letterboxd.com".to_string()
}

fn default_page_delay_ms() -> u64 {
    500
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_enrichment_concurrency() -> usize {
    4
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        Ok(config.normalized())
    }

    /// Blank API keys count as absent; concurrency is at least one.
    fn normalized(mut self) -> Self {
        self.tmdb_api_key = self
            .tmdb_api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        self.enrichment_concurrency = self.enrichment_concurrency.max(1);
        self.letterboxd_url = self.letterboxd_url.trim_end_matches('/').to_string();
        self.tmdb_api_url = self.tmdb_api_url.trim_end_matches('/').to_string();
        self.tmdb_image_url = self.tmdb_image_url.trim_end_matches('/').to_string();
        self
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
