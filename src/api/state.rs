use std::sync::Arc;

use crate::{
    config::Config,
    error::AppResult,
    services::{
        assembler::ImageConfig,
        http::{HttpFetcher, ReqwestFetcher},
        letterboxd::LetterboxdClient,
        providers::{tmdb::TmdbProvider, DisabledProvider, MetadataProvider},
    },
};

/// Shared application state
///
/// Holds only immutable collaborators; every comparison request builds its
/// own working data.
#[derive(Clone)]
pub struct AppState {
    pub letterboxd: LetterboxdClient,
    pub metadata: Arc<dyn MetadataProvider>,
    pub images: ImageConfig,
    pub enrichment_concurrency: usize,
}

impl AppState {
    /// Wires the scraper and metadata provider from configuration
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let fetcher: Arc<dyn HttpFetcher> = Arc::new(ReqwestFetcher::new(
            &config.user_agent,
            config.request_timeout(),
        )?);

        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Same as [`AppState::from_config`] but with a caller-supplied fetcher
    pub fn with_fetcher(config: &Config, fetcher: Arc<dyn HttpFetcher>) -> Self {
        let metadata: Arc<dyn MetadataProvider> = match &config.tmdb_api_key {
            Some(api_key) => Arc::new(TmdbProvider::new(
                fetcher.clone(),
                api_key.clone(),
                config.tmdb_api_url.clone(),
            )),
            None => {
                tracing::warn!("TMDB_API_KEY not set; metadata enrichment disabled");
                Arc::new(DisabledProvider)
            }
        };

        Self {
            letterboxd: LetterboxdClient::new(
                fetcher,
                config.letterboxd_url.clone(),
                config.page_delay(),
            ),
            metadata,
            images: ImageConfig::new(config.tmdb_image_url.clone()),
            enrichment_concurrency: config.enrichment_concurrency.max(1),
        }
    }
}
