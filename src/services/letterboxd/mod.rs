/// Letterboxd scraper
///
/// Resolves profile avatars and crawls public watchlists by following the
/// "next" pagination link until a page has no poster cards or no next link.
use std::{sync::Arc, time::Duration};

use crate::{
    error::{AppError, AppResult},
    models::Watchlist,
    services::http::HttpFetcher,
};

pub mod parser;

use parser::{parse_avatar, parse_watchlist_page};

#[derive(Clone)]
pub struct LetterboxdClient {
    fetcher: Arc<dyn HttpFetcher>,
    base_url: String,
    page_delay: Duration,
}

impl LetterboxdClient {
    pub fn new(fetcher: Arc<dyn HttpFetcher>, base_url: String, page_delay: Duration) -> Self {
        Self {
            fetcher,
            base_url: base_url.trim_end_matches('/').to_string(),
            page_delay,
        }
    }

    pub fn profile_url(&self, username: &str) -> String {
        format!("{}/{}/", self.base_url, username)
    }

    pub fn watchlist_url(&self, username: &str) -> String {
        format!("{}/{}/watchlist/", self.base_url, username)
    }

    /// Fetches the profile page and returns the `og:image` avatar URL.
    ///
    /// Network failures, non-2xx responses and a missing tag all map to
    /// [`AppError::ProfileNotFound`].
    pub async fn resolve_avatar(&self, username: &str) -> AppResult<String> {
        let html = self
            .fetcher
            .get_text(&self.profile_url(username), &[])
            .await
            .map_err(|e| {
                tracing::warn!(username = %username, error = %e, "Could not fetch profile");
                AppError::ProfileNotFound(username.to_string())
            })?;

        parse_avatar(&html)?.ok_or_else(|| {
            tracing::warn!(username = %username, "Profile has no avatar tag");
            AppError::ProfileNotFound(username.to_string())
        })
    }

    /// Crawls every page of a user's watchlist.
    ///
    /// A failure on any page discards what was already collected.
    pub async fn fetch_watchlist(&self, username: &str) -> AppResult<Watchlist> {
        let mut watchlist = Watchlist::new();
        let mut page_url = Some(self.watchlist_url(username));
        let mut page = 0usize;

        while let Some(url) = page_url.take() {
            page += 1;
            let html = self.fetcher.get_text(&url, &[]).await.map_err(|e| {
                tracing::warn!(
                    username = %username,
                    page = page,
                    error = %e,
                    "Watchlist page fetch failed"
                );
                e
            })?;

            let parsed = parse_watchlist_page(&html, &self.base_url)?;
            if parsed.entries.is_empty() {
                break;
            }

            tracing::debug!(
                username = %username,
                page = page,
                entries = parsed.entries.len(),
                "Watchlist page scraped"
            );
            watchlist.extend(parsed.entries);

            if let Some(next) = parsed.next_page {
                tokio::time::sleep(self.page_delay).await;
                page_url = Some(next);
            }
        }

        tracing::info!(
            username = %username,
            pages = page,
            entries = watchlist.len(),
            "Watchlist crawl completed"
        );

        Ok(watchlist)
    }
}
