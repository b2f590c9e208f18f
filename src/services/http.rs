/// Outbound HTTP seam shared by the scraper and the metadata provider.
///
/// Everything that talks to the network goes through [`HttpFetcher`], so the
/// crawler and the TMDB provider can be exercised against canned responses.
use crate::error::{AppError, AppResult};
use reqwest::Client as HttpClient;
use std::time::Duration;

/// Fetches a URL and returns the response body as text
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait HttpFetcher: Send + Sync {
    /// GET `url` with the given query parameters.
    ///
    /// Transport failures and non-2xx statuses are errors.
    async fn get_text(&self, url: &str, query: &[(String, String)]) -> AppResult<String>;
}

/// [`HttpFetcher`] backed by a shared `reqwest` client
#[derive(Clone)]
pub struct ReqwestFetcher {
    http_client: HttpClient,
}

impl ReqwestFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self { http_client })
    }
}

#[async_trait::async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn get_text(&self, url: &str, query: &[(String, String)]) -> AppResult<String> {
        let response = self.http_client.get(url).query(query).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::debug!(url = %url, status = %status, "Upstream returned non-success status");
            return Err(AppError::ExternalApi(format!(
                "{} returned status {}",
                url, status
            )));
        }

        Ok(response.text().await?)
    }
}
