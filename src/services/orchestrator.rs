use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::Watchlist,
    services::letterboxd::LetterboxdClient,
};

/// Crawls every user's watchlist in parallel.
///
/// All crawls are spawned before any is awaited, and every one is awaited
/// even if an earlier one failed. Each task returns its own result through its
/// join handle, so there is no shared state to guard.
pub async fn crawl_watchlists(
    client: &LetterboxdClient,
    usernames: &[String],
) -> HashMap<String, AppResult<Watchlist>> {
    tracing::info!(user_count = usernames.len(), "Crawling watchlists");

    let mut tasks = Vec::with_capacity(usernames.len());

    for username in usernames {
        let client = client.clone();
        let name = username.clone();
        let task = tokio::spawn(async move { client.fetch_watchlist(&name).await });
        tasks.push((username.clone(), task));
    }

    let mut results = HashMap::with_capacity(tasks.len());
    let mut failures = 0usize;

    for (username, task) in tasks {
        let outcome = match task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(username = %username, error = %e, "Task join error");
                Err(AppError::Internal(e.to_string()))
            }
        };
        if outcome.is_err() {
            failures += 1;
        }
        results.insert(username, outcome);
    }

    if failures > 0 {
        tracing::warn!(
            success_count = results.len() - failures,
            error_count = failures,
            "Partial watchlist crawl failure"
        );
    }

    results
}
