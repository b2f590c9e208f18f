use futures::stream::{self, StreamExt};
use std::collections::{HashMap, HashSet};

use crate::{
    api::AppState,
    error::{AppError, AppResult},
    models::{ComparisonResult, MovieOwner, Watchlist},
    services::{aggregator, assembler, orchestrator},
};

/// Splits raw input on commas and whitespace, keeping the first occurrence
/// of each name. Names are case-sensitive.
pub fn parse_usernames(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();

    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Runs a full comparison: resolve profiles, crawl watchlists, intersect,
/// enrich and assemble.
///
/// Fails with the first user (in request order) whose profile or watchlist
/// could not be retrieved. Enrichment never fails the request.
pub async fn compare_watchlists(
    state: &AppState,
    raw_usernames: &str,
) -> AppResult<ComparisonResult> {
    let usernames = parse_usernames(raw_usernames);
    if usernames.is_empty() {
        return Err(AppError::InvalidInput(
            "At least one username is required".to_string(),
        ));
    }

    // Profiles are checked one at a time; the first miss stops everything.
    let mut avatars = HashMap::with_capacity(usernames.len());
    for username in &usernames {
        let avatar = state.letterboxd.resolve_avatar(username).await?;
        avatars.insert(username.clone(), avatar);
    }

    let mut crawled = orchestrator::crawl_watchlists(&state.letterboxd, &usernames).await;

    let mut watchlists: Vec<(String, Watchlist)> = Vec::with_capacity(usernames.len());
    for username in &usernames {
        match crawled.remove(username) {
            Some(Ok(watchlist)) if !watchlist.is_empty() => {
                watchlists.push((username.clone(), watchlist));
            }
            _ => return Err(AppError::WatchlistUnavailable(username.clone())),
        }
    }

    let index = aggregator::aggregate(watchlists.iter().map(|(name, list)| (name, list)));
    let total_titles = index.len();
    let shared = aggregator::shared_titles(index);

    tracing::info!(
        users = usernames.len(),
        total_titles = total_titles,
        shared_titles = shared.len(),
        provider = state.metadata.name(),
        "Enriching shared titles"
    );

    let metadata = state.metadata.clone();
    let enriched: Vec<_> = stream::iter(shared)
        .map(|entry| {
            let metadata = metadata.clone();
            async move {
                let details = metadata.lookup(&entry.title).await;
                (entry, details)
            }
        })
        .buffer_unordered(state.enrichment_concurrency.max(1))
        .collect()
        .await;

    let movies = assembler::assemble(&state.images, enriched, &avatars);

    let users = usernames
        .into_iter()
        .map(|name| MovieOwner {
            avatar: avatars.get(&name).cloned(),
            name,
        })
        .collect();

    Ok(ComparisonResult { movies, users })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::MovieMetadata,
        services::{
            assembler::ImageConfig,
            http::MockHttpFetcher,
            letterboxd::LetterboxdClient,
            providers::{MetadataProvider, MockMetadataProvider},
        },
    };
    use std::{sync::Arc, time::Duration};

    const BASE: &str = "https://letterboxd.com";

    fn profile(name: &str) -> String {
        format!(r#"<meta property="og:image" content="https://img/{name}.jpg">"#)
    }

    fn watchlist_page(titles: &[&str]) -> String {
        let cards: String = titles
            .iter()
            .map(|t| {
                format!(
                    r#"<li class="poster-container"><div class="film-poster" data-target-link="/film/{t}/"><img alt="{t}"/></div></li>"#
                )
            })
            .collect();
        format!("<ul>{cards}</ul>")
    }

    /// Serves profiles for everyone and watchlists from `lists`
    fn site(lists: Vec<(&'static str, Vec<&'static str>)>) -> MockHttpFetcher {
        let lists: HashMap<String, Vec<&'static str>> = lists
            .into_iter()
            .map(|(user, titles)| (user.to_string(), titles))
            .collect();

        let mut fetcher = MockHttpFetcher::new();
        fetcher.expect_get_text().returning(move |url, _| {
            let path = url.trim_start_matches(BASE).trim_matches('/');
            let mut parts = path.split('/');
            let user = parts.next().unwrap_or_default();
            match parts.next() {
                None => Ok(profile(user)),
                Some("watchlist") => lists
                    .get(user)
                    .map(|titles| watchlist_page(titles))
                    .ok_or_else(|| AppError::ExternalApi(format!("{} returned status 404", url))),
                Some(_) => Err(AppError::ExternalApi("unexpected".to_string())),
            }
        });
        fetcher
    }

    fn state(fetcher: MockHttpFetcher, metadata: Arc<dyn MetadataProvider>) -> AppState {
        AppState {
            letterboxd: LetterboxdClient::new(Arc::new(fetcher), BASE.to_string(), Duration::ZERO),
            metadata,
            images: ImageConfig::default(),
            enrichment_concurrency: 2,
        }
    }

    #[test]
    fn test_parse_usernames() {
        assert_eq!(
            parse_usernames(" alice, bob\ncarol  alice,,Bob "),
            vec!["alice", "bob", "carol", "Bob"]
        );
        assert!(parse_usernames(" , \t").is_empty());
    }

    #[tokio::test]
    async fn test_compare_returns_only_shared_titles() {
        let fetcher = site(vec![
            ("A", vec!["Movie X", "Movie Y"]),
            ("B", vec!["Movie X", "Movie Z"]),
            ("C", vec!["Movie X"]),
        ]);
        let mut metadata = MockMetadataProvider::new();
        metadata.expect_name().return_const("mock");
        metadata
            .expect_lookup()
            .withf(|title| title == "Movie X")
            .times(1)
            .returning(|_| MovieMetadata::default());

        let result = compare_watchlists(&state(fetcher, Arc::new(metadata)), "A B C")
            .await
            .unwrap();

        assert_eq!(result.movies.len(), 1);
        let movie = &result.movies[0];
        assert_eq!(movie.title, "Movie X");
        assert_eq!(movie.count, 3);
        let owners: Vec<&str> = movie.users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(owners, vec!["A", "B", "C"]);
        assert_eq!(movie.formatted_rating, "N/A");
        assert_eq!(movie.formatted_runtime, "");
        assert!(movie.poster_url.contains("placehold.co"));

        let users: Vec<&str> = result.users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(users, vec!["A", "B", "C"]);
        assert_eq!(result.users[0].avatar.as_deref(), Some("https://img/A.jpg"));
    }

    #[tokio::test]
    async fn test_compare_sorts_by_count_then_rating() {
        let fetcher = site(vec![
            ("a", vec!["Pair Low", "Pair High", "Trio"]),
            ("b", vec!["Pair Low", "Pair High", "Trio"]),
            ("c", vec!["Trio"]),
        ]);
        let mut metadata = MockMetadataProvider::new();
        metadata.expect_name().return_const("mock");
        metadata.expect_lookup().returning(|title| MovieMetadata {
            rating: match title {
                "Pair High" => 8.5,
                "Pair Low" => 6.0,
                _ => 1.0,
            },
            tmdb_id: Some(1),
            ..MovieMetadata::default()
        });

        let result = compare_watchlists(&state(fetcher, Arc::new(metadata)), "a,b,c")
            .await
            .unwrap();

        let titles: Vec<&str> = result.movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Trio", "Pair High", "Pair Low"]);
    }

    #[tokio::test]
    async fn test_compare_rejects_empty_input() {
        let result = compare_watchlists(
            &state(MockHttpFetcher::new(), Arc::new(MockMetadataProvider::new())),
            "  ,, ",
        )
        .await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_compare_stops_at_missing_profile() {
        let mut fetcher = MockHttpFetcher::new();
        fetcher
            .expect_get_text()
            .withf(|url, _| url == "https://letterboxd.com/alice/")
            .times(1)
            .returning(|_, _| Ok(profile("alice")));
        fetcher
            .expect_get_text()
            .withf(|url, _| url == "https://letterboxd.com/ghost/")
            .times(1)
            .returning(|_, _| Err(AppError::ExternalApi("status 404".to_string())));

        let result = compare_watchlists(
            &state(fetcher, Arc::new(MockMetadataProvider::new())),
            "alice ghost carol",
        )
        .await;

        assert!(matches!(result, Err(AppError::ProfileNotFound(name)) if name == "ghost"));
    }

    #[tokio::test]
    async fn test_compare_reports_unavailable_watchlist() {
        let fetcher = site(vec![("alice", vec!["Heat"]), ("carol", vec![])]);

        let result = compare_watchlists(
            &state(fetcher, Arc::new(MockMetadataProvider::new())),
            "alice bob carol",
        )
        .await;

        assert!(matches!(result, Err(AppError::WatchlistUnavailable(name)) if name == "bob"));
    }

    #[tokio::test]
    async fn test_compare_treats_empty_watchlist_as_unavailable() {
        let fetcher = site(vec![("alice", vec!["Heat"]), ("carol", vec![])]);

        let result = compare_watchlists(
            &state(fetcher, Arc::new(MockMetadataProvider::new())),
            "alice carol",
        )
        .await;

        assert!(matches!(result, Err(AppError::WatchlistUnavailable(name)) if name == "carol"));
    }
}
