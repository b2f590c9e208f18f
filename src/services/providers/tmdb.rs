/// TMDB metadata provider
///
/// API Flow:
/// 1. Search: /search/movie?query=&year= → first result's TMDB ID
/// 2. Details: /movie/{id}?append_to_response=credits,images → rating, credits, artwork
///
/// A trailing "(YYYY)" on the scraped title becomes the `year` filter and is
/// removed from the query text.
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{
        tmdb::{TmdbImage, TmdbMovieDetails, TmdbSearchResponse, TmdbSearchResult},
        MovieMetadata, Person,
    },
    services::{http::HttpFetcher, providers::MetadataProvider},
};

const CAST_LIMIT: usize = 5;
const DIRECTOR_JOB: &str = "Director";
const ENGLISH: &str = "en";
const NO_LANGUAGE: &str = "xx";

#[derive(Clone)]
pub struct TmdbProvider {
    fetcher: Arc<dyn HttpFetcher>,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(fetcher: Arc<dyn HttpFetcher>, api_key: String, api_url: String) -> Self {
        Self {
            fetcher,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the first search hit, if any
    async fn search(
        &self,
        query: &str,
        year: Option<u16>,
    ) -> AppResult<Option<TmdbSearchResult>> {
        let url = format!("{}/search/movie", self.api_url);

        let mut params = vec![
            ("api_key".to_string(), self.api_key.clone()),
            ("query".to_string(), query.to_string()),
        ];
        if let Some(year) = year {
            params.push(("year".to_string(), year.to_string()));
        }

        let body = self.fetcher.get_text(&url, &params).await?;
        let search: TmdbSearchResponse = serde_json::from_str(&body)?;

        Ok(search.results.into_iter().next())
    }

    async fn details(&self, movie_id: u64) -> AppResult<TmdbMovieDetails> {
        let url = format!("{}/movie/{}", self.api_url, movie_id);
        let params = [
            ("api_key".to_string(), self.api_key.clone()),
            ("append_to_response".to_string(), "credits,images".to_string()),
        ];

        let body = self.fetcher.get_text(&url, &params).await?;
        let details: TmdbMovieDetails = serde_json::from_str(&body).map_err(|e| {
            tracing::debug!(movie_id = movie_id, error = %e, "Malformed TMDB details payload");
            e
        })?;

        Ok(details)
    }

    async fn fetch_metadata(&self, title: &str) -> AppResult<MovieMetadata> {
        let (query, year) = split_release_year(title);

        let Some(hit) = self.search(query, year).await? else {
            tracing::debug!(title = %title, "No TMDB search results");
            return Ok(MovieMetadata::default());
        };

        let details = self.details(hit.id).await?;

        tracing::debug!(
            title = %title,
            tmdb_id = hit.id,
            matched_title = hit.title.as_deref().unwrap_or_default(),
            matched_release_date = hit.release_date.as_deref().unwrap_or_default(),
            provider = "tmdb",
            "Metadata fetched"
        );

        Ok(into_metadata(details))
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn lookup(&self, title: &str) -> MovieMetadata {
        match self.fetch_metadata(title).await {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!(title = %title, error = %e, provider = "tmdb", "Could not fetch TMDB details");
                MovieMetadata::default()
            }
        }
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

/// Splits a trailing parenthesized four-digit year off a title.
///
/// `"Heat (1995)"` becomes `("Heat", Some(1995))`; anything else is returned
/// unchanged with no year. A `(0000)` suffix is stripped but gives no year.
pub fn split_release_year(title: &str) -> (&str, Option<u16>) {
    let parsed = title.strip_suffix(')').and_then(|rest| {
        let open = rest.rfind('(')?;
        let digits = &rest[open + 1..];
        if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let query = rest[..open].trim();
        if query.is_empty() {
            return None;
        }
        let year: u16 = digits.parse().ok()?;
        Some((query, (year != 0).then_some(year)))
    });

    parsed.unwrap_or((title, None))
}

/// Picks the English logo, else the first language-neutral one
pub fn select_logo(logos: &[TmdbImage]) -> Option<String> {
    let mut fallback: Option<&str> = None;

    for logo in logos {
        match logo.iso_639_1.as_deref() {
            Some(ENGLISH) => return Some(logo.file_path.clone()),
            None | Some(NO_LANGUAGE) if fallback.is_none() => {
                fallback = Some(logo.file_path.as_str());
            }
            _ => {}
        }
    }

    fallback.map(str::to_string)
}

fn into_metadata(details: TmdbMovieDetails) -> MovieMetadata {
    let credits = details.credits.unwrap_or_default();

    let director = credits
        .crew
        .iter()
        .find(|member| member.job.as_deref() == Some(DIRECTOR_JOB))
        .map(|member| Person {
            name: member.name.clone(),
            id: Some(member.id),
        })
        .unwrap_or_else(Person::unknown);

    let cast = credits
        .cast
        .into_iter()
        .take(CAST_LIMIT)
        .map(|actor| Person {
            name: actor.name,
            id: Some(actor.id),
        })
        .collect();

    let logo_path = details
        .images
        .as_ref()
        .and_then(|images| select_logo(&images.logos));

    MovieMetadata {
        rating: details.vote_average.unwrap_or(0.0),
        runtime: details.runtime.unwrap_or(0),
        genres: details.genres.into_iter().map(|genre| genre.name).collect(),
        poster_path: details.poster_path.filter(|p| !p.is_empty()),
        backdrop_path: details.backdrop_path.filter(|p| !p.is_empty()),
        logo_path,
        release_date: details.release_date.filter(|d| !d.is_empty()),
        overview: details.overview.unwrap_or_default(),
        director,
        cast,
        imdb_id: details.imdb_id.filter(|id| !id.is_empty()),
        tmdb_id: Some(details.id),
    }
}
