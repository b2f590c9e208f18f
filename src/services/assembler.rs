use std::collections::HashMap;

use crate::models::{AggregateEntry, MovieMetadata, MovieOwner, ProcessedMovie};

const PLACEHOLDER_POSTER: &str = "https://placehold.co/500x750/2c2f33/e94b3c?text=No+Poster";
const UNKNOWN_RELEASE_DATE: &str = "0000-00-00";
const UNKNOWN_RELEASE_YEAR: &str = "----";
const NO_OVERVIEW: &str = "No overview available.";

/// How image paths are turned into displayable URLs
#[derive(Debug, Clone)]
pub struct ImageConfig {
    pub base_url: String,
    pub poster_size: String,
    pub backdrop_size: String,
    pub logo_size: String,
    pub placeholder_poster: String,
}

impl ImageConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            poster_size: "w500".to_string(),
            backdrop_size: "original".to_string(),
            logo_size: "original".to_string(),
            placeholder_poster: PLACEHOLDER_POSTER.to_string(),
        }
    }

    fn url(&self, size: &str, path: Option<&str>) -> Option<String> {
        path.filter(|p| !p.is_empty())
            .map(|p| format!("{}/{}{}", self.base_url, size, p))
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self::new("https://image.tmdb.org/t/p")
    }
}

pub fn format_rating(rating: f64) -> String {
    if rating > 0.0 {
        format!("{:.1}", rating)
    } else {
        "N/A".to_string()
    }
}

pub fn format_runtime(runtime: u32) -> String {
    if runtime > 0 {
        format!("{} min", runtime)
    } else {
        String::new()
    }
}

/// Year component of a `YYYY-MM-DD` date
pub fn release_year(release_date: Option<&str>) -> String {
    release_date
        .and_then(|date| date.split('-').next())
        .filter(|year| !year.is_empty())
        .unwrap_or(UNKNOWN_RELEASE_YEAR)
        .to_string()
}

/// Builds the display record for one shared title
pub fn process_movie(
    images: &ImageConfig,
    entry: AggregateEntry,
    metadata: MovieMetadata,
    avatars: &HashMap<String, String>,
) -> ProcessedMovie {
    let poster_url = images
        .url(&images.poster_size, metadata.poster_path.as_deref())
        .unwrap_or_else(|| images.placeholder_poster.clone());
    let backdrop_url = images
        .url(&images.backdrop_size, metadata.backdrop_path.as_deref())
        .unwrap_or_else(|| poster_url.clone());
    let logo_url = images
        .url(&images.logo_size, metadata.logo_path.as_deref())
        .unwrap_or_default();

    let overview = match metadata.overview.trim() {
        "" => NO_OVERVIEW.to_string(),
        text => text.to_string(),
    };

    let count = entry.count();

    // BTreeSet iteration is already lexicographic
    let users = entry
        .owners
        .into_iter()
        .map(|name| MovieOwner {
            avatar: avatars.get(&name).cloned(),
            name,
        })
        .collect();

    ProcessedMovie {
        title: entry.title,
        url: entry.url,
        rating: metadata.rating,
        formatted_rating: format_rating(metadata.rating),
        poster_url,
        backdrop_url,
        logo_url,
        release_year: release_year(metadata.release_date.as_deref()),
        release_date: metadata
            .release_date
            .unwrap_or_else(|| UNKNOWN_RELEASE_DATE.to_string()),
        runtime: metadata.runtime,
        formatted_runtime: format_runtime(metadata.runtime),
        genres: metadata.genres,
        imdb_id: metadata.imdb_id.unwrap_or_default(),
        overview,
        director: metadata.director,
        cast: metadata.cast,
        users,
        count,
    }
}

/// Orders by owner count, then rating, both descending.
///
/// The sort is stable; entries tied on both keep their incoming order.
pub fn sort_movies(movies: &mut [ProcessedMovie]) {
    movies.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| b.rating.total_cmp(&a.rating))
    });
}

/// Builds and sorts the display records for all enriched titles
pub fn assemble<I>(
    images: &ImageConfig,
    enriched: I,
    avatars: &HashMap<String, String>,
) -> Vec<ProcessedMovie>
where
    I: IntoIterator<Item = (AggregateEntry, MovieMetadata)>,
{
    let mut movies: Vec<ProcessedMovie> = enriched
        .into_iter()
        .map(|(entry, metadata)| process_movie(images, entry, metadata, avatars))
        .collect();

    sort_movies(&mut movies);
    movies
}
