use serde::{Deserialize, Serialize};

mod movie;
pub mod tmdb;
mod watchlist;

pub use movie::{MovieMetadata, MovieOwner, Person, ProcessedMovie};
pub use watchlist::{AggregateEntry, AggregateIndex, Watchlist, WatchlistEntry};

/// Query accepted by the compare endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ComparisonRequest {
    /// Usernames separated by commas and/or whitespace
    #[serde(default)]
    pub users: String,
}

/// Outcome of comparing several users' watchlists
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
    /// Shared films, most-shared and best-rated first
    pub movies: Vec<ProcessedMovie>,
    /// Validated users in request order, with avatars
    pub users: Vec<MovieOwner>,
}
