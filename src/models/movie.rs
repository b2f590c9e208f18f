use serde::{Deserialize, Serialize};

/// A person credited on a film, as returned by TMDB
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub id: Option<u64>,
}

impl Person {
    /// Placeholder used when no director is credited
    pub fn unknown() -> Self {
        Self {
            name: "N/A".to_string(),
            id: None,
        }
    }
}

/// Best-effort metadata for a film. Missing data is represented by defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieMetadata {
    /// TMDB vote average, 0.0 when unknown
    pub rating: f64,
    /// Runtime in minutes, 0 when unknown
    pub runtime: u32,
    pub genres: Vec<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub logo_path: Option<String>,
    /// Release date as `YYYY-MM-DD`
    pub release_date: Option<String>,
    pub overview: String,
    pub director: Person,
    /// Top-billed cast, at most five
    pub cast: Vec<Person>,
    pub imdb_id: Option<String>,
    pub tmdb_id: Option<u64>,
}

impl Default for MovieMetadata {
    fn default() -> Self {
        Self {
            rating: 0.0,
            runtime: 0,
            genres: Vec::new(),
            poster_path: None,
            backdrop_path: None,
            logo_path: None,
            release_date: None,
            overview: String::new(),
            director: Person::unknown(),
            cast: Vec::new(),
            imdb_id: None,
            tmdb_id: None,
        }
    }
}

impl MovieMetadata {
    /// True for the record returned when a lookup finds nothing
    pub fn is_empty(&self) -> bool {
        self.tmdb_id.is_none()
    }
}

/// A user shown next to a shared film
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieOwner {
    pub name: String,
    pub avatar: Option<String>,
}

/// Display-ready record for one shared film
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedMovie {
    pub title: String,
    pub url: String,
    pub rating: f64,
    pub formatted_rating: String,
    pub poster_url: String,
    pub backdrop_url: String,
    pub logo_url: String,
    pub release_date: String,
    pub release_year: String,
    pub runtime: u32,
    pub formatted_runtime: String,
    pub genres: Vec<String>,
    pub imdb_id: String,
    pub overview: String,
    pub director: Person,
    pub cast: Vec<Person>,
    /// Owners in lexicographic order
    pub users: Vec<MovieOwner>,
    pub count: usize,
}
