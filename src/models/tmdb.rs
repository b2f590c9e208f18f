use serde::Deserialize;

// ============================================================================
// TMDB API Types
// ============================================================================

/// Response from `/search/movie`
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchResponse {
    #[serde(default)]
    pub results: Vec<TmdbSearchResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchResult {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

/// Response from `/movie/{id}?append_to_response=credits,images`
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    pub id: u64,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub credits: Option<TmdbCredits>,
    #[serde(default)]
    pub images: Option<TmdbImages>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbCredits {
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
    #[serde(default)]
    pub crew: Vec<TmdbCrewMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCastMember {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCrewMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub job: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbImages {
    #[serde(default)]
    pub logos: Vec<TmdbImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbImage {
    pub file_path: String,
    /// ISO 639-1 language tag; `None` or `"xx"` means no language
    #[serde(default)]
    pub iso_639_1: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_deserialization_with_missing_fields() {
        let json = r#"{ "id": 603, "runtime": null, "images": { "logos": [] } }"#;
        let details: TmdbMovieDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.id, 603);
        assert_eq!(details.runtime, None);
        assert!(details.genres.is_empty());
        assert!(details.credits.is_none());
        assert!(details.images.unwrap().logos.is_empty());
    }

    #[test]
    fn test_search_deserialization() {
        let json = r#"{
            "page": 1,
            "results": [{ "id": 949, "title": "Heat", "release_date": "1995-12-15" }],
            "total_results": 1
        }"#;
        let search: TmdbSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(search.results.len(), 1);
        assert_eq!(search.results[0].id, 949);
        assert_eq!(search.results[0].title.as_deref(), Some("Heat"));
    }
}
