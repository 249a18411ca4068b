use serde::{Deserialize, Serialize};

use super::CatalogMovie;

/// Sentinel cast label when no actor names were extracted from the prompt
pub const CAST_NOT_APPLICABLE: &str = "N/A";

/// Poster size segment used when building image URLs
const POSTER_SIZE: &str = "w500";

/// Base URL for human-readable movie detail pages
const DETAIL_LINK_BASE: &str = "https://www.themoviedb.org/movie";

/// A movie record as returned to the client.
///
/// Built either from catalog payloads (filter-based search, similarity,
/// trending, popular) or from the static local dataset (semantic ranking).
/// Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub title: String,
    pub overview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    pub poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail_link: Option<String>,
    /// Joined names of the genres the prompt asked for. Describes the query,
    /// not necessarily the movie's own genre list.
    pub genre: String,
    /// Joined included actor names, or "N/A" when none were requested
    pub cast: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Cosine similarity score, present only on semantic-ranker results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Movie {
    /// Maps a catalog movie payload into a client record
    pub fn from_catalog(
        movie: &CatalogMovie,
        image_base_url: &str,
        genre_label: String,
        cast_label: String,
    ) -> Self {
        Self {
            title: movie.title.clone(),
            overview: movie.overview.clone(),
            release_date: Some(movie.release_date.clone()),
            poster_url: poster_url(image_base_url, movie.poster_path.as_deref()),
            detail_link: Some(detail_link(movie.id)),
            genre: genre_label,
            cast: cast_label,
            rating: movie.vote_average,
            vote_count: movie.vote_count,
            year: None,
            score: None,
        }
    }
}

/// Builds a full poster URL from the configured image base and a catalog
/// poster path, `None` when the movie has no poster.
pub fn poster_url(image_base_url: &str, poster_path: Option<&str>) -> Option<String> {
    poster_path.map(|path| format!("{}/{}{}", image_base_url, POSTER_SIZE, path))
}

/// Builds the external detail page link for a catalog movie id
pub fn detail_link(movie_id: u64) -> String {
    format!("{}/{}", DETAIL_LINK_BASE, movie_id)
}
