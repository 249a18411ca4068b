use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ============================================================================
// Catalog wire types (TMDB v3 format)
// ============================================================================

/// A genre as returned by the catalog's genre list endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogGenre {
    pub id: u64,
    pub name: String,
}

/// Response from GET /genre/movie/list
#[derive(Debug, Deserialize)]
pub struct GenreListResponse {
    #[serde(default)]
    pub genres: Vec<CatalogGenre>,
}

/// A keyword or person hit from the catalog's search endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

/// Paged search/list response wrapper used by most catalog endpoints
#[derive(Debug, Deserialize)]
pub struct PagedResults<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// A movie as returned by discover, search, similar, trending and popular
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogMovie {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
}

/// One credited cast member from GET /movie/{id}/credits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastMember {
    pub name: String,
}

/// Response from GET /movie/{id}/credits
#[derive(Debug, Deserialize)]
pub struct CreditsResponse {
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

// ============================================================================
// Genre map
// ============================================================================

/// Lowercase canonical genre name -> catalog genre id.
///
/// Fetched once at startup and read-only for the process lifetime; staleness
/// is accepted. Ordered so joined genre labels come out deterministic.
#[derive(Debug, Clone, Default)]
pub struct GenreMap(BTreeMap<String, u64>);

impl GenreMap {
    pub fn from_genres(genres: Vec<CatalogGenre>) -> Self {
        let map = genres
            .into_iter()
            .map(|g| (g.name.to_lowercase(), g.id))
            .collect();
        Self(map)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Joins the names of the given ids in map order, e.g. for result labels
    pub fn label_for(&self, ids: &BTreeSet<u64>) -> String {
        self.0
            .iter()
            .filter(|(_, id)| ids.contains(id))
            .map(|(name, _)| name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
