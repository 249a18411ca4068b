use std::collections::BTreeSet;

/// Structured filter criteria derived from a free-text prompt.
///
/// Request-scoped; never persisted. Ordered sets keep downstream query
/// construction and labels deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub included_genres: BTreeSet<u64>,
    pub excluded_genres: BTreeSet<u64>,
    pub keyword_ids: BTreeSet<u64>,
    pub included_actors: BTreeSet<String>,
    pub excluded_actors: BTreeSet<String>,
    /// Target title when the prompt asks for movies "like X" / "similar to X".
    /// When set, all other fields are empty and the request routes to
    /// similarity search.
    pub similar_to: Option<String>,
}

impl FilterCriteria {
    pub fn is_similarity(&self) -> bool {
        self.similar_to.is_some()
    }
}

/// Parameters for a catalog discover query. Empty fields are omitted from
/// the outbound request entirely, never sent as empty values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoverQuery {
    pub with_genres: Vec<u64>,
    pub without_genres: Vec<u64>,
    pub with_keywords: Vec<u64>,
    pub with_cast: Vec<u64>,
}

impl DiscoverQuery {
    /// Primary query built from the full filter criteria
    pub fn primary(criteria: &FilterCriteria, actor_ids: &[u64]) -> Self {
        Self {
            with_genres: criteria.included_genres.iter().copied().collect(),
            without_genres: criteria.excluded_genres.iter().copied().collect(),
            with_keywords: criteria.keyword_ids.iter().copied().collect(),
            with_cast: actor_ids.to_vec(),
        }
    }

    /// Simplified retry query: included genres and actors only, all keyword
    /// and exclusion constraints dropped.
    pub fn fallback(criteria: &FilterCriteria, actor_ids: &[u64]) -> Self {
        Self {
            with_genres: criteria.included_genres.iter().copied().collect(),
            without_genres: Vec::new(),
            with_keywords: Vec::new(),
            with_cast: actor_ids.to_vec(),
        }
    }
}

/// Joins ids into the comma-separated form the catalog expects,
/// `None` when the list is empty.
pub fn join_ids(ids: &[u64]) -> Option<String> {
    if ids.is_empty() {
        None
    } else {
        Some(
            ids.iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(","),
        )
    }
}
