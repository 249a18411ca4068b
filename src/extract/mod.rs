pub mod actors;
pub mod genres;
pub mod keywords;

pub use actors::{actor_candidates, ActorCandidates};
pub use genres::extract_genres;
pub use keywords::extract_keywords;

use crate::models::{FilterCriteria, GenreMap};
use crate::services::providers::CatalogProvider;

/// Names shorter than this are never sent to the person search endpoint
const MIN_ACTOR_NAME_LEN: usize = 3;

/// Markers that route a prompt to similarity search
const SIMILARITY_MARKERS: [&str; 2] = ["like ", "similar to "];

/// Detects "movies like X" / "similar to X" intent.
///
/// Returns the suffix after the LAST occurrence of the marker. The first
/// matching marker wins, so "similar to" is only consulted when "like " is
/// absent.
pub fn similar_to_target(prompt: &str) -> Option<String> {
    let prompt = prompt.to_lowercase();
    for marker in SIMILARITY_MARKERS {
        if let Some(position) = prompt.rfind(marker) {
            let target = prompt[position + marker.len()..].trim().to_string();
            if !target.is_empty() {
                return Some(target);
            }
        }
    }
    None
}

/// Parses a free-text prompt into structured filter criteria.
///
/// Similarity intent short-circuits everything else: no genre, keyword or
/// actor extraction runs, and no catalog calls are made. Otherwise actor
/// candidates are confirmed against the catalog's person search; unconfirmed
/// candidates are dropped, and any confirmed name present in both sets stays
/// excluded only.
pub async fn extract_filters(
    prompt: &str,
    genres: &GenreMap,
    provider: &dyn CatalogProvider,
) -> FilterCriteria {
    if let Some(target) = similar_to_target(prompt) {
        return FilterCriteria {
            similar_to: Some(target),
            ..Default::default()
        };
    }

    let mut criteria = FilterCriteria::default();

    let (included_genres, excluded_genres) = extract_genres(prompt, genres);
    criteria.included_genres = included_genres;
    criteria.excluded_genres = excluded_genres;

    criteria.keyword_ids = extract_keywords(prompt, provider).await;

    let candidates = actor_candidates(prompt);
    for name in candidates.excluded {
        if confirm_actor(&name, provider).await {
            criteria.excluded_actors.insert(name);
        }
    }
    for name in candidates.included {
        if criteria.excluded_actors.contains(&name) {
            continue;
        }
        if confirm_actor(&name, provider).await {
            criteria.included_actors.insert(name);
        }
    }

    tracing::debug!(
        included_genres = criteria.included_genres.len(),
        excluded_genres = criteria.excluded_genres.len(),
        keywords = criteria.keyword_ids.len(),
        included_actors = criteria.included_actors.len(),
        excluded_actors = criteria.excluded_actors.len(),
        "Extracted filter criteria"
    );

    criteria
}

/// A candidate is a real actor only when the person search finds it.
/// Lookup failures count as unconfirmed.
async fn confirm_actor(name: &str, provider: &dyn CatalogProvider) -> bool {
    if name.len() < MIN_ACTOR_NAME_LEN {
        return false;
    }

    match provider.search_person(name).await {
        Ok(Some(_)) => true,
        Ok(None) => false,
        Err(e) => {
            tracing::warn!(error = %e, name = %name, "Person lookup failed, dropping candidate");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CatalogGenre;
    use crate::services::providers::MockCatalogProvider;

    fn sample_genres() -> GenreMap {
        GenreMap::from_genres(vec![
            CatalogGenre {
                id: 35,
                name: "Comedy".to_string(),
            },
            CatalogGenre {
                id: 10749,
                name: "Romance".to_string(),
            },
        ])
    }

    #[test]
    fn test_similar_to_target_with_like() {
        assert_eq!(
            similar_to_target("movies like Inception"),
            Some("inception".to_string())
        );
    }

    #[test]
    fn test_similar_to_target_with_similar_to() {
        assert_eq!(
            similar_to_target("something similar to The Matrix"),
            Some("the matrix".to_string())
        );
    }

    #[test]
    fn test_similar_to_target_takes_last_occurrence() {
        assert_eq!(
            similar_to_target("i like movies like Heat"),
            Some("heat".to_string())
        );
    }

    #[test]
    fn test_similar_to_target_absent() {
        assert_eq!(similar_to_target("a funny pirate movie"), None);
    }

    #[tokio::test]
    async fn test_similarity_short_circuits_all_extraction() {
        // No expectations set: any catalog call would panic the mock.
        let provider = MockCatalogProvider::new();

        let criteria = extract_filters("movies like Inception", &sample_genres(), &provider).await;

        assert_eq!(criteria.similar_to, Some("inception".to_string()));
        assert!(criteria.included_genres.is_empty());
        assert!(criteria.excluded_genres.is_empty());
        assert!(criteria.keyword_ids.is_empty());
        assert!(criteria.included_actors.is_empty());
        assert!(criteria.excluded_actors.is_empty());
    }

    #[tokio::test]
    async fn test_confirmed_actors_enter_included_set() {
        let mut provider = MockCatalogProvider::new();
        provider.expect_search_person().returning(|name| {
            if name == "tom hanks" || name == "meg ryan" {
                Ok(Some(31))
            } else {
                Ok(None)
            }
        });

        let criteria = extract_filters(
            "movie with Tom Hanks and Meg Ryan",
            &sample_genres(),
            &provider,
        )
        .await;

        assert!(criteria.included_actors.contains("tom hanks"));
        assert!(criteria.included_actors.contains("meg ryan"));
        assert!(criteria.excluded_actors.is_empty());
    }

    #[tokio::test]
    async fn test_negated_actor_confirmed_as_excluded() {
        let mut provider = MockCatalogProvider::new();
        provider.expect_search_person().returning(|name| {
            if name == "johnny depp" {
                Ok(Some(85))
            } else {
                Ok(None)
            }
        });

        let criteria =
            extract_filters("anything but not Johnny Depp", &sample_genres(), &provider).await;

        assert!(criteria.excluded_actors.contains("johnny depp"));
        assert!(!criteria.included_actors.contains("johnny depp"));
    }

    #[tokio::test]
    async fn test_without_romance_property() {
        let mut provider = MockCatalogProvider::new();
        provider.expect_search_person().returning(|_| Ok(None));

        let criteria = extract_filters(
            "a comedy without romance please",
            &sample_genres(),
            &provider,
        )
        .await;

        assert!(criteria.included_genres.contains(&35));
        assert!(criteria.excluded_genres.contains(&10749));
        assert!(!criteria.included_genres.contains(&10749));
    }

    #[tokio::test]
    async fn test_unconfirmed_candidates_are_dropped() {
        let mut provider = MockCatalogProvider::new();
        provider.expect_search_person().returning(|_| Ok(None));

        let criteria = extract_filters(
            "starring Zyxo Qwerty tonight",
            &sample_genres(),
            &provider,
        )
        .await;

        assert!(criteria.included_actors.is_empty());
    }
}
