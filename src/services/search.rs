use crate::extract;
use crate::models::{
    movie::CAST_NOT_APPLICABLE, CatalogMovie, DiscoverQuery, FilterCriteria, GenreMap, Movie,
};
use crate::services::providers::CatalogProvider;

pub const DEFAULT_MAX_RESULTS: usize = 6;

/// Full prompt-to-movies pipeline: extract filter criteria, then route to
/// similarity search or filtered discovery.
///
/// Catalog failures never surface here; they degrade to an empty result
/// list, matching the "no movies found" affordance upstream.
pub async fn recommend_by_prompt(
    provider: &dyn CatalogProvider,
    genres: &GenreMap,
    image_base_url: &str,
    prompt: &str,
    max_results: usize,
) -> Vec<Movie> {
    let criteria = extract::extract_filters(prompt, genres, provider).await;

    if let Some(target) = &criteria.similar_to {
        return similar_movies(provider, image_base_url, target, max_results).await;
    }

    filtered_discovery(provider, genres, image_base_url, &criteria, max_results).await
}

/// Filtered discovery with the single degrade-and-retry fallback.
pub async fn filtered_discovery(
    provider: &dyn CatalogProvider,
    genres: &GenreMap,
    image_base_url: &str,
    criteria: &FilterCriteria,
    max_results: usize,
) -> Vec<Movie> {
    let actor_ids = resolve_actor_ids(provider, criteria).await;

    let primary = DiscoverQuery::primary(criteria, &actor_ids);
    let mut movies = swallow(provider.discover(&primary).await, "discover");
    movies = filter_excluded_actors(provider, movies, criteria).await;

    let had_extra_constraints = !criteria.excluded_genres.is_empty()
        || !criteria.keyword_ids.is_empty()
        || !actor_ids.is_empty();

    if movies.is_empty() && had_extra_constraints {
        tracing::info!("Primary discover empty, retrying with simplified filters");
        let fallback = DiscoverQuery::fallback(criteria, &actor_ids);
        movies = swallow(provider.discover(&fallback).await, "discover fallback");
    }

    let genre_label = genres.label_for(&criteria.included_genres);
    let cast_label = cast_label(criteria);

    movies
        .iter()
        .take(max_results)
        .map(|m| Movie::from_catalog(m, image_base_url, genre_label.clone(), cast_label.clone()))
        .collect()
}

/// Similarity path: resolve the target title to its best catalog match and
/// return that movie's similar list, in catalog order.
pub async fn similar_movies(
    provider: &dyn CatalogProvider,
    image_base_url: &str,
    target_title: &str,
    max_results: usize,
) -> Vec<Movie> {
    let target = match provider.search_movie(target_title).await {
        Ok(Some(movie)) => movie,
        Ok(None) => {
            tracing::info!(title = %target_title, "No catalog match for similarity target");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(error = %e, title = %target_title, "Similarity target lookup failed");
            return Vec::new();
        }
    };

    let similar = swallow(provider.similar_movies(target.id).await, "similar movies");

    similar
        .iter()
        .take(max_results)
        .map(|m| {
            Movie::from_catalog(
                m,
                image_base_url,
                String::new(),
                CAST_NOT_APPLICABLE.to_string(),
            )
        })
        .collect()
}

/// Maps the catalog's weekly trending list to client records
pub async fn trending_movies(provider: &dyn CatalogProvider, image_base_url: &str) -> Vec<Movie> {
    let movies = swallow(provider.trending().await, "trending");
    listing_to_movies(&movies, image_base_url)
}

/// Maps the catalog's popular list to client records
pub async fn popular_movies(provider: &dyn CatalogProvider, image_base_url: &str) -> Vec<Movie> {
    let movies = swallow(provider.popular().await, "popular");
    listing_to_movies(&movies, image_base_url)
}

fn listing_to_movies(movies: &[CatalogMovie], image_base_url: &str) -> Vec<Movie> {
    movies
        .iter()
        .map(|m| {
            Movie::from_catalog(
                m,
                image_base_url,
                String::new(),
                CAST_NOT_APPLICABLE.to_string(),
            )
        })
        .collect()
}

/// Resolves included actor names to catalog person ids; failed and empty
/// lookups drop the name silently.
async fn resolve_actor_ids(provider: &dyn CatalogProvider, criteria: &FilterCriteria) -> Vec<u64> {
    let mut actor_ids = Vec::new();
    for name in &criteria.included_actors {
        match provider.search_person(name).await {
            Ok(Some(id)) => actor_ids.push(id),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, name = %name, "Actor id lookup failed");
            }
        }
    }
    actor_ids
}

/// Drops movies whose credited cast contains an excluded actor.
///
/// One credits round trip per candidate; a failed credits lookup counts as
/// an empty cast, so the movie is kept.
async fn filter_excluded_actors(
    provider: &dyn CatalogProvider,
    movies: Vec<CatalogMovie>,
    criteria: &FilterCriteria,
) -> Vec<CatalogMovie> {
    if criteria.excluded_actors.is_empty() {
        return movies;
    }

    let mut kept = Vec::new();
    for movie in movies {
        let cast = swallow(provider.movie_credits(movie.id).await, "credits");
        let has_excluded = cast.iter().any(|name| {
            let name = name.to_lowercase();
            criteria.excluded_actors.contains(&name)
        });

        if has_excluded {
            tracing::debug!(title = %movie.title, "Dropped for excluded cast member");
        } else {
            kept.push(movie);
        }
    }
    kept
}

fn cast_label(criteria: &FilterCriteria) -> String {
    if criteria.included_actors.is_empty() {
        CAST_NOT_APPLICABLE.to_string()
    } else {
        criteria
            .included_actors
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Catalog failures degrade to an empty list, never an error
fn swallow<T>(result: crate::error::AppResult<Vec<T>>, lookup: &str) -> Vec<T> {
    match result {
        Ok(values) => values,
        Err(e) => {
            tracing::warn!(error = %e, lookup = %lookup, "Catalog lookup failed, treating as empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::CatalogGenre;
    use crate::services::providers::MockCatalogProvider;

    const IMAGE_BASE: &str = "https://image.test";

    fn sample_genres() -> GenreMap {
        GenreMap::from_genres(vec![
            CatalogGenre {
                id: 35,
                name: "Comedy".to_string(),
            },
            CatalogGenre {
                id: 27,
                name: "Horror".to_string(),
            },
        ])
    }

    fn catalog_movie(id: u64, title: &str) -> CatalogMovie {
        CatalogMovie {
            id,
            title: title.to_string(),
            overview: format!("{} overview", title),
            release_date: "2020-01-01".to_string(),
            poster_path: Some(format!("/{}.jpg", id)),
            vote_average: Some(7.0),
            vote_count: Some(1000),
        }
    }

    #[tokio::test]
    async fn test_empty_primary_with_exclusions_triggers_exactly_one_fallback() {
        let mut criteria = FilterCriteria::default();
        criteria.included_genres.insert(35);
        criteria.excluded_genres.insert(27);

        let mut provider = MockCatalogProvider::new();
        provider
            .expect_discover()
            .withf(|q| q.without_genres == vec![27])
            .times(1)
            .returning(|_| Ok(vec![]));
        provider
            .expect_discover()
            .withf(|q| q.without_genres.is_empty() && q.with_genres == vec![35])
            .times(1)
            .returning(|_| Ok(vec![catalog_movie(1, "Fallback Hit")]));

        let movies =
            filtered_discovery(&provider, &sample_genres(), IMAGE_BASE, &criteria, 6).await;

        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "Fallback Hit");
    }

    #[tokio::test]
    async fn test_no_fallback_without_extra_constraints() {
        let mut criteria = FilterCriteria::default();
        criteria.included_genres.insert(35);

        let mut provider = MockCatalogProvider::new();
        provider
            .expect_discover()
            .times(1)
            .returning(|_| Ok(vec![]));

        let movies =
            filtered_discovery(&provider, &sample_genres(), IMAGE_BASE, &criteria, 6).await;

        assert!(movies.is_empty());
    }

    #[tokio::test]
    async fn test_no_fallback_when_primary_has_results() {
        let mut criteria = FilterCriteria::default();
        criteria.included_genres.insert(35);
        criteria.excluded_genres.insert(27);

        let mut provider = MockCatalogProvider::new();
        provider
            .expect_discover()
            .times(1)
            .returning(|_| Ok(vec![catalog_movie(1, "Primary Hit")]));

        let movies =
            filtered_discovery(&provider, &sample_genres(), IMAGE_BASE, &criteria, 6).await;

        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "Primary Hit");
    }

    #[tokio::test]
    async fn test_excluded_actor_post_filter_drops_matching_cast() {
        let mut criteria = FilterCriteria::default();
        criteria.included_genres.insert(35);
        criteria
            .excluded_actors
            .insert("johnny depp".to_string());

        let mut provider = MockCatalogProvider::new();
        provider
            .expect_discover()
            .times(1)
            .returning(|_| Ok(vec![catalog_movie(1, "With Depp"), catalog_movie(2, "Clean")]));
        provider.expect_movie_credits().returning(|movie_id| {
            if movie_id == 1 {
                Ok(vec!["Johnny Depp".to_string(), "Someone Else".to_string()])
            } else {
                Ok(vec!["Someone Else".to_string()])
            }
        });

        let movies =
            filtered_discovery(&provider, &sample_genres(), IMAGE_BASE, &criteria, 6).await;

        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "Clean");
    }

    #[tokio::test]
    async fn test_credits_failure_keeps_movie() {
        let mut criteria = FilterCriteria::default();
        criteria
            .excluded_actors
            .insert("johnny depp".to_string());

        let mut provider = MockCatalogProvider::new();
        provider
            .expect_discover()
            .returning(|_| Ok(vec![catalog_movie(1, "Unknown Cast")]));
        provider
            .expect_movie_credits()
            .returning(|_| Err(AppError::ExternalApi("timeout".to_string())));

        let movies =
            filtered_discovery(&provider, &sample_genres(), IMAGE_BASE, &criteria, 6).await;

        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "Unknown Cast");
    }

    #[tokio::test]
    async fn test_included_actor_ids_resolved_into_query() {
        let mut criteria = FilterCriteria::default();
        criteria.included_actors.insert("tom hanks".to_string());

        let mut provider = MockCatalogProvider::new();
        provider
            .expect_search_person()
            .returning(|_| Ok(Some(31)));
        provider
            .expect_discover()
            .withf(|q| q.with_cast == vec![31])
            .times(1)
            .returning(|_| Ok(vec![catalog_movie(1, "Hanks Movie")]));

        let movies =
            filtered_discovery(&provider, &sample_genres(), IMAGE_BASE, &criteria, 6).await;

        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].cast, "tom hanks");
    }

    #[tokio::test]
    async fn test_results_truncated_to_max_results() {
        let criteria = FilterCriteria::default();

        let mut provider = MockCatalogProvider::new();
        provider.expect_discover().returning(|_| {
            Ok((1..=10)
                .map(|i| catalog_movie(i, &format!("Movie {}", i)))
                .collect())
        });

        let movies =
            filtered_discovery(&provider, &sample_genres(), IMAGE_BASE, &criteria, 6).await;

        assert_eq!(movies.len(), 6);
    }

    #[tokio::test]
    async fn test_genre_and_cast_labels() {
        let mut criteria = FilterCriteria::default();
        criteria.included_genres.insert(35);
        criteria.included_actors.insert("meg ryan".to_string());
        criteria.included_actors.insert("tom hanks".to_string());

        let mut provider = MockCatalogProvider::new();
        provider.expect_search_person().returning(|_| Ok(Some(1)));
        provider
            .expect_discover()
            .returning(|_| Ok(vec![catalog_movie(1, "Rom Com")]));

        let movies =
            filtered_discovery(&provider, &sample_genres(), IMAGE_BASE, &criteria, 6).await;

        assert_eq!(movies[0].genre, "comedy");
        assert_eq!(movies[0].cast, "meg ryan, tom hanks");
    }

    #[tokio::test]
    async fn test_similarity_path_returns_catalog_order() {
        let mut provider = MockCatalogProvider::new();
        provider
            .expect_search_movie()
            .times(1)
            .returning(|_| Ok(Some(catalog_movie(27205, "Inception"))));
        provider
            .expect_similar_movies()
            .withf(|&id| id == 27205)
            .times(1)
            .returning(|_| {
                Ok(vec![
                    catalog_movie(1, "Interstellar"),
                    catalog_movie(2, "The Prestige"),
                ])
            });

        let movies = similar_movies(&provider, IMAGE_BASE, "inception", 6).await;

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].title, "Interstellar");
        assert_eq!(movies[0].cast, CAST_NOT_APPLICABLE);
        assert_eq!(movies[0].genre, "");
    }

    #[tokio::test]
    async fn test_similarity_path_unknown_title_is_empty() {
        let mut provider = MockCatalogProvider::new();
        provider
            .expect_search_movie()
            .returning(|_| Ok(None));
        provider.expect_similar_movies().times(0);

        let movies = similar_movies(&provider, IMAGE_BASE, "no such movie", 6).await;
        assert!(movies.is_empty());
    }

    #[tokio::test]
    async fn test_discover_failure_degrades_to_empty() {
        let criteria = FilterCriteria::default();

        let mut provider = MockCatalogProvider::new();
        provider
            .expect_discover()
            .returning(|_| Err(AppError::ExternalApi("unreachable".to_string())));

        let movies =
            filtered_discovery(&provider, &sample_genres(), IMAGE_BASE, &criteria, 6).await;

        assert!(movies.is_empty());
    }

    #[tokio::test]
    async fn test_trending_maps_listing() {
        let mut provider = MockCatalogProvider::new();
        provider
            .expect_trending()
            .returning(|| Ok(vec![catalog_movie(7, "Hot This Week")]));

        let movies = trending_movies(&provider, IMAGE_BASE).await;
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "Hot This Week");
        assert_eq!(
            movies[0].poster_url.as_deref(),
            Some("https://image.test/w500/7.jpg")
        );
    }
}
