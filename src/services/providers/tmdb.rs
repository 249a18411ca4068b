/// TMDB API provider
///
/// Implements the `CatalogProvider` trait against the TMDB v3 REST API.
/// Person, keyword, movie-search and credits lookups run through Redis so
/// repeated prompts do not burn through the catalog's rate limit; discover
/// and the listing endpoints are too query-specific to be worth caching.
use crate::{
    cached,
    cache::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{
        catalog::{CreditsResponse, GenreListResponse, PagedResults, SearchHit},
        filters::join_ids,
        CatalogGenre, CatalogMovie, DiscoverQuery,
    },
    services::providers::CatalogProvider,
};
use reqwest::Client as HttpClient;

const PERSON_CACHE_TTL: u64 = 604800; // 1 week
const KEYWORD_CACHE_TTL: u64 = 604800; // 1 week
const MOVIE_SEARCH_CACHE_TTL: u64 = 86400; // 1 day
const CREDITS_CACHE_TTL: u64 = 604800; // 1 week

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    cache: Cache,
}

impl TmdbProvider {
    pub fn new(cache: Cache, api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            cache,
        }
    }

    /// Issues a GET against the catalog and deserializes the JSON body.
    /// Non-2xx statuses come back as `AppError::ExternalApi`.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let mut query: Vec<(&str, String)> = vec![("api_key", self.api_key.clone())];
        query.extend_from_slice(params);

        let response = self.http_client.get(&url).query(&query).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Catalog API returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }

    async fn movie_list(&self, path: &str, params: &[(&str, String)]) -> AppResult<Vec<CatalogMovie>> {
        let page: PagedResults<CatalogMovie> = self.get_json(path, params).await?;
        Ok(page.results)
    }
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbProvider {
    async fn genre_list(&self) -> AppResult<Vec<CatalogGenre>> {
        let response: GenreListResponse = self.get_json("/genre/movie/list", &[]).await?;

        tracing::info!(genres = response.genres.len(), "Fetched catalog genre list");

        Ok(response.genres)
    }

    async fn search_keyword(&self, term: &str) -> AppResult<Option<u64>> {
        cached!(
            self.cache,
            CacheKey::KeywordSearch(term.to_string()),
            KEYWORD_CACHE_TTL,
            async move {
                let page: PagedResults<SearchHit> = self
                    .get_json("/search/keyword", &[("query", term.to_string())])
                    .await?;

                let id = page.results.first().map(|hit| hit.id);

                tracing::debug!(term = %term, id = ?id, "Keyword search completed");

                Ok::<_, AppError>(id)
            }
        )
    }

    async fn search_person(&self, name: &str) -> AppResult<Option<u64>> {
        cached!(
            self.cache,
            CacheKey::PersonSearch(name.to_string()),
            PERSON_CACHE_TTL,
            async move {
                let page: PagedResults<SearchHit> = self
                    .get_json("/search/person", &[("query", name.to_string())])
                    .await?;

                let id = page.results.first().map(|hit| hit.id);

                tracing::debug!(name = %name, id = ?id, "Person search completed");

                Ok::<_, AppError>(id)
            }
        )
    }

    async fn search_movie(&self, title: &str) -> AppResult<Option<CatalogMovie>> {
        cached!(
            self.cache,
            CacheKey::MovieSearch(title.to_string()),
            MOVIE_SEARCH_CACHE_TTL,
            async move {
                let page: PagedResults<CatalogMovie> = self
                    .get_json("/search/movie", &[("query", title.to_string())])
                    .await?;

                Ok::<_, AppError>(page.results.into_iter().next())
            }
        )
    }

    async fn discover(&self, query: &DiscoverQuery) -> AppResult<Vec<CatalogMovie>> {
        let mut params: Vec<(&str, String)> =
            vec![("sort_by", "popularity.desc".to_string())];

        if let Some(genres) = join_ids(&query.with_genres) {
            params.push(("with_genres", genres));
        }
        if let Some(genres) = join_ids(&query.without_genres) {
            params.push(("without_genres", genres));
        }
        if let Some(keywords) = join_ids(&query.with_keywords) {
            params.push(("with_keywords", keywords));
        }
        if let Some(cast) = join_ids(&query.with_cast) {
            params.push(("with_cast", cast));
        }

        let movies = self.movie_list("/discover/movie", &params).await?;

        tracing::info!(results = movies.len(), "Discover query completed");

        Ok(movies)
    }

    async fn similar_movies(&self, movie_id: u64) -> AppResult<Vec<CatalogMovie>> {
        self.movie_list(&format!("/movie/{}/similar", movie_id), &[])
            .await
    }

    async fn movie_credits(&self, movie_id: u64) -> AppResult<Vec<String>> {
        cached!(
            self.cache,
            CacheKey::Credits(movie_id),
            CREDITS_CACHE_TTL,
            async move {
                let response: CreditsResponse = self
                    .get_json(&format!("/movie/{}/credits", movie_id), &[])
                    .await?;

                Ok::<_, AppError>(response
                    .cast
                    .into_iter()
                    .map(|member| member.name)
                    .collect::<Vec<String>>())
            }
        )
    }

    async fn trending(&self) -> AppResult<Vec<CatalogMovie>> {
        self.movie_list("/trending/movie/week", &[]).await
    }

    async fn popular(&self) -> AppResult<Vec<CatalogMovie>> {
        self.movie_list("/movie/popular", &[]).await
    }
}
