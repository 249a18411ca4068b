/// Movie catalog provider abstraction
///
/// The catalog is an external REST service (TMDB-compatible) treated as a
/// black box: genre lists, keyword/person/movie search, filtered discovery,
/// similar movies, credits, and trending/popular listings. Implementations
/// own their transport, credentials and caching.
use crate::{
    error::AppResult,
    models::{CatalogGenre, CatalogMovie, DiscoverQuery},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie catalog providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Full genre list; fetched once at startup to build the genre map
    async fn genre_list(&self) -> AppResult<Vec<CatalogGenre>>;

    /// First keyword id matching the term, `None` when nothing matches
    async fn search_keyword(&self, term: &str) -> AppResult<Option<u64>>;

    /// First person id matching the name, `None` when nothing matches
    async fn search_person(&self, name: &str) -> AppResult<Option<u64>>;

    /// Best (first) movie match for a title query
    async fn search_movie(&self, title: &str) -> AppResult<Option<CatalogMovie>>;

    /// Discover movies by filter, sorted by descending popularity
    async fn discover(&self, query: &DiscoverQuery) -> AppResult<Vec<CatalogMovie>>;

    /// Movies similar to the given movie, in catalog order
    async fn similar_movies(&self, movie_id: u64) -> AppResult<Vec<CatalogMovie>>;

    /// Credited cast names for a movie
    async fn movie_credits(&self, movie_id: u64) -> AppResult<Vec<String>>;

    /// This week's trending movies
    async fn trending(&self) -> AppResult<Vec<CatalogMovie>>;

    /// Current popular movies
    async fn popular(&self) -> AppResult<Vec<CatalogMovie>>;
}
