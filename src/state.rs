use std::sync::Arc;

use crate::models::GenreMap;
use crate::services::corpus::MovieCorpus;
use crate::services::embedding::Embedder;
use crate::services::providers::CatalogProvider;

/// Shared application state.
///
/// Everything here is built once at startup and read-only afterwards, so
/// handlers can share it freely without locking.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn CatalogProvider>,
    pub genres: Arc<GenreMap>,
    pub corpus: Arc<MovieCorpus>,
    pub embedder: Arc<dyn Embedder>,
    pub image_base_url: Arc<str>,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn CatalogProvider>,
        genres: Arc<GenreMap>,
        corpus: Arc<MovieCorpus>,
        embedder: Arc<dyn Embedder>,
        image_base_url: &str,
    ) -> Self {
        Self {
            provider,
            genres,
            corpus,
            embedder,
            image_base_url: Arc::from(image_base_url),
        }
    }
}
