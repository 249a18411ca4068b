use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use cinematch_api::cache::{create_redis_client, Cache};
use cinematch_api::config::Config;
use cinematch_api::models::GenreMap;
use cinematch_api::routes::create_router;
use cinematch_api::services::corpus::MovieCorpus;
use cinematch_api::services::embedding::{Embedder, FastembedEmbedder};
use cinematch_api::services::providers::{CatalogProvider, TmdbProvider};
use cinematch_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let redis_client = create_redis_client(&config.redis_url)?;
    let (cache, cache_writer) = Cache::new(redis_client).await;

    let provider: Arc<dyn CatalogProvider> = Arc::new(TmdbProvider::new(
        cache,
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
    ));

    // Genre map is best-effort: an unreachable catalog leaves it empty and
    // the process still serves (prompts just match no genres).
    let genres = match provider.genre_list().await {
        Ok(list) => Arc::new(GenreMap::from_genres(list)),
        Err(e) => {
            tracing::warn!(error = %e, "Genre list fetch failed, starting with empty genre map");
            Arc::new(GenreMap::default())
        }
    };

    // Model load and corpus embedding are CPU-bound one-time work
    let dataset_path = PathBuf::from(&config.dataset_path);
    let (embedder, corpus) = tokio::task::spawn_blocking(move || {
        let embedder = FastembedEmbedder::new()?;
        let corpus = MovieCorpus::load(&dataset_path, &embedder)?;
        Ok::<_, anyhow::Error>((embedder, corpus))
    })
    .await??;

    let embedder: Arc<dyn Embedder> = Arc::new(embedder);
    let corpus = Arc::new(corpus);

    tracing::info!(
        genres = genres.len(),
        corpus_records = corpus.len(),
        "Application state initialized"
    );

    let state = AppState::new(provider, genres, corpus, embedder, &config.tmdb_image_url);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server running");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Flush pending cache writes before the process exits
    cache_writer.shutdown().await;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("Failed to listen for shutdown signal");
    }
}
