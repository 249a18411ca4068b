use std::cmp::Ordering;
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{movie, Movie};
use crate::services::corpus::MovieCorpus;
use crate::services::embedding::{cosine_similarity, Embedder};
use crate::services::providers::CatalogProvider;

pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.3;

/// Genre names the exclusion scan recognizes in the local-corpus pipeline
const COMMON_GENRES: [&str; 10] = [
    "horror",
    "comedy",
    "drama",
    "animation",
    "action",
    "sci-fi",
    "fantasy",
    "thriller",
    "mystery",
    "romantic",
];

/// Known actors mentioned in the prompt, full-name substring or any name
/// part ("johnny" or "depp" both select "johnny depp"). Sorted for
/// deterministic filtering.
pub fn extract_corpus_actors(prompt: &str, corpus: &MovieCorpus) -> Vec<String> {
    let prompt = prompt.to_lowercase();
    let mut found: Vec<String> = corpus
        .known_actors()
        .iter()
        .filter(|actor| {
            prompt.contains(actor.as_str())
                || actor.split_whitespace().any(|part| prompt.contains(part))
        })
        .cloned()
        .collect();
    found.sort();
    found
}

/// Genre and actor exclusions: any common genre or known actor directly
/// preceded by "not " or "without "
pub fn extract_corpus_exclusions(prompt: &str, corpus: &MovieCorpus) -> (Vec<String>, Vec<String>) {
    let prompt = prompt.to_lowercase();

    let mut excluded_genres: Vec<String> = COMMON_GENRES
        .iter()
        .filter(|genre| is_negated(&prompt, genre))
        .map(|genre| genre.to_string())
        .collect();
    excluded_genres.sort();

    let mut excluded_actors: Vec<String> = corpus
        .known_actors()
        .iter()
        .filter(|actor| is_negated(&prompt, actor))
        .cloned()
        .collect();
    excluded_actors.sort();

    (excluded_genres, excluded_actors)
}

fn is_negated(prompt: &str, phrase: &str) -> bool {
    prompt.contains(&format!("not {}", phrase)) || prompt.contains(&format!("without {}", phrase))
}

/// Ranks the local corpus against the prompt by embedding similarity.
///
/// Takes the top `2 x top_k` candidates by cosine score, then filters in
/// order: similarity threshold, actor inclusion (every prompt actor must
/// appear in the record's cast), excluded genres, excluded actors. Stops as
/// soon as `top_k` survivors are collected; fewer survivors is a valid
/// result. Each survivor is enriched best-effort with live catalog detail.
pub async fn recommend(
    corpus: &MovieCorpus,
    embedder: Arc<dyn Embedder>,
    provider: &dyn CatalogProvider,
    image_base_url: &str,
    prompt: &str,
    top_k: usize,
    threshold: f32,
) -> AppResult<Vec<Movie>> {
    let prompt_embedding = embed_prompt(embedder, prompt.to_string()).await?;

    let mut scored: Vec<(usize, f32)> = corpus
        .embeddings()
        .iter()
        .enumerate()
        .map(|(index, embedding)| (index, cosine_similarity(&prompt_embedding, embedding)))
        .collect();

    // Descending score, index as tie-break so equal scores rank stably
    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });
    // top_k comes straight from the request body, so the widening must not overflow
    scored.truncate(top_k.saturating_mul(2).min(corpus.len()));

    let found_actors = extract_corpus_actors(prompt, corpus);
    let (excluded_genres, excluded_actors) = extract_corpus_exclusions(prompt, corpus);

    tracing::debug!(
        candidates = scored.len(),
        actors = ?found_actors,
        excluded_genres = ?excluded_genres,
        excluded_actors = ?excluded_actors,
        "Ranking corpus candidates"
    );

    let mut results = Vec::new();
    for (index, score) in scored {
        if score < threshold {
            continue;
        }

        let record = &corpus.records()[index];
        let cast_lower = record.cast.to_lowercase();
        let genre_lower = record.genre.to_lowercase();

        if !found_actors.is_empty() && !found_actors.iter().all(|a| cast_lower.contains(a.as_str()))
        {
            continue;
        }
        if excluded_genres.iter().any(|g| genre_lower.contains(g.as_str())) {
            continue;
        }
        if excluded_actors.iter().any(|a| cast_lower.contains(a.as_str())) {
            continue;
        }

        let detail = lookup_detail(provider, &record.title).await;

        results.push(Movie {
            title: record.title.clone(),
            overview: record.overview.clone(),
            release_date: detail.as_ref().map(|d| d.release_date.clone()),
            poster_url: detail
                .as_ref()
                .and_then(|d| movie::poster_url(image_base_url, d.poster_path.as_deref())),
            detail_link: detail.as_ref().map(|d| movie::detail_link(d.id)),
            genre: record.genre.clone(),
            cast: record.cast.clone(),
            rating: None,
            vote_count: None,
            year: record.year,
            score: Some(round_score(score)),
        });

        if results.len() == top_k {
            break;
        }
    }

    Ok(results)
}

/// Best-effort catalog lookup by title; failures yield null enrichment
/// fields rather than a dropped record.
async fn lookup_detail(
    provider: &dyn CatalogProvider,
    title: &str,
) -> Option<crate::models::CatalogMovie> {
    match provider.search_movie(title).await {
        Ok(detail) => detail,
        Err(e) => {
            tracing::warn!(error = %e, title = %title, "Detail lookup failed, returning bare record");
            None
        }
    }
}

async fn embed_prompt(embedder: Arc<dyn Embedder>, prompt: String) -> AppResult<Vec<f32>> {
    // ONNX inference is CPU-bound; keep it off the async scheduler
    let embeddings = tokio::task::spawn_blocking(move || embedder.embed(vec![prompt]))
        .await
        .map_err(|e| AppError::Internal(format!("Embedding task panicked: {}", e)))?
        .map_err(|e| AppError::Embedding(e.to_string()))?;

    embeddings
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Embedding("Embedder returned no vector for prompt".to_string()))
}

fn round_score(score: f32) -> f64 {
    (score as f64 * 1000.0).round() / 1000.0
}
