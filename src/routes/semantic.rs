use axum::{extract::State, Json};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::Movie,
    services::semantic,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SemanticRequest {
    pub prompt: String,
    #[serde(default)]
    pub top_k: Option<usize>,
    #[serde(default)]
    pub threshold: Option<f32>,
}

/// Handler for local-corpus semantic recommendations
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<SemanticRequest>,
) -> AppResult<Json<Vec<Movie>>> {
    if request.prompt.trim().is_empty() {
        return Err(AppError::InvalidInput("Prompt cannot be empty".to_string()));
    }

    let top_k = request.top_k.unwrap_or(semantic::DEFAULT_TOP_K);
    let threshold = request
        .threshold
        .unwrap_or(semantic::DEFAULT_SIMILARITY_THRESHOLD);

    let movies = semantic::recommend(
        &state.corpus,
        state.embedder.clone(),
        state.provider.as_ref(),
        &state.image_base_url,
        &request.prompt,
        top_k,
        threshold,
    )
    .await?;

    tracing::info!(
        prompt = %request.prompt,
        results = movies.len(),
        "Semantic recommendation completed"
    );

    Ok(Json(movies))
}
