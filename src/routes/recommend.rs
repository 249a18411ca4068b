use axum::{extract::State, Json};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::Movie,
    services::search,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub prompt: String,
    #[serde(default)]
    pub max_results: Option<usize>,
}

/// Handler for prompt-based recommendations
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> AppResult<Json<Vec<Movie>>> {
    if request.prompt.trim().is_empty() {
        return Err(AppError::InvalidInput("Prompt cannot be empty".to_string()));
    }

    let max_results = request.max_results.unwrap_or(search::DEFAULT_MAX_RESULTS);

    let movies = search::recommend_by_prompt(
        state.provider.as_ref(),
        &state.genres,
        &state.image_base_url,
        &request.prompt,
        max_results,
    )
    .await;

    tracing::info!(
        prompt = %request.prompt,
        results = movies.len(),
        "Prompt recommendation completed"
    );

    Ok(Json(movies))
}
