use axum::{extract::State, Json};

use crate::{models::Movie, services::search, state::AppState};

/// Handler for this week's trending movies
pub async fn trending(State(state): State<AppState>) -> Json<Vec<Movie>> {
    let movies = search::trending_movies(state.provider.as_ref(), &state.image_base_url).await;
    Json(movies)
}

/// Handler for current popular movies
pub async fn popular(State(state): State<AppState>) -> Json<Vec<Movie>> {
    let movies = search::popular_movies(state.provider.as_ref(), &state.image_base_url).await;
    Json(movies)
}
