//! Search route handler.

use axum::{extract::State, Json};

use crate::error::AppError;
use crate::types::{SearchRequest, SearchResponse};

use super::extractors::JsonBody;
use super::AppState;

/// POST /api/search
///
/// Language and mood keywords in the query become filters; the rest is
/// fuzzy-matched. Only a missing `query` is rejected; an empty one lists the
/// head of the dataset.
pub async fn search(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let query = req
        .query
        .ok_or_else(|| AppError::BadRequest("query is required".to_string()))?;

    let outcome = state.search.search(&state.catalog, &query);

    Ok(Json(SearchResponse {
        success: true,
        results: outcome.results.into_iter().cloned().collect(),
        language_filter: outcome.language_filter,
        mood_filter: outcome.mood_filter,
    }))
}
