//! Recommendation route handler.

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::{debug, info};

use crate::error::AppError;
use crate::recommend::RecommendError;
use crate::types::{RecommendRequest, RecommendResponse, RecommendedSong};

use super::extractors::JsonBody;
use super::AppState;

/// POST /api/recommend
///
/// Resolve the song named in the chat message and return similar songs. An
/// unresolved song is a normal response with suggestions, not an error.
pub async fn recommend(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RecommendRequest>,
) -> Result<Json<RecommendResponse>, AppError> {
    let recommender = &state.recommender;

    let target = match recommender.resolve(req.query.as_deref(), req.song_title.as_deref()) {
        Ok(song) => song,
        Err(err) => {
            let message = err.to_string();
            let RecommendError::SongNotFound { suggestions } = err;
            info!(query = ?req.query, song_title = ?req.song_title, "No song matched request");
            return Ok(Json(RecommendResponse::not_found(message, suggestions)));
        }
    };

    // Model inference is CPU-bound; keep it off the async workers
    let semantic = match &state.semantic {
        Some(index) => {
            let index = Arc::clone(index);
            let query_song = target.clone();
            let limit = recommender.settings().semantic_pool;

            let matches = tokio::task::spawn_blocking(move || index.similar_to(&query_song, limit))
                .await
                .map_err(|e| AppError::Internal(format!("Join error: {e}")))?;
            Some(matches)
        }
        None => None,
    };

    let recommendations: Vec<RecommendedSong> = recommender
        .recommend(target, semantic.as_deref())
        .into_iter()
        .map(RecommendedSong::from)
        .collect();

    debug!(
        target = target.id,
        count = recommendations.len(),
        semantic = semantic.is_some(),
        "Recommendations ready"
    );

    Ok(Json(RecommendResponse::found(target, recommendations)))
}
