//! Catalog and health route handlers.

use axum::{extract::State, Json};

use crate::error::AppError;
use crate::types::{HealthResponse, HealthStatus, RandomSongResponse, SongsResponse};

use super::AppState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Health check endpoint
///
/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let embeddings_ready = state.embeddings_ready();

    // Degraded if embeddings were wanted but never came up
    let status = if state.config.embedding.enabled && !embeddings_ready {
        HealthStatus::Degraded
    } else {
        HealthStatus::Healthy
    };

    Json(HealthResponse {
        status,
        version: VERSION.to_string(),
        song_count: state.catalog.len(),
        embeddings_ready,
        embedding_model: state
            .semantic
            .as_ref()
            .map(|index| index.model_name().to_string()),
        uptime_seconds: state.uptime_seconds(),
    })
}

/// GET /api/songs
pub async fn list_songs(State(state): State<AppState>) -> Json<SongsResponse> {
    Json(SongsResponse {
        success: true,
        songs: state.catalog.songs().to_vec(),
    })
}

/// GET /api/random
///
/// One song picked uniformly from the dataset.
pub async fn random_song(State(state): State<AppState>) -> Result<Json<RandomSongResponse>, AppError> {
    let song = state
        .catalog
        .random()
        .ok_or_else(|| AppError::NotFound("Song catalog is empty".to_string()))?;

    Ok(Json(RandomSongResponse {
        success: true,
        song: song.clone(),
    }))
}
