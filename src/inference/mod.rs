//! Text embeddings for semantic song similarity.
//!
//! The embedding model is optional. When it cannot be loaded, or the crate
//! is built without the `inference` feature, no [`SemanticIndex`] exists and
//! recommendations fall back to metadata scoring alone.

mod index;
#[cfg(feature = "inference")]
mod model;
mod text;

pub use index::{EmbeddingRecord, SemanticIndex, SemanticMatch};
#[cfg(feature = "inference")]
pub use model::SentenceModel;
pub use text::{song_document, song_query};

use std::sync::Arc;

use tracing::{info, warn};

use crate::catalog::{Catalog, SongId};
use crate::config::EmbeddingConfig;
use crate::error::AppError;

/// Something that turns text into a fixed-length vector
pub trait TextEmbedder: Send + Sync {
    /// Model identifier, for logs and health output
    fn name(&self) -> &str;

    fn embed(&self, text: &str) -> Result<Vec<f32>, InferenceError>;
}

/// Inference error types
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("Embedding support not compiled in (enable the `inference` feature)")]
    Unavailable,

    #[error("Unsupported embedding model: {0}")]
    UnsupportedModel(String),

    #[error("Model initialization failed: {0}")]
    ModelInit(String),

    #[error("Embedding failed: {0}")]
    Embed(String),

    #[error("Invalid embedding dimension: expected {expected}, got {got}")]
    InvalidDimension { expected: usize, got: usize },

    #[error("Embedding references unknown song {0}")]
    UnknownSong(SongId),
}

impl From<InferenceError> for AppError {
    fn from(err: InferenceError) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Load the configured model and embed every song.
///
/// Blocking and best-effort: any failure is logged and reported as `None`,
/// which leaves the service in metadata-only mode for its whole lifetime.
pub fn init_semantic_index(config: &EmbeddingConfig, catalog: &Catalog) -> Option<SemanticIndex> {
    if !config.enabled {
        info!("Embeddings disabled by configuration, using metadata-based recommendations only");
        return None;
    }

    info!(model = %config.model, songs = catalog.len(), "Initializing song embeddings");

    let result = load_embedder(&config.model)
        .and_then(|embedder| SemanticIndex::build(embedder, catalog));

    match result {
        Ok(index) => {
            info!(
                records = index.len(),
                dimension = index.dimension(),
                "Embeddings initialized"
            );
            Some(index)
        }
        Err(e) => {
            warn!(error = %e, "Running without embeddings, using metadata-based recommendations only");
            None
        }
    }
}

#[cfg(feature = "inference")]
fn load_embedder(model_id: &str) -> Result<Arc<dyn TextEmbedder>, InferenceError> {
    Ok(Arc::new(SentenceModel::load(model_id)?))
}

#[cfg(not(feature = "inference"))]
fn load_embedder(_model_id: &str) -> Result<Arc<dyn TextEmbedder>, InferenceError> {
    Err(InferenceError::Unavailable)
}
