//! Sentence embedding model backed by fastembed (ONNX Runtime).

use std::sync::Mutex;

use fastembed::{EmbeddingModel, TextEmbedding, TextInitOptions};
use tracing::info;

use super::{InferenceError, TextEmbedder};
use crate::math::normalize_in_place;

/// Mean-pooled sentence embeddings, L2-normalized
pub struct SentenceModel {
    model: Mutex<TextEmbedding>,
    name: String,
}

impl std::fmt::Debug for SentenceModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceModel")
            .field("name", &self.name)
            .finish()
    }
}

impl SentenceModel {
    /// Load (downloading on first use) one of the supported models
    pub fn load(model_id: &str) -> Result<Self, InferenceError> {
        let model = resolve_model(model_id)?;

        info!(model = model_id, "Loading sentence embedding model");

        let options = TextInitOptions::new(model);
        let embedding = TextEmbedding::try_new(options)
            .map_err(|e| InferenceError::ModelInit(e.to_string()))?;

        Ok(Self {
            model: Mutex::new(embedding),
            name: model_id.to_string(),
        })
    }
}

impl TextEmbedder for SentenceModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, InferenceError> {
        let mut model = self
            .model
            .lock()
            .map_err(|e| InferenceError::Embed(format!("Model lock error: {e}")))?;

        let mut outputs = model
            .embed(vec![text], None)
            .map_err(|e| InferenceError::Embed(e.to_string()))?;

        let mut vector = outputs
            .pop()
            .ok_or_else(|| InferenceError::Embed("Model returned no embedding".to_string()))?;

        normalize_in_place(&mut vector);
        Ok(vector)
    }
}

/// Map a Hugging Face model ID onto the models fastembed ships
fn resolve_model(model_id: &str) -> Result<EmbeddingModel, InferenceError> {
    match model_id {
        "sentence-transformers/all-MiniLM-L6-v2" | "Xenova/all-MiniLM-L6-v2" | "all-MiniLM-L6-v2" => {
            Ok(EmbeddingModel::AllMiniLML6V2)
        }
        "sentence-transformers/all-MiniLM-L12-v2" => Ok(EmbeddingModel::AllMiniLML12V2),
        "BAAI/bge-small-en-v1.5" => Ok(EmbeddingModel::BGESmallENV15),
        "BAAI/bge-base-en-v1.5" => Ok(EmbeddingModel::BGEBaseENV15),
        other => Err(InferenceError::UnsupportedModel(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_models() {
        assert!(matches!(
            resolve_model("sentence-transformers/all-MiniLM-L6-v2"),
            Ok(EmbeddingModel::AllMiniLML6V2)
        ));
        assert!(matches!(
            resolve_model("Xenova/all-MiniLM-L6-v2"),
            Ok(EmbeddingModel::AllMiniLML6V2)
        ));
    }

    #[test]
    fn test_resolve_unknown_model() {
        assert!(matches!(
            resolve_model("laion/clap-htsat-unfused"),
            Err(InferenceError::UnsupportedModel(_))
        ));
    }
}
