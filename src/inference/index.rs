//! Precomputed song embeddings and cosine ranking over them.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use super::{song_document, song_query, InferenceError, TextEmbedder};
use crate::catalog::{Catalog, Song, SongId};
use crate::math::cosine_similarity;

/// Embedding of one song's text
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingRecord {
    pub id: SongId,
    pub vector: Vec<f32>,
}

/// A song ranked by semantic closeness to the target
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticMatch {
    pub id: SongId,
    pub similarity: f32,
}

/// Read-only embedding set built once at startup
pub struct SemanticIndex {
    embedder: Arc<dyn TextEmbedder>,
    records: Vec<EmbeddingRecord>,
    dimension: usize,
}

impl fmt::Debug for SemanticIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SemanticIndex")
            .field("model", &self.embedder.name())
            .field("records", &self.records.len())
            .field("dimension", &self.dimension)
            .finish()
    }
}

impl SemanticIndex {
    /// Embed every song of the catalog, in dataset order
    pub fn build(embedder: Arc<dyn TextEmbedder>, catalog: &Catalog) -> Result<Self, InferenceError> {
        let mut records = Vec::with_capacity(catalog.len());
        for song in catalog.songs() {
            let vector = embedder.embed(&song_document(song))?;
            debug!(id = song.id, title = %song.title, "Song embedded");
            records.push(EmbeddingRecord {
                id: song.id,
                vector,
            });
        }

        Self::from_records(embedder, records, catalog)
    }

    /// Wrap precomputed records.
    ///
    /// Every record must reference a catalog song and all vectors must share
    /// one dimension.
    pub fn from_records(
        embedder: Arc<dyn TextEmbedder>,
        records: Vec<EmbeddingRecord>,
        catalog: &Catalog,
    ) -> Result<Self, InferenceError> {
        let dimension = records.first().map_or(0, |r| r.vector.len());

        for record in &records {
            if !catalog.contains(record.id) {
                return Err(InferenceError::UnknownSong(record.id));
            }
            if record.vector.len() != dimension {
                return Err(InferenceError::InvalidDimension {
                    expected: dimension,
                    got: record.vector.len(),
                });
            }
        }

        Ok(Self {
            embedder,
            records,
            dimension,
        })
    }

    pub fn model_name(&self) -> &str {
        self.embedder.name()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn vector(&self, id: SongId) -> Option<&[f32]> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.vector.as_slice())
    }

    /// Vector describing the target song.
    ///
    /// Embeds the target's descriptive text; if the model fails at request
    /// time the stored vector for the song is used instead.
    pub fn query_vector(&self, target: &Song) -> Option<Vec<f32>> {
        match self.embedder.embed(&song_query(target)) {
            Ok(vector) if vector.len() == self.dimension => Some(vector),
            Ok(vector) => {
                warn!(
                    expected = self.dimension,
                    got = vector.len(),
                    "Query embedding has wrong dimension, using stored vector"
                );
                self.vector(target.id).map(<[f32]>::to_vec)
            }
            Err(e) => {
                warn!(error = %e, id = target.id, "Query embedding failed, using stored vector");
                self.vector(target.id).map(<[f32]>::to_vec)
            }
        }
    }

    /// Songs most similar to `query`, excluding `exclude`, best first.
    ///
    /// Zero vectors have similarity 0.0. Ties keep dataset order.
    pub fn rank(&self, query: &[f32], exclude: SongId, limit: usize) -> Vec<SemanticMatch> {
        let mut matches: Vec<SemanticMatch> = self
            .records
            .iter()
            .filter(|r| r.id != exclude)
            .map(|r| SemanticMatch {
                id: r.id,
                similarity: cosine_similarity(query, &r.vector),
            })
            .collect();

        matches.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        matches.truncate(limit);
        matches
    }

    /// Query vector for `target` ranked against every other song.
    ///
    /// Blocking: may run the embedding model.
    pub fn similar_to(&self, target: &Song, limit: usize) -> Vec<SemanticMatch> {
        match self.query_vector(target) {
            Some(query) => self.rank(&query, target.id, limit),
            None => Vec::new(),
        }
    }
}
