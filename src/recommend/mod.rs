//! Song recommendation engine.
//!
//! A request flows through target resolution, metadata scoring, an optional
//! semantic ranking, the merger, and finally one explanation per song.

mod merge;
mod reasons;
mod resolver;
mod scoring;

pub use merge::merge_rankings;
pub use reasons::explain;
pub use resolver::{extract_title, TargetResolver};
pub use scoring::{metadata_score, rank_by_metadata, shared_moods, ScoredSong};

use std::sync::Arc;

use tracing::debug;

use crate::catalog::{Catalog, Song};
use crate::config::RecommendConfig;
use crate::inference::SemanticMatch;
use crate::search::FuzzyIndex;

/// Errors surfaced to the chat user
#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    #[error("I couldn't find that song! Try being more specific or check the spelling.")]
    SongNotFound { suggestions: Vec<String> },
}

/// A recommended song with its explanation
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation<'a> {
    pub song: &'a Song,
    pub reason: String,
}

/// Owns the catalog-wide fuzzy index and pool sizes
#[derive(Debug, Clone)]
pub struct Recommender {
    catalog: Arc<Catalog>,
    index: FuzzyIndex,
    settings: RecommendConfig,
}

impl Recommender {
    pub fn new(catalog: Arc<Catalog>, threshold: f64, settings: RecommendConfig) -> Self {
        let index = FuzzyIndex::new(catalog.songs(), threshold);
        Self {
            catalog,
            index,
            settings,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &RecommendConfig {
        &self.settings
    }

    /// The song the user is asking about
    pub fn resolve(
        &self,
        query: Option<&str>,
        title_hint: Option<&str>,
    ) -> Result<&Song, RecommendError> {
        let target = TargetResolver::new(&self.catalog, &self.index).resolve(query, title_hint);

        match target {
            Some(song) => {
                debug!(id = song.id, title = %song.title, "Target song resolved");
                Ok(song)
            }
            None => Err(RecommendError::SongNotFound {
                suggestions: self.catalog.suggestions(self.settings.suggestion_count),
            }),
        }
    }

    /// Songs similar to `target`.
    ///
    /// `semantic` is the semantic ranking when embeddings are available;
    /// `None` means metadata-only mode. Ids unknown to the catalog are skipped.
    pub fn recommend(
        &self,
        target: &Song,
        semantic: Option<&[SemanticMatch]>,
    ) -> Vec<Recommendation<'_>> {
        let metadata: Vec<&Song> =
            rank_by_metadata(self.catalog.songs(), target, self.settings.metadata_pool)
                .into_iter()
                .map(|scored| scored.song)
                .collect();

        let semantic: Option<Vec<&Song>> = semantic.map(|matches| {
            matches
                .iter()
                .filter_map(|m| self.catalog.get(m.id))
                .filter(|song| song.id != target.id)
                .collect()
        });

        let picked = merge_rankings(&metadata, semantic.as_deref(), self.settings.max_results);

        debug!(
            target = target.id,
            metadata_candidates = metadata.len(),
            semantic_candidates = semantic.as_ref().map(Vec::len),
            picked = picked.len(),
            "Recommendations merged"
        );

        picked
            .into_iter()
            .map(|song| Recommendation {
                song,
                reason: explain(target, song),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::DEFAULT_THRESHOLD;
    use std::collections::HashSet;

    fn recommender() -> Recommender {
        let catalog = Arc::new(Catalog::bundled().unwrap());
        Recommender::new(catalog, DEFAULT_THRESHOLD, RecommendConfig::default())
    }

    #[test]
    fn test_metadata_only_recommendations() {
        let recommender = recommender();
        let target = recommender.resolve(Some("songs like Tum Hi Ho"), None).unwrap();
        let recs = recommender.recommend(target, None);

        assert_eq!(recs.len(), 5);
        assert!(recs.iter().all(|r| r.song.id != target.id));

        let expected: Vec<_> = rank_by_metadata(recommender.catalog().songs(), target, 5)
            .iter()
            .map(|s| s.song.id)
            .collect();
        let got: Vec<_> = recs.iter().map(|r| r.song.id).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_semantic_matches_are_blended_in() {
        let recommender = recommender();
        let target = recommender.catalog().get(1).unwrap();
        let metadata = rank_by_metadata(recommender.catalog().songs(), target, 8);

        // A semantic ranking that shares nothing with the metadata top three
        let top_three: HashSet<_> = metadata.iter().take(3).map(|s| s.song.id).collect();
        let semantic: Vec<SemanticMatch> = recommender
            .catalog()
            .songs()
            .iter()
            .rev()
            .filter(|s| s.id != target.id && !top_three.contains(&s.id))
            .take(5)
            .map(|s| SemanticMatch {
                id: s.id,
                similarity: 0.9,
            })
            .collect();

        let recs = recommender.recommend(target, Some(&semantic));
        let got: Vec<_> = recs.iter().map(|r| r.song.id).collect();

        assert_eq!(recs.len(), 5);
        let metadata_head: Vec<_> = metadata.iter().take(3).map(|s| s.song.id).collect();
        assert_eq!(got[..3], metadata_head[..]);
        assert_eq!(got[3..], [semantic[0].id, semantic[1].id]);
    }

    #[test]
    fn test_reasons_attached() {
        let recommender = recommender();
        let target = recommender.catalog().get(1).unwrap();
        let recs = recommender.recommend(target, None);
        for rec in &recs {
            assert_eq!(rec.reason, explain(target, rec.song));
        }
        assert!(recs[0].reason.contains("Hindi song"));
    }

    #[test]
    fn test_not_found_carries_suggestions() {
        let recommender = recommender();
        match recommender.resolve(Some("qqqqzzzzxxxx"), None) {
            Err(RecommendError::SongNotFound { suggestions }) => {
                assert_eq!(suggestions.len(), 5);
                assert_eq!(suggestions[0], "Tum Hi Ho by Arijit Singh");
            }
            Ok(song) => panic!("unexpected match: {}", song.title),
        }
    }

    #[test]
    fn test_unknown_semantic_ids_are_ignored() {
        let recommender = recommender();
        let target = recommender.catalog().get(1).unwrap();
        let semantic = vec![
            SemanticMatch {
                id: 9999,
                similarity: 1.0,
            },
            SemanticMatch {
                id: target.id,
                similarity: 1.0,
            },
        ];
        let with = recommender.recommend(target, Some(&semantic));
        let without = recommender.recommend(target, None);
        assert_eq!(with, without);
    }
}
