//! Free-text song search.
//!
//! A query is first scanned for language and mood keywords which narrow the
//! dataset, then whatever text remains is fuzzy-matched against the
//! narrowed set.

mod filters;
mod fuzzy;

pub use filters::{ParsedQuery, LANGUAGE_KEYWORDS, MOOD_KEYWORDS};
pub use fuzzy::{FuzzyIndex, FuzzyMatch, DEFAULT_THRESHOLD};

use tracing::debug;

use crate::catalog::{Catalog, Song};
use crate::config::SearchConfig;

/// Songs found for a query plus the filters that were applied
#[derive(Debug, Clone)]
pub struct SearchOutcome<'a> {
    pub results: Vec<&'a Song>,
    pub language_filter: Option<String>,
    pub mood_filter: Option<String>,
}

/// Search settings shared by every request
#[derive(Debug, Clone)]
pub struct SongSearch {
    threshold: f64,
    max_results: usize,
}

impl Default for SongSearch {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}

impl SongSearch {
    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            threshold: config.threshold,
            max_results: config.max_results,
        }
    }

    pub fn search<'a>(&self, catalog: &'a Catalog, raw_query: &str) -> SearchOutcome<'a> {
        let parsed = ParsedQuery::parse(raw_query);
        let filtered = parsed.apply(catalog.songs());

        let results: Vec<&Song> = if parsed.is_browse() || parsed.terms.is_empty() {
            filtered.into_iter().take(self.max_results).collect()
        } else {
            // Rebuilt per request: the candidate set depends on the filters
            let index = FuzzyIndex::new(filtered.iter().copied(), self.threshold);
            index
                .search(&parsed.terms)
                .into_iter()
                .take(self.max_results)
                .map(|hit| filtered[hit.position])
                .collect()
        };

        debug!(
            query = raw_query,
            language = ?parsed.language,
            mood = ?parsed.mood,
            terms = %parsed.terms,
            results = results.len(),
            "Search completed"
        );

        SearchOutcome {
            results,
            language_filter: parsed.language,
            mood_filter: parsed.mood,
        }
    }
}
