//! Finds the song a chat message is talking about.

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::{Catalog, Song};
use crate::search::FuzzyIndex;

/// Phrasings that wrap a song name, tried in order
static TITLE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)songs?\s+like\s+(.+)",
        r"(?i)similar\s+to\s+(.+)",
        r"(?i)recommend.*like\s+(.+)",
        r"(?i)find.*like\s+(.+)",
        r"(?i)(.+)\s+type\s+songs?",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("title pattern is a valid regex"))
    .collect()
});

/// The song name inside a request such as "songs like Tum Hi Ho".
///
/// Returns the query unchanged when no phrasing matches.
pub fn extract_title(query: &str) -> &str {
    TITLE_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(query).and_then(|caps| caps.get(1)))
        .map_or(query, |capture| capture.as_str().trim())
}

/// Resolves free text to a single catalog entry
pub struct TargetResolver<'a> {
    catalog: &'a Catalog,
    index: &'a FuzzyIndex,
}

impl<'a> TargetResolver<'a> {
    /// `index` must have been built over `catalog.songs()` in order
    pub fn new(catalog: &'a Catalog, index: &'a FuzzyIndex) -> Self {
        Self { catalog, index }
    }

    /// Best fuzzy match for an explicit title hint, else for the song name
    /// extracted from the query. Blank inputs are ignored.
    pub fn resolve(&self, query: Option<&str>, title_hint: Option<&str>) -> Option<&'a Song> {
        let non_blank = |s: &&str| !s.trim().is_empty();

        title_hint
            .filter(non_blank)
            .and_then(|hint| self.lookup(hint))
            .or_else(|| {
                query
                    .filter(non_blank)
                    .and_then(|query| self.lookup(extract_title(query)))
            })
    }

    fn lookup(&self, text: &str) -> Option<&'a Song> {
        self.index
            .best(text)
            .and_then(|hit| self.catalog.songs().get(hit.position))
    }
}
