//! Typo-tolerant lookup over the searchable text fields of songs.
//!
//! Scores follow the usual fuzzy-search convention: 0.0 is a perfect match
//! and 1.0 is no resemblance at all. A song matches when its best field
//! scores at or below the configured threshold.
//!
//! Only a field equal to the query scores 0.0. A query found inside a longer
//! field scores slightly above that, more so the more of the field is left
//! unmatched, so a song titled exactly "Happy" beats one whose mood merely
//! mentions it.

use strsim::normalized_levenshtein;

use crate::catalog::{Song, SongId};

/// Default match cutoff
pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// Highest score a substring hit can get, reached as the unmatched share of
/// the field approaches the whole field
const SUBSTRING_PENALTY: f64 = 0.1;

/// One ranked hit. `position` is the song's position in the slice the
/// index was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch {
    pub position: usize,
    pub id: SongId,
    pub score: f64,
}

#[derive(Debug, Clone)]
struct IndexedSong {
    id: SongId,
    fields: [String; 5],
}

/// Precomputed lowercase field text for a fixed set of songs
#[derive(Debug, Clone)]
pub struct FuzzyIndex {
    entries: Vec<IndexedSong>,
    threshold: f64,
}

impl FuzzyIndex {
    pub fn new<'a>(songs: impl IntoIterator<Item = &'a Song>, threshold: f64) -> Self {
        let entries = songs
            .into_iter()
            .map(|song| IndexedSong {
                id: song.id,
                fields: [
                    song.title.to_lowercase(),
                    song.artist.to_lowercase(),
                    song.genre.to_lowercase(),
                    song.mood.to_lowercase(),
                    song.lyrics.to_lowercase(),
                ],
            })
            .collect();

        Self { entries, threshold }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All songs scoring within the threshold, best first.
    ///
    /// Equal scores keep index order.
    pub fn search(&self, query: &str) -> Vec<FuzzyMatch> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        let query_chars: Vec<char> = query.chars().collect();

        let mut matches: Vec<FuzzyMatch> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(position, entry)| {
                let score = entry
                    .fields
                    .iter()
                    .map(|field| field_score(&query, &query_chars, field))
                    .fold(1.0, f64::min);

                (score <= self.threshold).then_some(FuzzyMatch {
                    position,
                    id: entry.id,
                    score,
                })
            })
            .collect();

        matches.sort_by(|a, b| a.score.total_cmp(&b.score));
        matches
    }

    /// Best match, if any
    pub fn best(&self, query: &str) -> Option<FuzzyMatch> {
        self.search(query).into_iter().next()
    }
}

/// Distance between the query and the closest stretch of `field`.
///
/// Exact field matches score 0.0 and substring hits stay under
/// [`SUBSTRING_PENALTY`]. Otherwise every window of the field whose length is
/// within one character of the query is compared.
fn field_score(query: &str, query_chars: &[char], field: &str) -> f64 {
    if field.is_empty() {
        return 1.0;
    }
    if field == query {
        return 0.0;
    }

    let field_chars: Vec<char> = field.chars().collect();
    let query_len = query_chars.len();

    if field.contains(query) {
        let unmatched = (field_chars.len() - query_len) as f64 / field_chars.len() as f64;
        return SUBSTRING_PENALTY * unmatched;
    }

    if field_chars.len() <= query_len + 1 {
        return 1.0 - normalized_levenshtein(query, field);
    }

    let mut best = 0.0f64;
    for window_len in query_len.saturating_sub(1).max(1)..=query_len + 1 {
        for window in field_chars.windows(window_len) {
            let candidate: String = window.iter().collect();
            best = best.max(normalized_levenshtein(query, &candidate));
        }
    }

    1.0 - best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::song;

    fn sample() -> Vec<Song> {
        let mut tum_hi_ho = song(1, "Tum Hi Ho");
        tum_hi_ho.artist = "Arijit Singh".to_string();
        let mut perfect = song(2, "Perfect");
        perfect.artist = "Ed Sheeran".to_string();
        let mut zingaat = song(3, "Zingaat");
        zingaat.lyrics = "the whole village loses itself in celebration".to_string();
        vec![tum_hi_ho, perfect, zingaat]
    }

    #[test]
    fn test_exact_title_scores_zero() {
        let songs = sample();
        let index = FuzzyIndex::new(&songs, DEFAULT_THRESHOLD);
        let best = index.best("Tum Hi Ho").unwrap();
        assert_eq!(best.id, 1);
        assert_eq!(best.score, 0.0);
    }

    #[test]
    fn test_typo_still_matches() {
        let songs = sample();
        let index = FuzzyIndex::new(&songs, DEFAULT_THRESHOLD);
        let best = index.best("perfcet").unwrap();
        assert_eq!(best.id, 2);
        assert!(best.score > 0.0 && best.score <= DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_matches_other_fields() {
        let songs = sample();
        let index = FuzzyIndex::new(&songs, DEFAULT_THRESHOLD);
        assert_eq!(index.best("sheeran").unwrap().id, 2);
        assert_eq!(index.best("village").unwrap().id, 3);
    }

    #[test]
    fn test_unrelated_query_has_no_match() {
        let songs = sample();
        let index = FuzzyIndex::new(&songs, DEFAULT_THRESHOLD);
        assert!(index.search("xqzvwk").is_empty());
        assert!(index.search("   ").is_empty());
    }

    #[test]
    fn test_ties_keep_index_order() {
        let songs = vec![song(10, "Same"), song(11, "Same")];
        let index = FuzzyIndex::new(&songs, DEFAULT_THRESHOLD);
        let ids: Vec<_> = index.search("same").iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![10, 11]);
    }

    #[test]
    fn test_whole_title_beats_mood_mention() {
        // The earlier song only mentions the word inside its mood
        let mut kesariya = song(1, "Kesariya");
        kesariya.mood = "romantic, happy, dreamy".to_string();
        let mut happy = song(2, "Happy");
        happy.mood = "upbeat".to_string();
        let songs = vec![kesariya, happy];

        let index = FuzzyIndex::new(&songs, DEFAULT_THRESHOLD);
        let hits = index.search("happy");
        assert_eq!(hits[0].id, 2);
        assert_eq!(hits[0].score, 0.0);
        assert_eq!(hits[1].id, 1);
        assert!(hits[1].score > 0.0 && hits[1].score < SUBSTRING_PENALTY);
    }

    #[test]
    fn test_substring_score_grows_with_unmatched_text() {
        let query = "perfect";
        let chars: Vec<char> = query.chars().collect();
        let short = field_score(query, &chars, "perfect day");
        let long = field_score(query, &chars, "you look perfect tonight under the stars");
        assert!(short > 0.0);
        assert!(short < long);
        assert!(long < SUBSTRING_PENALTY);
    }

    #[test]
    fn test_field_score_windows() {
        let query = "tum hi hoo";
        let chars: Vec<char> = query.chars().collect();
        let score = field_score(query, &chars, "the ballad tum hi ho returns");
        assert!(score > 0.0 && score < 0.2);
    }
}
