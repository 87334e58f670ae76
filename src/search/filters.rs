//! Language and mood keywords recognised inside free-text searches.

use crate::catalog::Song;

/// Languages that narrow a search when they appear in the query
pub const LANGUAGE_KEYWORDS: [&str; 3] = ["hindi", "marathi", "english"];

/// Moods/genres that narrow a search when they appear in the query
pub const MOOD_KEYWORDS: [&str; 7] = [
    "romantic",
    "energetic",
    "peaceful",
    "party",
    "melancholic",
    "happy",
    "sad",
];

/// Residual terms that mean "just list what the filters matched"
const BROWSE_WORD: &str = "songs";

/// A search query split into filters and leftover search terms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    /// Capitalized language name, e.g. `"Hindi"`
    pub language: Option<String>,
    /// Lowercase mood keyword
    pub mood: Option<String>,
    /// Lowercased query with the recognised keywords removed
    pub terms: String,
}

impl ParsedQuery {
    /// Detect keywords by case-insensitive containment.
    ///
    /// When several keywords of the same kind appear, the last one in keyword
    /// order wins. Each detected keyword is removed once from the terms.
    pub fn parse(raw: &str) -> Self {
        let lowered = raw.to_lowercase();
        let mut terms = lowered.clone();
        let mut language = None;
        let mut mood = None;

        for keyword in LANGUAGE_KEYWORDS {
            if lowered.contains(keyword) {
                language = Some(capitalize(keyword));
                terms = terms.replacen(keyword, "", 1).trim().to_string();
            }
        }

        for keyword in MOOD_KEYWORDS {
            if lowered.contains(keyword) {
                mood = Some(keyword.to_string());
                terms = terms.replacen(keyword, "", 1).trim().to_string();
            }
        }

        Self {
            language,
            mood,
            terms: terms.trim().to_string(),
        }
    }

    pub fn has_filters(&self) -> bool {
        self.language.is_some() || self.mood.is_some()
    }

    /// Filters matched and nothing meaningful is left to fuzzy-search
    pub fn is_browse(&self) -> bool {
        self.has_filters() && (self.terms.is_empty() || self.terms == BROWSE_WORD)
    }

    pub fn matches(&self, song: &Song) -> bool {
        let language_ok = self
            .language
            .as_ref()
            .map_or(true, |language| song.language.to_lowercase() == language.to_lowercase());

        let mood_ok = self.mood.as_ref().map_or(true, |mood| {
            song.mood.to_lowercase().contains(mood.as_str())
                || song.genre.to_lowercase().contains(mood.as_str())
        });

        language_ok && mood_ok
    }

    /// Songs passing both filters, in dataset order
    pub fn apply<'a>(&self, songs: &'a [Song]) -> Vec<&'a Song> {
        songs.iter().filter(|song| self.matches(song)).collect()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
