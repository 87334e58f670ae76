use serde::{Deserialize, Serialize};

use super::CatalogError;

pub type SongId = u32;

/// A single dataset entry.
///
/// `mood` may hold several comma-separated descriptors, e.g.
/// `"romantic, melancholic"`. `energy`, `acousticness` and `danceability`
/// are normalized to [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub mood: String,
    pub language: String,
    /// Beats per minute, fractional values allowed
    pub tempo: f64,
    pub energy: f64,
    pub acousticness: f64,
    pub danceability: f64,
    #[serde(default)]
    pub lyrics: String,
}

impl Song {
    /// `"<title> by <artist>"`
    pub fn display_name(&self) -> String {
        format!("{} by {}", self.title, self.artist)
    }

    /// Lowercased, trimmed mood tokens in their stored order
    pub fn mood_tokens(&self) -> Vec<String> {
        self.mood
            .to_lowercase()
            .split(',')
            .map(|m| m.trim().to_string())
            .collect()
    }

    pub(super) fn validate(&self) -> Result<(), CatalogError> {
        if !self.tempo.is_finite() || self.tempo < 0.0 {
            return Err(CatalogError::InvalidTempo {
                id: self.id,
                value: self.tempo,
            });
        }

        let unit_fields = [
            ("energy", self.energy),
            ("acousticness", self.acousticness),
            ("danceability", self.danceability),
        ];

        for (field, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(CatalogError::OutOfRange {
                    id: self.id,
                    field,
                    value,
                });
            }
        }

        Ok(())
    }
}
