//! API request and response types for recommendation and search.

use serde::{Deserialize, Serialize};

use crate::catalog::Song;
use crate::recommend::Recommendation;

/// Request for songs similar to the one mentioned in `query`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    /// Chat message, e.g. "songs like Tum Hi Ho"
    #[serde(default)]
    pub query: Option<String>,
    /// Explicit title, tried before the query
    #[serde(default)]
    pub song_title: Option<String>,
}

/// Summary of the song recommendations are based on
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TargetSongSummary {
    pub title: String,
    pub artist: String,
    pub mood: String,
}

impl From<&Song> for TargetSongSummary {
    fn from(song: &Song) -> Self {
        Self {
            title: song.title.clone(),
            artist: song.artist.clone(),
            mood: song.mood.clone(),
        }
    }
}

/// A song record plus the reason it was picked
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendedSong {
    #[serde(flatten)]
    pub song: Song,
    pub reason: String,
}

impl From<Recommendation<'_>> for RecommendedSong {
    fn from(rec: Recommendation<'_>) -> Self {
        Self {
            song: rec.song.clone(),
            reason: rec.reason,
        }
    }
}

/// Response to a recommendation request.
///
/// A successful response carries `targetSong` and `recommendations`; an
/// unresolved song carries `message` and `suggestions` instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_song: Option<TargetSongSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<RecommendedSong>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

impl RecommendResponse {
    pub fn found(target: &Song, recommendations: Vec<RecommendedSong>) -> Self {
        Self {
            success: true,
            target_song: Some(target.into()),
            recommendations: Some(recommendations),
            message: None,
            suggestions: None,
        }
    }

    pub fn not_found(message: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self {
            success: false,
            target_song: None,
            recommendations: None,
            message: Some(message.into()),
            suggestions: Some(suggestions),
        }
    }
}

/// Free-text search request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub success: bool,
    pub results: Vec<Song>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood_filter: Option<String>,
}

/// The full dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongsResponse {
    pub success: bool,
    pub songs: Vec<Song>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomSongResponse {
    pub success: bool,
    pub song: Song,
}
