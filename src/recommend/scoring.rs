//! Metadata similarity between two songs.
//!
//! Components are added independently and never normalized; the absolute
//! weights below are what callers compare against.

use crate::catalog::Song;

pub const GENRE_EXACT_WEIGHT: f64 = 30.0;
pub const GENRE_PARTIAL_WEIGHT: f64 = 15.0;
pub const LANGUAGE_WEIGHT: f64 = 20.0;
pub const MOOD_WEIGHT: f64 = 15.0;
pub const ENERGY_WEIGHT: f64 = 15.0;
pub const ACOUSTICNESS_WEIGHT: f64 = 10.0;
pub const DANCEABILITY_WEIGHT: f64 = 10.0;

/// (max BPM difference, points), checked in order
const TEMPO_TIERS: [(f64, f64); 3] = [(10.0, 20.0), (20.0, 10.0), (30.0, 5.0)];

/// A candidate paired with its metadata score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredSong<'a> {
    pub song: &'a Song,
    pub score: f64,
}

/// Case-insensitive label equality used for genre and language
pub(crate) fn same_label(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Target mood tokens that overlap some candidate token.
///
/// Two tokens overlap when either contains the other. Order follows the
/// target's mood field.
pub fn shared_moods(target: &Song, candidate: &Song) -> Vec<String> {
    let candidate_moods = candidate.mood_tokens();
    target
        .mood_tokens()
        .into_iter()
        .filter(|mood| {
            candidate_moods
                .iter()
                .any(|m| m.contains(mood.as_str()) || mood.contains(m.as_str()))
        })
        .collect()
}

fn genre_points(target: &Song, candidate: &Song) -> f64 {
    if same_label(&candidate.genre, &target.genre) {
        return GENRE_EXACT_WEIGHT;
    }

    let target_genre = target.genre.to_lowercase();
    let first_word = target_genre.split(' ').next().unwrap_or_default();
    if candidate.genre.to_lowercase().contains(first_word) {
        GENRE_PARTIAL_WEIGHT
    } else {
        0.0
    }
}

fn tempo_points(target: &Song, candidate: &Song) -> f64 {
    let diff = (target.tempo - candidate.tempo).abs();
    TEMPO_TIERS
        .iter()
        .find(|(max_diff, _)| diff <= *max_diff)
        .map_or(0.0, |(_, points)| *points)
}

fn closeness(a: f64, b: f64, weight: f64) -> f64 {
    (1.0 - (a - b).abs()) * weight
}

/// Similarity of `candidate` to `target`; higher is more similar
pub fn metadata_score(target: &Song, candidate: &Song) -> f64 {
    let mut score = genre_points(target, candidate);

    if same_label(&candidate.language, &target.language) {
        score += LANGUAGE_WEIGHT;
    }

    score += shared_moods(target, candidate).len() as f64 * MOOD_WEIGHT;
    score += tempo_points(target, candidate);
    score += closeness(target.energy, candidate.energy, ENERGY_WEIGHT);
    score += closeness(target.acousticness, candidate.acousticness, ACOUSTICNESS_WEIGHT);
    score += closeness(target.danceability, candidate.danceability, DANCEABILITY_WEIGHT);

    score
}

/// Every other song scored against `target`, best first, at most `limit`.
///
/// Equal scores keep dataset order.
pub fn rank_by_metadata<'a>(songs: &'a [Song], target: &Song, limit: usize) -> Vec<ScoredSong<'a>> {
    let mut scored: Vec<ScoredSong<'a>> = songs
        .iter()
        .filter(|song| song.id != target.id)
        .map(|song| ScoredSong {
            song,
            score: metadata_score(target, song),
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(limit);
    scored
}
