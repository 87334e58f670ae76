//! Human-readable explanation of why a song was recommended.

use super::scoring::{same_label, shared_moods};
use crate::catalog::Song;

/// Tempo gap, in BPM, still described as similar
const SIMILAR_TEMPO_BPM: f64 = 20.0;

/// Energy gap below which energy is described as similar
const SIMILAR_ENERGY: f64 = 0.2;

/// Comma-joined clauses describing what `song` shares with `target`.
///
/// Clause order is fixed: genre, language, tempo, mood, energy. An empty
/// string means nothing notable is shared.
pub fn explain(target: &Song, song: &Song) -> String {
    let mut clauses = Vec::new();

    if same_label(&song.genre, &target.genre) {
        clauses.push(format!("same {} genre", song.genre));
    }
    if same_label(&song.language, &target.language) {
        clauses.push(format!("{} song", song.language));
    }
    if (song.tempo - target.tempo).abs() <= SIMILAR_TEMPO_BPM {
        clauses.push(format!("similar tempo ({} BPM)", song.tempo));
    }
    if let Some(mood) = shared_moods(target, song).into_iter().next() {
        clauses.push(format!("{mood} vibes"));
    }
    if (song.energy - target.energy).abs() < SIMILAR_ENERGY {
        clauses.push("similar energy".to_string());
    }

    clauses.join(", ")
}
