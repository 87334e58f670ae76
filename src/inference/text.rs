//! Text fed to the embedding model.
//!
//! Stored song vectors embed the lyrics snippet as well; the request-time
//! query for a target song uses only its descriptive fields.

use crate::catalog::Song;

/// Text embedded once per song at startup.
///
/// # Format
///
/// ```text
/// <title> <artist> <genre> <mood> <lyrics>
/// ```
pub fn song_document(song: &Song) -> String {
    format!(
        "{} {} {} {} {}",
        song.title, song.artist, song.genre, song.mood, song.lyrics
    )
}

/// Text embedded when a song is the recommendation target
pub fn song_query(song: &Song) -> String {
    format!("{} {} {} {}", song.title, song.artist, song.genre, song.mood)
}
