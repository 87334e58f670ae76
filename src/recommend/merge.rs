//! Combines the metadata and semantic rankings into one short list.

use std::collections::HashSet;

use crate::catalog::Song;

/// Leading metadata matches that are always considered first
const METADATA_PRIORITY: usize = 3;

/// Leading semantic matches considered after them
const SEMANTIC_PRIORITY: usize = 3;

/// Pick up to `max` unique songs.
///
/// Without a semantic ranking this is the head of the metadata ranking.
/// With one, the order of preference is: the first three metadata matches,
/// the first three semantic matches, then the remaining metadata matches.
pub fn merge_rankings<'a>(
    metadata: &[&'a Song],
    semantic: Option<&[&'a Song]>,
    max: usize,
) -> Vec<&'a Song> {
    let Some(semantic) = semantic else {
        return metadata.iter().take(max).copied().collect();
    };

    let mut seen = HashSet::new();
    let mut merged = Vec::with_capacity(max);

    let prioritized = metadata
        .iter()
        .take(METADATA_PRIORITY)
        .chain(semantic.iter().take(SEMANTIC_PRIORITY));
    for &song in prioritized {
        if seen.insert(song.id) {
            merged.push(song);
        }
    }

    for &song in metadata.iter().skip(METADATA_PRIORITY) {
        if merged.len() >= max {
            break;
        }
        if seen.insert(song.id) {
            merged.push(song);
        }
    }

    merged.truncate(max);
    merged
}
