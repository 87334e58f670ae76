//! Static song catalog.
//!
//! The dataset is loaded once at startup and never mutated afterwards; every
//! request borrows songs from the same [`Catalog`].

mod song;

pub use song::{Song, SongId};

use std::collections::{HashMap, HashSet};
use std::path::Path;

use rand::seq::IndexedRandom;
use tracing::info;

/// Dataset compiled into the binary, used unless `dataset.path` is configured
pub const BUNDLED_DATASET: &str = include_str!("../../data/songs.json");

/// Errors raised while loading the dataset
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read dataset file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Dataset contains no songs")]
    Empty,

    #[error("Duplicate song id: {0}")]
    DuplicateId(SongId),

    #[error("Song {id} has tempo {value}, expected a non-negative BPM")]
    InvalidTempo { id: SongId, value: f64 },

    #[error("Song {id} has {field} = {value}, expected a value in [0, 1]")]
    OutOfRange {
        id: SongId,
        field: &'static str,
        value: f64,
    },
}

/// Immutable, ordered collection of songs.
///
/// Dataset order is significant: it breaks ranking ties and decides which
/// songs are offered as suggestions.
#[derive(Debug, Clone)]
pub struct Catalog {
    songs: Vec<Song>,
    by_id: HashMap<SongId, usize>,
}

impl Catalog {
    /// Build a catalog from already-parsed songs, validating dataset invariants
    pub fn new(songs: Vec<Song>) -> Result<Self, CatalogError> {
        if songs.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut by_id = HashMap::with_capacity(songs.len());
        for (index, song) in songs.iter().enumerate() {
            song.validate()?;
            if by_id.insert(song.id, index).is_some() {
                return Err(CatalogError::DuplicateId(song.id));
            }
        }

        Ok(Self { songs, by_id })
    }

    /// Parse a JSON array of songs
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let songs: Vec<Song> = serde_json::from_str(json)?;
        Self::new(songs)
    }

    /// Load the dataset from a JSON file
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The dataset shipped with the binary
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_DATASET)
    }

    /// Load from `path` if given, otherwise fall back to the bundled dataset
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        let catalog = match path {
            Some(path) => Self::from_path(path)?,
            None => Self::bundled()?,
        };

        let languages: HashSet<&str> = catalog.songs.iter().map(|s| s.language.as_str()).collect();
        info!(
            songs = catalog.len(),
            languages = languages.len(),
            source = %path.map_or_else(|| "bundled".to_string(), |p| p.display().to_string()),
            "Dataset loaded"
        );

        Ok(catalog)
    }

    /// All songs in dataset order
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn get(&self, id: SongId) -> Option<&Song> {
        self.by_id.get(&id).map(|&index| &self.songs[index])
    }

    pub fn contains(&self, id: SongId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// A uniformly random song
    pub fn random(&self) -> Option<&Song> {
        self.songs.choose(&mut rand::rng())
    }

    /// `"<title> by <artist>"` for the first `count` songs
    pub fn suggestions(&self, count: usize) -> Vec<String> {
        self.songs.iter().take(count).map(Song::display_name).collect()
    }
}
