//! Song Explorer
//!
//! Backend of a song recommendation chatbot. Given a song mentioned in a
//! chat message it finds similar songs in a small static catalog, blending
//! metadata similarity with optional text-embedding similarity, and explains
//! each pick.

pub mod catalog;
pub mod config;
pub mod error;
pub mod inference;
pub mod math;
pub mod recommend;
pub mod search;
pub mod server;
pub mod types;

pub use catalog::{Catalog, Song, SongId};
pub use config::AppConfig;
pub use error::AppError;
pub use inference::{SemanticIndex, TextEmbedder};
pub use recommend::{Recommendation, Recommender};
