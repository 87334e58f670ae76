use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
///
/// All settings can be configured via environment variables with the `SONGBOT_` prefix.
/// For example: `SONGBOT_SERVER__PORT=3000`, `SONGBOT_EMBEDDING__ENABLED=false`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Song dataset configuration
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Embedding model configuration
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Recommendation pool sizes
    #[serde(default)]
    pub recommend: RecommendConfig,

    /// Free-text search configuration
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory with the chat UI, served at `/` when set
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl ServerConfig {
    /// Returns the socket address for binding the server
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetConfig {
    /// JSON file replacing the bundled dataset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingConfig {
    /// Try to load the embedding model at startup
    #[serde(default = "default_embedding_enabled")]
    pub enabled: bool,

    /// Sentence embedding model (Hugging Face model ID)
    #[serde(default = "default_embedding_model")]
    pub model: String,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            enabled: default_embedding_enabled(),
            model: default_embedding_model(),
        }
    }
}

fn default_embedding_enabled() -> bool {
    true
}

fn default_embedding_model() -> String {
    "sentence-transformers/all-MiniLM-L6-v2".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendConfig {
    /// How many metadata matches feed the merger
    #[serde(default = "default_metadata_pool")]
    pub metadata_pool: usize,

    /// How many semantic matches feed the merger
    #[serde(default = "default_semantic_pool")]
    pub semantic_pool: usize,

    /// Upper bound on recommendations per response
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Songs offered when the target cannot be found
    #[serde(default = "default_suggestion_count")]
    pub suggestion_count: usize,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            metadata_pool: default_metadata_pool(),
            semantic_pool: default_semantic_pool(),
            max_results: default_max_results(),
            suggestion_count: default_suggestion_count(),
        }
    }
}

fn default_metadata_pool() -> usize {
    8
}

fn default_semantic_pool() -> usize {
    5
}

fn default_max_results() -> usize {
    5
}

fn default_suggestion_count() -> usize {
    5
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Fuzzy match cutoff, 0.0 (exact) to 1.0 (anything)
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Maximum songs returned by a search
    #[serde(default = "default_search_limit")]
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            max_results: default_search_limit(),
        }
    }
}

fn default_threshold() -> f64 {
    0.4
}

fn default_search_limit() -> usize {
    10
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables should be prefixed with `SONGBOT_` and use
    /// double underscores for nested values:
    /// - `SONGBOT_SERVER__PORT` -> server.port
    /// - `SONGBOT_DATASET__PATH` -> dataset.path
    /// - `SONGBOT_EMBEDDING__ENABLED` -> embedding.enabled
    /// - `SONGBOT_SEARCH__THRESHOLD` -> search.threshold
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("SONGBOT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
