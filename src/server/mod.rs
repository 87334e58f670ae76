//! HTTP server setup and routing.

mod extractors;
mod recommend;
mod routes;
mod search;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::inference::SemanticIndex;
use crate::recommend::Recommender;
use crate::search::SongSearch;

pub use extractors::{JsonBody, JsonBodyRejection};

/// Shared application state passed to all handlers.
///
/// Everything here is read-only once the server starts.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub catalog: Arc<Catalog>,
    pub recommender: Arc<Recommender>,
    pub search: SongSearch,
    /// Present only when embeddings initialized successfully
    pub semantic: Option<Arc<SemanticIndex>>,
    /// Server start time for uptime calculation
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: AppConfig, catalog: Catalog) -> Self {
        let catalog = Arc::new(catalog);
        let recommender = Recommender::new(
            Arc::clone(&catalog),
            config.search.threshold,
            config.recommend.clone(),
        );

        Self {
            search: SongSearch::from_config(&config.search),
            config: Arc::new(config),
            catalog,
            recommender: Arc::new(recommender),
            semantic: None,
            started_at: Instant::now(),
        }
    }

    /// Enable semantic recommendations
    pub fn with_semantic(mut self, index: SemanticIndex) -> Self {
        self.semantic = Some(Arc::new(index));
        self
    }

    pub fn embeddings_ready(&self) -> bool {
        self.semantic.is_some()
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

/// Creates the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(routes::health))
        .route("/songs", get(routes::list_songs))
        .route("/random", get(routes::random_song))
        .route("/recommend", post(recommend::recommend))
        .route("/search", post(search::search));

    let mut app = Router::new().nest("/api", api_routes);

    // Chat UI, when one is configured
    if let Some(dir) = &state.config.server.static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
