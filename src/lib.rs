pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;

use sqlx::PgPool;

use crate::services::upload::PreviewRegistry;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: config::AppConfig,
    pub previews: PreviewRegistry,
}

impl AppState {
    pub fn new(db: PgPool, config: config::AppConfig) -> Self {
        let previews = PreviewRegistry::with_limits(config.preview_max_entries, config.preview_ttl());
        Self {
            db,
            config,
            previews,
        }
    }
}
