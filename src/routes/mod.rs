//! Route definitions for the dashboard API.

pub mod dashboard;
pub mod health;
pub mod pages;
pub mod reference;
pub mod uploads;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Assemble the full application router.
pub fn build_router(state: AppState) -> Router {
    let cors = match state.config.frontend_url.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(e) => {
            tracing::warn!(error = %e, url = %state.config.frontend_url, "Invalid FRONTEND_URL; CORS disabled");
            CorsLayer::new()
        }
    };

    let upload_limit = state.config.upload_body_limit();

    let upload_routes = Router::new()
        .route("/uploads/preview", post(uploads::preview))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(upload_limit));

    let api_routes = Router::new()
        .route("/dashboard/stats", get(dashboard::stats))
        .route("/ministries", get(reference::ministries))
        .route("/zones", get(reference::zones))
        .route("/sale-groups", get(reference::sale_groups))
        .merge(upload_routes);

    Router::new()
        .route("/", get(pages::bootstrap))
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .route(
            "/previews/{id}",
            get(uploads::fetch).delete(uploads::revoke),
        )
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
