//! Server-rendered pages.

use axum::response::Html;

use crate::services::bootstrap;

/// GET / — "Redirecting..." placeholder that sends the browser to members or login.
pub async fn bootstrap() -> Html<String> {
    Html(bootstrap::render_bootstrap_page())
}
