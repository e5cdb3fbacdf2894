//! Print every ministry with a total count.
//!
//! Usage: `cargo run --bin list_ministries`
//!
//! Requires `DATABASE_URL` (reads .env). Exits non-zero if the query fails.

use std::process::ExitCode;
use std::time::Duration;

use ministry_hub::{db, services::listing};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "ministry_hub=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let Ok(db_url) = std::env::var("DATABASE_URL") else {
        tracing::error!("DATABASE_URL must be set");
        return ExitCode::FAILURE;
    };

    let pool = match db::create_pool(&db_url, 1, Duration::from_secs(5)).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to database");
            return ExitCode::FAILURE;
        }
    };

    let result = db::scoped(pool, |pool| async move {
        let mut stdout = std::io::stdout();
        listing::list_ministries(&pool, &mut stdout).await
    })
    .await;

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Failed to list ministries");
            ExitCode::FAILURE
        }
    }
}
