use std::env;
use std::time::Duration;

const DEFAULT_MAX_UPLOAD_MB: f64 = 5.0;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub database_acquire_timeout_secs: u64,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
    pub max_upload_mb: f64,
    pub preview_ttl_secs: u64,
    pub preview_max_entries: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            database_acquire_timeout_secs: env::var("DATABASE_ACQUIRE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
            host: env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("BACKEND_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            max_upload_mb: parse_upload_mb(env::var("MAX_UPLOAD_MB").ok().as_deref()),
            preview_ttl_secs: env::var("PREVIEW_TTL_SECS")
                .unwrap_or_else(|_| "900".to_string())
                .parse::<u64>()
                .unwrap_or(900)
                .max(1),
            preview_max_entries: env::var("PREVIEW_MAX_ENTRIES")
                .unwrap_or_else(|_| "256".to_string())
                .parse::<usize>()
                .unwrap_or(256)
                .max(1),
        })
    }

    /// Upload ceiling in MB; non-finite or negative values mean the default.
    pub fn upload_limit_mb(&self) -> f64 {
        if self.max_upload_mb.is_finite() && self.max_upload_mb >= 0.0 {
            self.max_upload_mb
        } else {
            DEFAULT_MAX_UPLOAD_MB
        }
    }

    /// Request body ceiling for upload routes, leaving room for multipart framing.
    pub fn upload_body_limit(&self) -> usize {
        // `as` saturates for out-of-range floats
        ((self.upload_limit_mb() * 1_048_576.0) as usize).saturating_add(64 * 1024)
    }

    pub fn preview_ttl(&self) -> Duration {
        Duration::from_secs(self.preview_ttl_secs.max(1))
    }
}

/// Parse `MAX_UPLOAD_MB`, falling back to the default for missing, non-finite or negative values.
fn parse_upload_mb(raw: Option<&str>) -> f64 {
    raw.and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|mb| mb.is_finite() && *mb >= 0.0)
        .unwrap_or(DEFAULT_MAX_UPLOAD_MB)
}
