//! Image upload checks and revocable preview references.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use uuid::Uuid;

/// Declared MIME types accepted for image uploads.
pub const ACCEPTED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/webp"];

const BYTES_PER_MB: f64 = 1_048_576.0;

/// Path prefix under which preview references are served.
pub const PREVIEW_PREFIX: &str = "/previews/";

/// A file offered for upload, as declared by the client.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl CandidateFile {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// True iff the declared type is one of the accepted image types. Content is not sniffed.
pub fn is_valid_image_type(file: &CandidateFile) -> bool {
    file.content_type
        .as_deref()
        .is_some_and(|t| ACCEPTED_IMAGE_TYPES.contains(&t))
}

/// Size in megabytes, unrounded. Enforcing an upper bound is up to the caller.
pub fn file_size_mb(file: &CandidateFile) -> f64 {
    file.size() as f64 / BYTES_PER_MB
}

/// Default lifetime of an unrevoked preview.
pub const DEFAULT_PREVIEW_TTL: Duration = Duration::from_secs(15 * 60);

/// Default number of previews held at once.
pub const DEFAULT_MAX_PREVIEWS: usize = 256;

/// Registered preview content.
#[derive(Debug, Clone)]
pub struct Preview {
    pub content_type: String,
    pub bytes: Bytes,
    pub created_at: Instant,
}

impl Preview {
    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.duration_since(self.created_at) >= ttl
    }
}

/// Preview references live here until revoked, expired, or evicted.
///
/// At most `max_entries` previews are held; registering past the cap evicts
/// the oldest. Entries older than `ttl` are no longer served and are dropped
/// by the next registration or sweep.
#[derive(Debug, Clone)]
pub struct PreviewRegistry {
    previews: Arc<RwLock<HashMap<Uuid, Preview>>>,
    max_entries: usize,
    ttl: Duration,
}

impl Default for PreviewRegistry {
    fn default() -> Self {
        Self::with_limits(DEFAULT_MAX_PREVIEWS, DEFAULT_PREVIEW_TTL)
    }
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(max_entries: usize, ttl: Duration) -> Self {
        Self {
            previews: Arc::new(RwLock::new(HashMap::new())),
            max_entries: max_entries.max(1),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Register the file and return its preview reference.
    pub async fn create_preview_url(&self, file: &CandidateFile) -> String {
        let id = Uuid::new_v4();
        let now = Instant::now();
        let preview = Preview {
            content_type: file
                .content_type
                .clone()
                .unwrap_or_else(|| "application/octet-stream".to_string()),
            bytes: file.bytes.clone(),
            created_at: now,
        };

        let mut previews = self.previews.write().await;
        previews.retain(|_, p| !p.is_expired(now, self.ttl));
        while previews.len() >= self.max_entries {
            let oldest = previews
                .iter()
                .min_by_key(|(_, p)| p.created_at)
                .map(|(id, _)| *id);
            let Some(oldest) = oldest else { break };
            previews.remove(&oldest);
            tracing::debug!(preview_id = %oldest, "Evicted oldest upload preview");
        }
        previews.insert(id, preview);

        format!("{PREVIEW_PREFIX}{id}")
    }

    /// Revoke `previous` (if any) and register `file` in its place.
    pub async fn replace_preview_url(&self, previous: Option<&str>, file: &CandidateFile) -> String {
        if let Some(previous) = previous {
            self.revoke(previous).await;
        }
        self.create_preview_url(file).await
    }

    /// Look up a live preview. Expired entries are treated as gone.
    pub async fn get(&self, id: Uuid) -> Option<Preview> {
        let now = Instant::now();
        self.previews
            .read()
            .await
            .get(&id)
            .filter(|p| !p.is_expired(now, self.ttl))
            .cloned()
    }

    /// Release a reference given as a full preview URL or a bare id.
    /// Returns false when nothing was registered under it.
    pub async fn revoke(&self, reference: &str) -> bool {
        let Some(id) = parse_reference(reference) else {
            return false;
        };
        self.previews.write().await.remove(&id).is_some()
    }

    /// Drop every expired preview. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut previews = self.previews.write().await;
        let before = previews.len();
        previews.retain(|_, p| !p.is_expired(now, self.ttl));
        before - previews.len()
    }

    /// Periodically purge expired previews until the returned task is aborted.
    pub fn spawn_sweeper(&self, period: Duration) -> JoinHandle<()> {
        let registry = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let purged = registry.purge_expired().await;
                if purged > 0 {
                    tracing::debug!(purged, "Purged expired upload previews");
                }
            }
        })
    }

    pub async fn len(&self) -> usize {
        self.previews.read().await.len()
    }
}

fn parse_reference(reference: &str) -> Option<Uuid> {
    let raw = reference.strip_prefix(PREVIEW_PREFIX).unwrap_or(reference);
    Uuid::parse_str(raw).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(content_type: Option<&str>, size: usize) -> CandidateFile {
        CandidateFile {
            file_name: Some("photo".to_string()),
            content_type: content_type.map(str::to_string),
            bytes: Bytes::from(vec![0u8; size]),
        }
    }

    #[test]
    fn accepts_listed_image_types() {
        for t in ACCEPTED_IMAGE_TYPES {
            assert!(is_valid_image_type(&candidate(Some(t), 1)), "{t}");
        }
    }

    #[test]
    fn rejects_other_or_missing_types() {
        assert!(!is_valid_image_type(&candidate(Some("application/pdf"), 1)));
        assert!(!is_valid_image_type(&candidate(Some("image/gif"), 1)));
        assert!(!is_valid_image_type(&candidate(Some("IMAGE/PNG"), 1)));
        assert!(!is_valid_image_type(&candidate(Some("image/png; charset=x"), 1)));
        assert!(!is_valid_image_type(&candidate(Some(""), 1)));
        assert!(!is_valid_image_type(&candidate(None, 1)));
    }

    #[test]
    fn size_in_megabytes() {
        assert_eq!(file_size_mb(&candidate(None, 1_048_576)), 1.0);
        assert_eq!(file_size_mb(&candidate(None, 0)), 0.0);
        assert_eq!(file_size_mb(&candidate(None, 524_288)), 0.5);
    }

    #[tokio::test]
    async fn preview_lifecycle() {
        let registry = PreviewRegistry::new();
        let file = candidate(Some("image/png"), 16);

        let url = registry.create_preview_url(&file).await;
        assert!(url.starts_with(PREVIEW_PREFIX));
        let id = parse_reference(&url).unwrap();
        let preview = registry.get(id).await.unwrap();
        assert_eq!(preview.content_type, "image/png");
        assert_eq!(preview.bytes.len(), 16);

        assert!(registry.revoke(&url).await);
        assert!(registry.get(id).await.is_none());
        assert!(!registry.revoke(&url).await);
        assert_eq!(registry.len().await, 0);
    }

    #[tokio::test]
    async fn each_file_gets_its_own_reference() {
        let registry = PreviewRegistry::new();
        let file = candidate(Some("image/webp"), 4);
        let first = registry.create_preview_url(&file).await;
        let second = registry.create_preview_url(&file).await;
        assert_ne!(first, second);
        assert_eq!(registry.len().await, 2);
    }

    #[tokio::test]
    async fn replacing_revokes_previous_reference() {
        let registry = PreviewRegistry::new();
        let first = registry
            .create_preview_url(&candidate(Some("image/png"), 2))
            .await;
        let second = registry
            .replace_preview_url(Some(&first), &candidate(Some("image/jpeg"), 3))
            .await;

        assert_eq!(registry.len().await, 1);
        assert!(!registry.revoke(&first).await);
        assert!(registry.revoke(&second).await);
    }

    #[tokio::test]
    async fn revoke_accepts_bare_id_and_ignores_garbage() {
        let registry = PreviewRegistry::new();
        let url = registry
            .create_preview_url(&candidate(Some("image/jpg"), 1))
            .await;
        let bare = url.trim_start_matches(PREVIEW_PREFIX).to_string();

        assert!(!registry.revoke("not-a-reference").await);
        assert!(registry.revoke(&bare).await);
    }

    #[tokio::test]
    async fn registering_past_cap_evicts_oldest() {
        let registry = PreviewRegistry::with_limits(2, DEFAULT_PREVIEW_TTL);
        let first = registry
            .create_preview_url(&candidate(Some("image/png"), 1))
            .await;
        tokio::time::sleep(Duration::from_millis(2)).await;
        let second = registry
            .create_preview_url(&candidate(Some("image/png"), 1))
            .await;
        tokio::time::sleep(Duration::from_millis(2)).await;
        let third = registry
            .create_preview_url(&candidate(Some("image/png"), 1))
            .await;

        assert_eq!(registry.len().await, 2);
        assert!(registry.get(parse_reference(&first).unwrap()).await.is_none());
        assert!(registry.get(parse_reference(&second).unwrap()).await.is_some());
        assert!(registry.get(parse_reference(&third).unwrap()).await.is_some());
    }

    #[tokio::test]
    async fn many_unrevoked_uploads_stay_within_cap() {
        let registry = PreviewRegistry::with_limits(16, DEFAULT_PREVIEW_TTL);
        let file = candidate(Some("image/webp"), 8);
        for _ in 0..1_000 {
            registry.create_preview_url(&file).await;
        }
        assert_eq!(registry.len().await, 16);
    }

    #[tokio::test]
    async fn expired_preview_is_not_served_and_gets_purged() {
        let registry = PreviewRegistry::with_limits(8, Duration::from_millis(30));
        let url = registry
            .create_preview_url(&candidate(Some("image/jpeg"), 4))
            .await;
        let id = parse_reference(&url).unwrap();
        assert!(registry.get(id).await.is_some());

        tokio::time::sleep(Duration::from_millis(60)).await;

        assert!(registry.get(id).await.is_none());
        assert_eq!(registry.purge_expired().await, 1);
        assert_eq!(registry.len().await, 0);
    }

    #[tokio::test]
    async fn sweeper_releases_expired_previews() {
        let registry = PreviewRegistry::with_limits(8, Duration::from_millis(20));
        registry
            .create_preview_url(&candidate(Some("image/png"), 4))
            .await;
        let sweeper = registry.spawn_sweeper(Duration::from_millis(10));

        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(registry.len().await, 0);
        sweeper.abort();
    }
}
