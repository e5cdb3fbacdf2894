//! Dashboard statistics aggregation queries.

use std::future::Future;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::member::MemberStatus;

/// Width of the "recent registrations" window: a flat 30 days in milliseconds.
pub const RECENT_REGISTRATION_WINDOW_MS: i64 = 30 * 24 * 60 * 60 * 1000;

/// Summary figures for the dashboard, built fresh on every request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total_members: i64,
    pub total_ministries: i64,
    /// No event source is wired yet; always 0.
    pub upcoming_events: i64,
    pub recent_registrations: i64,
}

impl StatsSnapshot {
    /// Snapshot reported when any underlying query fails.
    pub const ZEROED: Self = Self {
        total_members: 0,
        total_ministries: 0,
        upcoming_events: 0,
        recent_registrations: 0,
    };
}

/// Counting queries the dashboard needs from the data layer.
pub trait StatsSource {
    /// Members with status `ACTIVE`.
    fn count_active_members(&self) -> impl Future<Output = Result<i64, AppError>> + Send;

    /// Ministries with `is_active = true`.
    fn count_active_ministries(&self) -> impl Future<Output = Result<i64, AppError>> + Send;

    /// Members with status `ACTIVE` created at or after `since`.
    fn count_active_members_since(
        &self,
        since: DateTime<Utc>,
    ) -> impl Future<Output = Result<i64, AppError>> + Send;
}

impl StatsSource for PgPool {
    async fn count_active_members(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM members WHERE status = $1")
            .bind(MemberStatus::Active)
            .fetch_one(self)
            .await?;
        Ok(count)
    }

    async fn count_active_ministries(&self) -> Result<i64, AppError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM ministries WHERE is_active = true")
                .fetch_one(self)
                .await?;
        Ok(count)
    }

    async fn count_active_members_since(&self, since: DateTime<Utc>) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM members WHERE status = $1 AND created_at >= $2",
        )
        .bind(MemberStatus::Active)
        .bind(since)
        .fetch_one(self)
        .await?;
        Ok(count)
    }
}

/// Lower bound for a member to count as a recent registration.
pub fn recent_registration_threshold(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::milliseconds(RECENT_REGISTRATION_WINDOW_MS)
}

/// Run the three counting queries concurrently and assemble the snapshot.
///
/// The first failing query aborts the join; no partial snapshot is built.
pub async fn get_stats<S>(source: &S, now: DateTime<Utc>) -> Result<StatsSnapshot, AppError>
where
    S: StatsSource + Sync,
{
    let since = recent_registration_threshold(now);

    let (total_members, total_ministries, recent_registrations) = tokio::try_join!(
        source.count_active_members(),
        source.count_active_ministries(),
        source.count_active_members_since(since),
    )?;

    Ok(StatsSnapshot {
        total_members,
        total_ministries,
        upcoming_events: 0,
        recent_registrations,
    })
}
