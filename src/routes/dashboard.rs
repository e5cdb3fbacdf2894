//! Dashboard routes: summary statistics for the overview page.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;

use crate::errors::AppError;
use crate::services::dashboard::{self, StatsSnapshot};
use crate::AppState;

/// Message returned to clients when statistics cannot be computed.
pub const STATS_FAILURE_MESSAGE: &str = "Failed to fetch statistics";

/// Response body of the statistics endpoint.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum StatsBody {
    Success { success: bool, stats: StatsSnapshot },
    Failure { error: String, stats: StatsSnapshot },
}

/// Turn an aggregation result into the endpoint's response.
///
/// Failures are logged and reported as a zeroed snapshot with a 500 status.
pub fn stats_response(result: Result<StatsSnapshot, AppError>) -> Response {
    match result {
        Ok(stats) => Json(StatsBody::Success {
            success: true,
            stats,
        })
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch dashboard statistics");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(StatsBody::Failure {
                    error: STATS_FAILURE_MESSAGE.to_string(),
                    stats: StatsSnapshot::ZEROED,
                }),
            )
                .into_response()
        }
    }
}

/// GET /api/dashboard/stats — member, ministry and registration counts.
pub async fn stats(State(state): State<AppState>) -> Response {
    stats_response(dashboard::get_stats(&state.db, Utc::now()).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn success_envelope() {
        let response = stats_response(Ok(StatsSnapshot {
            total_members: 12,
            total_ministries: 4,
            upcoming_events: 0,
            recent_registrations: 3,
        }));
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["stats"]["totalMembers"], 12);
        assert_eq!(json["stats"]["totalMinistries"], 4);
        assert_eq!(json["stats"]["upcomingEvents"], 0);
        assert_eq!(json["stats"]["recentRegistrations"], 3);
        assert!(json.get("error").is_none());
    }

    #[tokio::test]
    async fn failure_envelope_is_zeroed_server_error() {
        let response = stats_response(Err(AppError::Database(sqlx::Error::PoolTimedOut)));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["error"], STATS_FAILURE_MESSAGE);
        assert_eq!(
            json["stats"],
            serde_json::json!({
                "totalMembers": 0,
                "totalMinistries": 0,
                "upcomingEvents": 0,
                "recentRegistrations": 0
            })
        );
        assert!(json.get("success").is_none());
    }
}
