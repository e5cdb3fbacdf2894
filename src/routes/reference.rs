//! Read-only listings of the reference tables.

use axum::{extract::State, Json};

use crate::errors::{ApiResponse, AppError};
use crate::models::ministry::Ministry;
use crate::models::sale_group::SaleGroup;
use crate::models::zone::Zone;
use crate::services::listing::ReferenceSource;
use crate::AppState;

/// GET /api/ministries — every ministry, active or not.
pub async fn ministries(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Ministry>>>, AppError> {
    let rows = state.db.fetch_ministries().await?;
    Ok(ApiResponse::success(rows))
}

/// GET /api/zones
pub async fn zones(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Zone>>>, AppError> {
    let rows = state.db.fetch_zones().await?;
    Ok(ApiResponse::success(rows))
}

/// GET /api/sale-groups — zone is reported by id only.
pub async fn sale_groups(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<SaleGroup>>>, AppError> {
    let rows = state.db.fetch_sale_groups().await?;
    Ok(ApiResponse::success(rows))
}
