//! Full-table listings of the reference tables, for manual inspection.
//!
//! Each writer prints one line per row followed by a single total line.
//! Sale groups are printed with their raw zone id; zones are not joined in.

use std::future::Future;
use std::io::Write;

use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::ministry::Ministry;
use crate::models::sale_group::SaleGroup;
use crate::models::zone::Zone;

/// Full-table reads over the reference entities.
pub trait ReferenceSource {
    fn fetch_ministries(&self) -> impl Future<Output = Result<Vec<Ministry>, AppError>> + Send;

    fn fetch_zones(&self) -> impl Future<Output = Result<Vec<Zone>, AppError>> + Send;

    fn fetch_sale_groups(&self) -> impl Future<Output = Result<Vec<SaleGroup>, AppError>> + Send;
}

impl ReferenceSource for PgPool {
    async fn fetch_ministries(&self) -> Result<Vec<Ministry>, AppError> {
        let rows = sqlx::query_as::<_, Ministry>(
            "SELECT id, name, description, is_active, created_at FROM ministries ORDER BY created_at",
        )
        .fetch_all(self)
        .await?;
        Ok(rows)
    }

    async fn fetch_zones(&self) -> Result<Vec<Zone>, AppError> {
        let rows = sqlx::query_as::<_, Zone>(
            "SELECT id, name, is_active, created_at FROM zones ORDER BY created_at",
        )
        .fetch_all(self)
        .await?;
        Ok(rows)
    }

    async fn fetch_sale_groups(&self) -> Result<Vec<SaleGroup>, AppError> {
        let rows = sqlx::query_as::<_, SaleGroup>(
            r#"
            SELECT id, name, leader_name, zone_id, is_active, created_at
            FROM sale_groups
            ORDER BY created_at
            "#,
        )
        .fetch_all(self)
        .await?;
        Ok(rows)
    }
}

fn io_error(e: std::io::Error) -> AppError {
    AppError::Internal(format!("Failed to write listing: {e}"))
}

pub fn write_ministries<W: Write>(out: &mut W, ministries: &[Ministry]) -> Result<usize, AppError> {
    for m in ministries {
        writeln!(out, "- {} | {} | active: {}", m.id, m.name, m.is_active).map_err(io_error)?;
    }
    writeln!(out, "Total ministries: {}", ministries.len()).map_err(io_error)?;
    Ok(ministries.len())
}

pub fn write_zones<W: Write>(out: &mut W, zones: &[Zone]) -> Result<usize, AppError> {
    for z in zones {
        writeln!(out, "- {} | {} | active: {}", z.id, z.name, z.is_active).map_err(io_error)?;
    }
    writeln!(out, "Total zones: {}", zones.len()).map_err(io_error)?;
    Ok(zones.len())
}

pub fn write_sale_groups<W: Write>(out: &mut W, groups: &[SaleGroup]) -> Result<usize, AppError> {
    for g in groups {
        writeln!(
            out,
            "- {} | {} | leader: {} | zone: {} | active: {}",
            g.id, g.name, g.leader_name, g.zone_id, g.is_active
        )
        .map_err(io_error)?;
    }
    writeln!(out, "Total sale groups: {}", groups.len()).map_err(io_error)?;
    Ok(groups.len())
}

/// Fetch and print every ministry. Returns the row count.
pub async fn list_ministries<S, W>(source: &S, out: &mut W) -> Result<usize, AppError>
where
    S: ReferenceSource + Sync,
    W: Write,
{
    let ministries = source.fetch_ministries().await?;
    write_ministries(out, &ministries)
}

/// Fetch zones then sale groups and print both. Returns `(zones, sale_groups)`.
///
/// Nothing is printed unless both fetches succeed.
pub async fn list_zones_and_sale_groups<S, W>(
    source: &S,
    out: &mut W,
) -> Result<(usize, usize), AppError>
where
    S: ReferenceSource + Sync,
    W: Write,
{
    let zones = source.fetch_zones().await?;
    let groups = source.fetch_sale_groups().await?;

    let zone_count = write_zones(out, &zones)?;
    let group_count = write_sale_groups(out, &groups)?;
    Ok((zone_count, group_count))
}
