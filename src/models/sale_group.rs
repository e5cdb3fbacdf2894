//! Sale group model. Each group belongs to exactly one zone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Sale group row. `zone_id` is kept as the raw reference; the zone is not resolved.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SaleGroup {
    pub id: Uuid,
    pub name: String,
    pub leader_name: String,
    pub zone_id: Uuid,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sale_group_serializes_raw_zone_id() {
        let group = SaleGroup {
            id: Uuid::nil(),
            name: "North Sellers".to_string(),
            leader_name: "Grace".to_string(),
            zone_id: Uuid::nil(),
            is_active: true,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&group).unwrap();
        assert_eq!(json["zoneId"], Uuid::nil().to_string());
        assert_eq!(json["leaderName"], "Grace");
        assert!(json.get("zone").is_none());
    }
}
