//! Member status. Members are registered elsewhere; only their counts are read here.

use serde::{Deserialize, Serialize};

/// Only `Active` members count toward dashboard figures.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "member_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum MemberStatus {
    Active,
    Inactive,
    Pending,
}
