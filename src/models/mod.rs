//! Database models for the membership and reference entities.

pub mod member;
pub mod ministry;
pub mod sale_group;
pub mod zone;
