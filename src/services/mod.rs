//! Business logic services.

pub mod bootstrap;
pub mod dashboard;
pub mod listing;
pub mod upload;
