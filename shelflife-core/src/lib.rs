//! # shelflife-core
//!
//! Foundation crate for the Shelflife snapshot engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::ShelfConfig;
pub use errors::{ShelfError, ShelfResult};
pub use models::{
    ChangeStatus, ComparisonRow, DetectionStats, MetricKind, SeriesStats, SnapshotSummary,
    UpstreamCredentials,
};
