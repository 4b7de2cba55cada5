//! # shelflife-analysis
//!
//! Pure computations over snapshot rows: statistical outlier detection
//! and two-snapshot diffing. Persistence lives in `shelflife-storage`;
//! this crate only reads through the `ISnapshotStore` seam.

pub mod diff;
pub mod outliers;

pub use diff::{compare, diff_rows};
pub use outliers::detect;
