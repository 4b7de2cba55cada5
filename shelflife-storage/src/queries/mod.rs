//! SQL query modules. Free functions over `&Connection`, grouped by concern.

pub mod retention;
pub mod snapshot_crud;
pub mod snapshot_query;
