//! Trait seams between the storage engine, the vault, and their callers.

mod sink;
mod storage;

pub use sink::RowSink;
pub use storage::{ISecretStore, ISnapshotStore};
