//! Baseline persistence.

mod base;
mod file;
mod memory;

pub use base::SnapshotStore;
pub use file::FileSnapshotStore;
pub use memory::MemorySnapshotStore;
