//! Pilot-order sources.

mod base;
mod json_file;
mod memory;

pub use base::OrderSource;
pub use json_file::JsonFileOrderSource;
pub use memory::MemoryOrderSource;
