//! Notification delivery.

mod base;
mod http;
mod memory;

pub use base::Notifier;
pub use http::HttpNotifier;
pub use memory::{MemoryNotifier, SentNotification};
