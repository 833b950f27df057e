//! Background workers.

mod poll;

pub use poll::{PollWorker, PollWorkerHandle};
