mod health_check;
mod monitor;

pub use health_check::*;
pub use monitor::{changes, overview, status};
