//! Pilot-order monitor service binary.
//!
//! Loads configuration, initializes tracing, and runs the polling worker
//! together with the dashboard API server until a shutdown signal arrives.

use crate::config::load_monitor_config;
use crate::core::start_monitor;
use crate::error::{MonitorError, MonitorResult};

use pilotwatch_telemetry::tracing::init_tracing;

mod config;
mod core;
mod error;

fn main() -> MonitorResult<()> {
    let config = load_monitor_config()?;

    init_tracing(env!("CARGO_BIN_NAME")).map_err(MonitorError::config)?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(start_monitor(config))?;

    Ok(())
}
