use pilotwatch_config::load_config;
use pilotwatch_config::shared::MonitorConfig;

use crate::error::{MonitorError, MonitorResult};

/// Loads and validates the monitor configuration.
pub fn load_monitor_config() -> MonitorResult<MonitorConfig> {
    let config = load_config::<MonitorConfig>().map_err(MonitorError::config)?;
    config.validate().map_err(MonitorError::config)?;

    Ok(config)
}
