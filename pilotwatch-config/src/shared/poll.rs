use serde::Deserialize;

use crate::shared::ValidationError;

/// Scheduling configuration for the poll worker.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PollConfig {
    /// Seconds to sleep between successful poll cycles.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Seconds to sleep after a failed poll cycle before trying again.
    #[serde(default = "default_error_backoff_secs")]
    pub error_backoff_secs: u64,
    /// Hours of the day (0-23) at which a full overview notification is sent,
    /// interpreted in `overview_timezone`. An overview fires at most once per
    /// listed hour, from minute 30 onwards. An empty list disables overview
    /// notifications.
    #[serde(default = "default_overview_hours")]
    pub overview_hours: Vec<u32>,
    /// IANA timezone in which `overview_hours` are interpreted. The overview
    /// schedule must follow the operators' wall clock, not the host clock.
    #[serde(default = "default_overview_timezone")]
    pub overview_timezone: String,
}

impl PollConfig {
    /// Default sleep between poll cycles.
    pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

    /// Default sleep after a failed cycle.
    pub const DEFAULT_ERROR_BACKOFF_SECS: u64 = 30;

    /// Default hours for overview notifications.
    pub const DEFAULT_OVERVIEW_HOURS: &[u32] = &[5, 13, 21];

    /// Default timezone for the overview schedule.
    pub const DEFAULT_OVERVIEW_TIMEZONE: &str = "Europe/Brussels";

    /// Validates poll scheduling settings.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.poll_interval_secs == 0 {
            return Err(ValidationError::InvalidFieldValue {
                field: "poll.poll_interval_secs".to_string(),
                constraint: "must be greater than 0".to_string(),
            });
        }

        if self.error_backoff_secs == 0 {
            return Err(ValidationError::InvalidFieldValue {
                field: "poll.error_backoff_secs".to_string(),
                constraint: "must be greater than 0".to_string(),
            });
        }

        if self.overview_hours.iter().any(|hour| *hour > 23) {
            return Err(ValidationError::InvalidFieldValue {
                field: "poll.overview_hours".to_string(),
                constraint: "hours must be in the range 0-23".to_string(),
            });
        }

        if self.overview_timezone.parse::<chrono_tz::Tz>().is_err() {
            return Err(ValidationError::InvalidFieldValue {
                field: "poll.overview_timezone".to_string(),
                constraint: "must be a valid IANA timezone name".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            error_backoff_secs: default_error_backoff_secs(),
            overview_hours: default_overview_hours(),
            overview_timezone: default_overview_timezone(),
        }
    }
}

fn default_poll_interval_secs() -> u64 {
    PollConfig::DEFAULT_POLL_INTERVAL_SECS
}

fn default_error_backoff_secs() -> u64 {
    PollConfig::DEFAULT_ERROR_BACKOFF_SECS
}

fn default_overview_hours() -> Vec<u32> {
    PollConfig::DEFAULT_OVERVIEW_HOURS.to_vec()
}

fn default_overview_timezone() -> String {
    PollConfig::DEFAULT_OVERVIEW_TIMEZONE.to_string()
}
