use serde::Deserialize;

use crate::Config;
use crate::shared::{
    ApiConfig, NotifierConfig, PollConfig, RulesConfig, SourceConfig, StoreConfig, ValidationError,
};

/// Complete configuration for the monitor service.
///
/// Aggregates poll scheduling, the rule-filter settings, the three adapter
/// selections, and the API bind address. Typically loaded from configuration
/// files at startup.
///
/// This intentionally does not implement `Serialize` to avoid accidentally
/// leaking secrets in the config into serialized forms.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    /// Scheduling configuration for the poll worker.
    #[serde(default)]
    pub poll: PollConfig,
    /// Rule-filter thresholds and token lists.
    #[serde(default)]
    pub rules: RulesConfig,
    /// Where pilot-order records are read from.
    pub source: SourceConfig,
    /// How change notifications are delivered.
    pub notifier: NotifierConfig,
    /// Where the baseline snapshot is persisted.
    pub store: StoreConfig,
    /// Dashboard API bind address.
    #[serde(default)]
    pub api: ApiConfig,
}

impl MonitorConfig {
    /// Validates the complete monitor configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.poll.validate()?;
        self.rules.validate()?;
        self.notifier.validate()?;
        self.api.validate()?;

        Ok(())
    }
}

impl Config for MonitorConfig {
    const LIST_PARSE_KEYS: &'static [&'static str] = &[
        "poll.overview_hours",
        "rules.excluded_entry_points",
        "rules.relevant_fields",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_deserializes_with_defaults() {
        let raw = serde_json::json!({
            "source": "memory",
            "notifier": "memory",
            "store": "memory",
        });

        let config: MonitorConfig = serde_json::from_value(raw).unwrap();
        config.validate().unwrap();

        assert_eq!(config.poll.poll_interval_secs, 60);
        assert_eq!(config.rules.inbound_lookahead_hours, 8);
        assert!(matches!(config.source, SourceConfig::Memory));
    }

    #[test]
    fn file_adapters_deserialize() {
        let raw = serde_json::json!({
            "source": { "json_file": { "path": "/var/data/orders.json" } },
            "notifier": { "http": { "endpoint": "https://mail.example/send" } },
            "store": { "file": { "path": "/var/data/baseline.json" } },
        });

        let config: MonitorConfig = serde_json::from_value(raw).unwrap();
        config.validate().unwrap();

        assert!(matches!(config.store, StoreConfig::File { .. }));
        match &config.notifier {
            NotifierConfig::Http { timeout_secs, .. } => assert_eq!(*timeout_secs, 10),
            other => panic!("unexpected notifier config: {other:?}"),
        }
    }
}
