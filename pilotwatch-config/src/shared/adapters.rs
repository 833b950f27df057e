use std::path::PathBuf;

use secrecy::SecretString;
use serde::Deserialize;

use crate::shared::ValidationError;

/// Selects where the monitor reads pilot-order records from.
///
/// The actual fetch/auth/parse work against the pilotage system is done by an
/// external collaborator; the monitor only consumes the record sequence that
/// collaborator produces.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceConfig {
    /// In-memory source, for tests and local development.
    Memory,
    /// Reads the record list from a JSON file refreshed by the external
    /// fetcher.
    JsonFile {
        /// Path of the JSON file holding the current record list.
        path: PathBuf,
    },
}

/// Selects how change notifications are delivered.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifierConfig {
    /// In-memory notifier, for tests and local development.
    Memory,
    /// Posts `{subject, body}` JSON to a mail-gateway webhook.
    Http {
        /// Endpoint the notification payload is posted to.
        endpoint: String,
        /// Optional bearer token sent with every request.
        #[serde(default)]
        auth_token: Option<SecretString>,
        /// Request timeout in seconds.
        #[serde(default = "default_notifier_timeout_secs")]
        timeout_secs: u64,
    },
}

/// Selects where the baseline snapshot is persisted between process runs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreConfig {
    /// In-memory store; the baseline does not survive a restart.
    Memory,
    /// JSON file store with atomic replace on save.
    File {
        /// Path of the baseline snapshot file.
        path: PathBuf,
    },
}

impl NotifierConfig {
    /// Default HTTP notifier request timeout.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    /// Validates notifier settings.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let NotifierConfig::Http {
            endpoint,
            timeout_secs,
            ..
        } = self
        {
            if endpoint.trim().is_empty() {
                return Err(ValidationError::MissingField {
                    field: "notifier.http.endpoint".to_string(),
                });
            }

            if *timeout_secs == 0 {
                return Err(ValidationError::InvalidFieldValue {
                    field: "notifier.http.timeout_secs".to_string(),
                    constraint: "must be greater than 0".to_string(),
                });
            }
        }

        Ok(())
    }
}

fn default_notifier_timeout_secs() -> u64 {
    NotifierConfig::DEFAULT_TIMEOUT_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_http_endpoint_is_rejected() {
        let config = NotifierConfig::Http {
            endpoint: " ".to_string(),
            auth_token: None,
            timeout_secs: 10,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn memory_notifier_is_always_valid() {
        NotifierConfig::Memory.validate().unwrap();
    }
}
