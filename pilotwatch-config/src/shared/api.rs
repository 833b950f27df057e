use serde::Deserialize;

use crate::shared::ValidationError;

/// Bind configuration for the dashboard API server.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ApiConfig {
    /// Host the API server binds to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port the API server binds to.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ApiConfig {
    /// Default bind host.
    pub const DEFAULT_HOST: &str = "127.0.0.1";

    /// Default bind port.
    pub const DEFAULT_PORT: u16 = 8080;

    /// Validates the bind address settings.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.host.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: "api.host".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    ApiConfig::DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    ApiConfig::DEFAULT_PORT
}
