//! Shared configuration types for pilotwatch services.

mod adapters;
mod api;
mod monitor;
mod poll;
mod rules;

use thiserror::Error;

pub use adapters::{NotifierConfig, SourceConfig, StoreConfig};
pub use api::ApiConfig;
pub use monitor::MonitorConfig;
pub use poll::PollConfig;
pub use rules::RulesConfig;

/// Errors that can occur when validating configuration values.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A field contains a value that violates its constraint.
    #[error("invalid value for `{field}`: {constraint}")]
    InvalidFieldValue { field: String, constraint: String },

    /// A field required by the selected configuration is missing or empty.
    #[error("missing required field `{field}`")]
    MissingField { field: String },
}
