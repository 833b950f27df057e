use std::error::Error;

use thiserror::Error;

use pilotwatch::error::PilotError;

/// Result type for the monitor service.
pub type MonitorResult<T> = Result<T, MonitorError>;

/// Error type for the monitor service.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Configuration loading or validation failed.
    #[error("configuration error: {0}")]
    Config(#[source] Box<dyn Error + Send + Sync>),

    /// The monitoring core failed.
    #[error(transparent)]
    Pilot(#[from] PilotError),

    /// Server or runtime I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Startup failure outside the categories above.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MonitorError {
    /// Creates a configuration error from any source.
    pub fn config<E: Error + Send + Sync + 'static>(err: E) -> Self {
        MonitorError::Config(Box::new(err))
    }
}
