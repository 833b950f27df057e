//! Tracing initialization for services and tests.
//!
//! Services call [`init_tracing`] once at startup; the output format follows the
//! runtime environment (human-readable in dev, JSON lines in prod). Tests call
//! [`init_test_tracing`], which is safe to invoke from every test function.

use std::sync::Once;

use pilotwatch_config::{Environment, UnknownEnvironmentError};
use thiserror::Error;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Default filter directive applied when `RUST_LOG` is not set.
const DEFAULT_LOG_DIRECTIVES: &str = "info";

/// Guard for one-time test subscriber installation.
static TEST_TRACING: Once = Once::new();

/// Errors that can occur while initializing tracing.
#[derive(Debug, Error)]
pub enum InitTracingError {
    /// Could not determine the runtime environment.
    #[error("failed to determine runtime environment: {0}")]
    Environment(#[from] UnknownEnvironmentError),

    /// A global subscriber was already installed.
    #[error("failed to install the global tracing subscriber: {0}")]
    SetGlobalDefault(#[from] SetGlobalDefaultError),
}

/// Initializes the global tracing subscriber for a service.
///
/// The filter is taken from `RUST_LOG`, falling back to `info`. In the dev
/// environment events are rendered human-readable with targets; in prod they
/// are emitted as JSON lines with the service name attached.
pub fn init_tracing(service_name: &str) -> Result<(), InitTracingError> {
    let environment = Environment::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVES));

    let fmt_layer = match environment {
        Environment::Dev => fmt::layer().with_target(true).boxed(),
        Environment::Prod => fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .boxed(),
    };

    let subscriber = Registry::default().with(filter).with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(service = service_name, env = %environment, "tracing initialized");

    Ok(())
}

/// Initializes tracing for tests.
///
/// Installation happens only once per process; later calls are no-ops, so every
/// test can call this without coordinating with the others.
pub fn init_test_tracing() {
    TEST_TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVES));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
