//! Configuration loading and shared configuration types for pilotwatch services.
//!
//! Configuration is layered: `configuration/base.yaml` is always loaded, then the
//! environment-specific file (`dev.yaml` or `prod.yaml`), then `APP_`-prefixed
//! environment variable overrides.

mod load;

pub mod shared;

pub use load::{Config, Environment, LoadConfigError, UnknownEnvironmentError, load_config};
