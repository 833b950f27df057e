//! Telemetry initialization for pilotwatch services.

pub mod tracing;
