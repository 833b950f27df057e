//! HTTP API exposing the monitor's read model.

pub mod routes;
pub mod startup;
