//! Core monitoring engine for maritime pilot-order records.
//!
//! The engine observes a periodically refreshed table of pilot orders, collapses
//! duplicate vessel rows into one canonical record per vessel, diffs the result
//! against the previously retained baseline, filters the differences through a
//! configurable rule set, and renders the surviving changes for delivery to a
//! notifier and a dashboard.
//!
//! Fetching the records, delivering notifications, and persisting the baseline
//! are adapter concerns behind the [`source`], [`notifier`], and [`store`]
//! traits; the [`workers`] module ties everything together in a long-lived poll
//! loop.

pub mod concurrency;
pub mod diff;
pub mod error;
pub mod macros;
pub mod notifier;
pub mod report;
pub mod rules;
pub mod snapshot;
pub mod source;
pub mod state;
pub mod store;
pub mod types;
pub mod workers;
