//! Shared state between the polling worker and the API.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::report::{CategoryReport, Overview};
use crate::snapshot::Snapshot;

/// Timestamp format used for the dashboard's last-update field.
const LAST_UPDATE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Read model exposed over the API.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardState {
    /// Human-readable status of the last cycle.
    pub status: String,
    /// Local time of the last completed cycle.
    pub last_update: Option<String>,
    /// Number of completed cycles since startup.
    pub cycles: u64,
    /// Reportable changes of the last cycle, grouped by category.
    pub changes: Vec<CategoryReport>,
    /// Overview computed from the last snapshot.
    pub overview: Overview,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            status: "starting".to_string(),
            last_update: None,
            cycles: 0,
            changes: Vec::new(),
            overview: Overview::default(),
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    baseline: Option<Snapshot>,
    dashboard: DashboardState,
}

/// Handle to the state shared by the worker and the API server.
///
/// The lock is only ever held for short synchronous sections, never across an
/// await point.
#[derive(Debug, Clone, Default)]
pub struct MonitorState {
    inner: Arc<Mutex<Inner>>,
}

impl MonitorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current baseline snapshot, if one has been established.
    pub fn baseline(&self) -> Option<Snapshot> {
        self.inner.lock().unwrap().baseline.clone()
    }

    /// Replaces the baseline snapshot.
    pub fn set_baseline(&self, baseline: Snapshot) {
        self.inner.lock().unwrap().baseline = Some(baseline);
    }

    /// Updates the dashboard status without completing a cycle.
    pub fn set_status(&self, status: &str) {
        self.inner.lock().unwrap().dashboard.status = status.to_string();
    }

    /// Records a completed cycle on the dashboard.
    pub fn publish_cycle(
        &self,
        now: chrono::NaiveDateTime,
        changes: Vec<CategoryReport>,
        overview: Overview,
    ) {
        let mut inner = self.inner.lock().unwrap();
        inner.dashboard.status = "ok".to_string();
        inner.dashboard.last_update = Some(now.format(LAST_UPDATE_FORMAT).to_string());
        inner.dashboard.cycles += 1;
        inner.dashboard.changes = changes;
        inner.dashboard.overview = overview;
    }

    /// Returns a copy of the dashboard read model.
    pub fn dashboard(&self) -> DashboardState {
        self.inner.lock().unwrap().dashboard.clone()
    }
}
