use std::future::Future;

use crate::error::PilotResult;
use crate::types::PilotOrder;

/// Persistence for the baseline dataset between cycles and restarts.
///
/// The store holds raw records as fetched, not normalized snapshots;
/// normalization happens on load so that rule changes apply retroactively to
/// a persisted baseline.
pub trait SnapshotStore {
    /// Short name of the store, used in logs.
    fn name(&self) -> &'static str;

    /// Loads the persisted baseline, `None` when no baseline exists yet.
    fn load(&self) -> impl Future<Output = PilotResult<Option<Vec<PilotOrder>>>> + Send;

    /// Persists the given records as the new baseline.
    fn save(&self, records: &[PilotOrder]) -> impl Future<Output = PilotResult<()>> + Send;
}
