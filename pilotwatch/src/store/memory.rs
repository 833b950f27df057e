use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::PilotResult;
use crate::store::base::SnapshotStore;
use crate::types::PilotOrder;

/// In-memory store, used in tests to seed and inspect the baseline.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    records: Arc<Mutex<Option<Vec<PilotOrder>>>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store preloaded with a baseline.
    pub fn with_records(records: Vec<PilotOrder>) -> Self {
        Self {
            records: Arc::new(Mutex::new(Some(records))),
        }
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn load(&self) -> PilotResult<Option<Vec<PilotOrder>>> {
        Ok(self.records.lock().await.clone())
    }

    async fn save(&self, records: &[PilotOrder]) -> PilotResult<()> {
        *self.records.lock().await = Some(records.to_vec());
        Ok(())
    }
}
