use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::PilotResult;
use crate::source::base::OrderSource;
use crate::types::PilotOrder;

/// In-memory source, used in tests to script dataset contents per cycle.
#[derive(Debug, Clone, Default)]
pub struct MemoryOrderSource {
    records: Arc<Mutex<Vec<PilotOrder>>>,
}

impl MemoryOrderSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the dataset the next fetch will return.
    pub async fn set_records(&self, records: Vec<PilotOrder>) {
        *self.records.lock().await = records;
    }
}

impl OrderSource for MemoryOrderSource {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn fetch(&self) -> PilotResult<Vec<PilotOrder>> {
        Ok(self.records.lock().await.clone())
    }
}
