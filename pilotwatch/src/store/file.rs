use std::io::ErrorKind as IoErrorKind;
use std::path::PathBuf;

use crate::error::{ErrorKind, PilotError, PilotResult};
use crate::store::base::SnapshotStore;
use crate::types::PilotOrder;

/// Store that persists the baseline as a JSON file.
///
/// Saves go through a sibling temp file plus rename so a crash mid-write never
/// leaves a truncated baseline behind.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn load(&self) -> PilotResult<Option<Vec<PilotOrder>>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == IoErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(PilotError::from((
                    ErrorKind::StoreLoadFailed,
                    "failed to read baseline file",
                    format!("path: {}", self.path.display()),
                ))
                .with_source(err));
            }
        };

        let records = serde_json::from_slice(&bytes).map_err(|err| {
            PilotError::from((
                ErrorKind::StoreLoadFailed,
                "baseline file does not contain a valid record array",
                format!("path: {}", self.path.display()),
            ))
            .with_source(err)
        })?;

        Ok(Some(records))
    }

    async fn save(&self, records: &[PilotOrder]) -> PilotResult<()> {
        let bytes = serde_json::to_vec_pretty(records).map_err(|err| {
            PilotError::from((ErrorKind::StoreSaveFailed, "failed to serialize baseline"))
                .with_source(err)
        })?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|err| {
                PilotError::from((
                    ErrorKind::StoreSaveFailed,
                    "failed to create baseline directory",
                    format!("path: {}", parent.display()),
                ))
                .with_source(err)
            })?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, &bytes).await.map_err(|err| {
            PilotError::from((
                ErrorKind::StoreSaveFailed,
                "failed to write baseline temp file",
                format!("path: {}", temp_path.display()),
            ))
            .with_source(err)
        })?;

        tokio::fs::rename(&temp_path, &self.path).await.map_err(|err| {
            PilotError::from((
                ErrorKind::StoreSaveFailed,
                "failed to move baseline into place",
                format!("path: {}", self.path.display()),
            ))
            .with_source(err)
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VesselType;
    use rand::Rng;

    fn scratch_path(name: &str) -> PathBuf {
        let nonce: u64 = rand::thread_rng().r#gen();
        std::env::temp_dir().join(format!("pilotwatch-store-{name}-{nonce}.json"))
    }

    fn order(name: &str) -> PilotOrder {
        PilotOrder {
            vessel_type: VesselType::Inbound,
            vessel_name: name.to_string(),
            order_time: "10/06/25 18:00".to_string(),
            eta_etd: String::new(),
            rta: String::new(),
            pilot: String::new(),
            entry_point: String::new(),
        }
    }

    #[tokio::test]
    async fn missing_file_means_no_baseline() {
        let store = FileSnapshotStore::new(scratch_path("missing"));
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn saved_baseline_loads_back() {
        let path = scratch_path("roundtrip");
        let store = FileSnapshotStore::new(&path);

        store.save(&[order("ALFA"), order("BRAVO")]).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].vessel_name, "ALFA");
    }

    #[tokio::test]
    async fn corrupt_baseline_is_an_error() {
        let path = scratch_path("corrupt");
        tokio::fs::write(&path, "{").await.unwrap();

        let error = FileSnapshotStore::new(&path).load().await.unwrap_err();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(error.kind(), ErrorKind::StoreLoadFailed);
    }
}
