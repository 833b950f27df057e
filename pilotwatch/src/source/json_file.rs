use std::io::ErrorKind as IoErrorKind;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{ErrorKind, PilotError, PilotResult};
use crate::source::base::OrderSource;
use crate::types::PilotOrder;

/// Source that reads the current dataset from a JSON file on disk.
///
/// The file holds an array of raw records and is rewritten by an external
/// collector. A missing file means the collector has not produced data yet and
/// yields an empty dataset; a file that exists but does not parse is an error.
#[derive(Debug, Clone)]
pub struct JsonFileOrderSource {
    path: PathBuf,
}

impl JsonFileOrderSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OrderSource for JsonFileOrderSource {
    fn name(&self) -> &'static str {
        "json-file"
    }

    async fn fetch(&self) -> PilotResult<Vec<PilotOrder>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == IoErrorKind::NotFound => {
                debug!(path = %self.path.display(), "dataset file not present yet");
                return Ok(vec![]);
            }
            Err(err) => {
                return Err(PilotError::from((
                    ErrorKind::SourceFetchFailed,
                    "failed to read dataset file",
                    format!("path: {}", self.path.display()),
                ))
                .with_source(err));
            }
        };

        serde_json::from_slice(&bytes).map_err(|err| {
            PilotError::from((
                ErrorKind::InvalidRecord,
                "dataset file does not contain a valid record array",
                format!("path: {}", self.path.display()),
            ))
            .with_source(err)
        })
    }
}
