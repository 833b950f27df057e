use std::future::Future;

use crate::error::PilotResult;
use crate::types::PilotOrder;

/// A source of raw pilot-order records.
///
/// A fetch returns the full current dataset, unnormalized; the caller owns
/// deduplication and diffing. An empty result is a valid answer and is
/// distinguished from a failed fetch.
pub trait OrderSource {
    /// Short name of the source, used in logs.
    fn name(&self) -> &'static str;

    /// Fetches the current dataset.
    fn fetch(&self) -> impl Future<Output = PilotResult<Vec<PilotOrder>>> + Send;
}
