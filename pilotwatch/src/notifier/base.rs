use std::future::Future;

use crate::error::PilotResult;

/// Delivery channel for change reports and overviews.
///
/// Delivery failures are reported to the caller but must never take the
/// monitoring loop down; the worker logs them and moves on.
pub trait Notifier {
    /// Short name of the channel, used in logs.
    fn name(&self) -> &'static str;

    /// Delivers one notification.
    fn notify(&self, subject: &str, body: &str) -> impl Future<Output = PilotResult<()>> + Send;
}
