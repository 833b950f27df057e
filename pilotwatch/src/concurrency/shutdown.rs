use tokio::sync::watch;

/// Creates a shutdown channel pair.
///
/// The sender side is held by the process entry point; workers hold receivers
/// and treat a dropped sender the same as an explicit shutdown.
pub fn create_shutdown_channel() -> (ShutdownTx, ShutdownRx) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTx(tx), ShutdownRx(rx))
}

/// Sending half of the shutdown channel.
#[derive(Debug)]
pub struct ShutdownTx(watch::Sender<bool>);

impl ShutdownTx {
    /// Signals shutdown to all receivers.
    pub fn shutdown(&self) {
        // Ignore the error: no receivers left means shutdown already happened.
        let _ = self.0.send(true);
    }

    /// Creates an additional receiver for a new worker.
    pub fn subscribe(&self) -> ShutdownRx {
        ShutdownRx(self.0.subscribe())
    }
}

/// Receiving half of the shutdown channel.
#[derive(Debug, Clone)]
pub struct ShutdownRx(watch::Receiver<bool>);

impl ShutdownRx {
    /// Returns whether shutdown has been signalled.
    pub fn is_shutdown(&self) -> bool {
        *self.0.borrow()
    }

    /// Waits until shutdown is signalled or the sender is dropped.
    pub async fn wait_for_shutdown(&mut self) {
        loop {
            if *self.0.borrow_and_update() {
                return;
            }
            if self.0.changed().await.is_err() {
                return;
            }
        }
    }
}
