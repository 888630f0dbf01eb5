use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Debounced query controller: converts raw keystroke input into a
/// rate-limited trigger. Each `observe` cancels the pending timer and
/// schedules a new one; a burst of N inputs inside the delay window
/// publishes only the last value, once.
pub struct Debouncer {
    delay: Duration,
    tx: mpsc::UnboundedSender<String>,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                delay,
                tx,
                pending: None,
            },
            rx,
        )
    }

    /// Record a raw input. The value is published on the channel only if
    /// no newer input arrives within the delay window.
    pub fn observe(&mut self, raw: &str) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }

        let tx = self.tx.clone();
        let value = raw.to_string();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver may be gone during shutdown; nothing to do then.
            let _ = tx.send(value);
        }));
    }
}

impl Drop for Debouncer {
    /// Teardown cancels any pending timer so no callback outlives the
    /// controller.
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
