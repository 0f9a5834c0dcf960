//! Search-as-you-type debouncing.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Delays a value until input has been quiet for `window`. Every push
/// replaces the pending value and restarts the timer, so only the latest
/// value after a pause is sent.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    tx: mpsc::Sender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(window: Duration, tx: mpsc::Sender<T>) -> Self {
        Self {
            window,
            tx,
            pending: None,
        }
    }

    pub fn push(&mut self, value: T) {
        self.cancel();
        let tx = self.tx.clone();
        let window = self.window;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let _ = tx.send(value).await;
        }));
    }

    /// Drop the pending value, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

/// Trimmed query, or `None` when there is nothing to search for.
pub fn normalize_query(raw: &str) -> Option<&str> {
    let q = raw.trim();
    (!q.is_empty()).then_some(q)
}
