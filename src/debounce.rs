//! Cancellable delayed delivery for the schema editor.
//!
//! Every `schedule` aborts the previous pending task and bumps a generation
//! counter. Deliveries carry their generation and the owner drops anything
//! older than the latest, so an aborted task that already fired cannot
//! overwrite newer input.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A value that waited out the delay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debounced<T> {
    pub generation: u64,
    pub value: T,
}

pub struct Debouncer<T> {
    delay: Duration,
    tx: mpsc::UnboundedSender<Debounced<T>>,
    pending: Option<JoinHandle<()>>,
    generation: u64,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer and the receiver its deliveries arrive on
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<Debounced<T>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                delay,
                tx,
                pending: None,
                generation: 0,
            },
            rx,
        )
    }

    /// Schedule `value` for delivery after the delay, superseding any pending one
    pub fn schedule(&mut self, value: T) {
        self.cancel();
        self.generation += 1;

        let generation = self.generation;
        let delay = self.delay;
        let tx = self.tx.clone();
        tracing::debug!(generation, delay_ms = delay.as_millis() as u64, "debounce scheduled");
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the app is shutting down
            let _ = tx.send(Debounced { generation, value });
        }));
    }

    /// Abort the pending delivery, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Unwrap a delivery if it is the most recent one scheduled
    pub fn accept(&mut self, delivered: Debounced<T>) -> Option<T> {
        if delivered.generation != self.generation {
            tracing::debug!(
                stale = delivered.generation,
                latest = self.generation,
                "dropping stale debounce delivery"
            );
            return None;
        }
        self.pending = None;
        Some(delivered.value)
    }

    /// True while a scheduled value has not been accepted yet
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DELAY: Duration = Duration::from_millis(500);

    #[tokio::test(start_paused = true)]
    async fn test_delivers_after_delay() {
        let (mut debouncer, mut rx) = Debouncer::new(DELAY);
        let started = tokio::time::Instant::now();
        debouncer.schedule("schema".to_string());
        assert!(debouncer.is_pending());

        let delivered = rx.recv().await.unwrap();
        assert!(started.elapsed() >= DELAY);
        assert_eq!(debouncer.accept(delivered), Some("schema".to_string()));
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_schedule_supersedes_older() {
        let (mut debouncer, mut rx) = Debouncer::new(DELAY);
        debouncer.schedule("first");
        tokio::time::advance(Duration::from_millis(200)).await;
        debouncer.schedule("second");

        let delivered = rx.recv().await.unwrap();
        assert_eq!(delivered.generation, 2);
        assert_eq!(debouncer.accept(delivered), Some("second"));

        tokio::time::advance(DELAY * 2).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_delivery_is_rejected() {
        let (mut debouncer, mut rx) = Debouncer::new(DELAY);
        debouncer.schedule(1);
        let first = rx.recv().await.unwrap();

        // A newer schedule lands before the older delivery is processed
        debouncer.schedule(2);
        assert_eq!(debouncer.accept(first), None);
        assert!(debouncer.is_pending());

        let second = rx.recv().await.unwrap();
        assert_eq!(debouncer.accept(second), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_delivery() {
        let (mut debouncer, mut rx) = Debouncer::new(DELAY);
        debouncer.schedule(());
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        tokio::time::advance(DELAY * 2).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }
}
