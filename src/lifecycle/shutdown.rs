//! Shutdown coordination.
//!
//! Backed by a `watch` channel holding a single "stopping" flag, so a signal
//! obtained after `trigger` resolves immediately instead of waiting forever.

use std::sync::Arc;

use tokio::sync::watch;

/// Owner side: flips the flag once.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: Arc<watch::Sender<bool>>,
}

/// Listener side, handed to the HTTP server.
#[derive(Debug)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Idempotent.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    /// Resolve once shutdown is triggered or every `Shutdown` handle is gone.
    pub async fn wait(mut self) {
        let _ = self.rx.wait_for(|stopping| *stopping).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_reaches_every_signal() {
        let shutdown = Shutdown::new();
        let first = shutdown.subscribe();
        let second = shutdown.clone().subscribe();

        shutdown.trigger();
        assert!(shutdown.is_triggered());

        tokio::time::timeout(Duration::from_secs(1), async {
            first.wait().await;
            second.wait().await;
        })
        .await
        .expect("signals should resolve after trigger");
    }

    #[tokio::test]
    async fn test_late_subscriber_sees_earlier_trigger() {
        let shutdown = Shutdown::new();
        shutdown.trigger();
        shutdown.trigger();

        let late = shutdown.subscribe();
        tokio::time::timeout(Duration::from_secs(1), late.wait())
            .await
            .expect("late signal should resolve immediately");
    }

    #[tokio::test]
    async fn test_signal_pending_until_triggered() {
        let shutdown = Shutdown::new();
        let signal = shutdown.subscribe();

        let waited = tokio::time::timeout(Duration::from_millis(50), signal.wait()).await;
        assert!(waited.is_err());
        assert!(!shutdown.is_triggered());
    }
}
