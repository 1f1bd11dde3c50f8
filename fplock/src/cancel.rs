//! Cooperative cancellation
//!
//! Hand-off between the verification loop and an enrollment request rides
//! on this token. Workflows check it every polling iteration, not just at
//! I/O boundaries, so a cancel is observed within one poll interval even
//! during operator-paced waits.

use std::sync::Arc;

use tokio::sync::watch;

/// Cloneable cancellation token.
///
/// All clones observe the same state; cancellation is sticky and a token
/// cancelled before anyone waits on it still resolves waiters immediately.
#[derive(Clone)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Check without waiting
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Wait until cancellation is requested
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in self, so wait_for cannot fail while borrowed
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_starts_uncancelled() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let token = CancelToken::new();
        let clone = token.clone();

        token.cancel();

        assert!(clone.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancelled_resolves_for_late_waiters() {
        let token = CancelToken::new();
        token.cancel();

        // Must resolve even though cancel happened before the wait
        token.cancelled().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_wakes_pending_waiter() {
        let token = CancelToken::new();
        let waiter = token.clone();

        let handle = tokio::spawn(async move {
            waiter.cancelled().await;
            true
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();

        assert!(handle.await.unwrap());
    }
}
