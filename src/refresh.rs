//! Change notification between data mutations and the views that render
//! data.
//!
//! Views re-fetch whenever something signals "data changed". The signal is an
//! explicit channel rather than shared mutable state: producers hold a
//! [`ChangeSignal`] and call [`ChangeSignal::notify`], views hold a
//! [`ChangeListener`] and await [`ChangeListener::changed`]. Notifications
//! coalesce; a listener that missed several notifications wakes once and
//! re-fetches once.

use crate::Result;
use anyhow::Context;
use tokio::sync::watch;

/// The producer half of the change channel.
#[derive(Debug, Clone)]
pub struct ChangeSignal {
    tx: watch::Sender<u64>,
}

impl ChangeSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx }
    }

    /// Announces that data changed. Listeners subscribed at the time will
    /// observe at least one wake-up.
    pub fn notify(&self) {
        self.tx.send_modify(|generation| *generation += 1);
    }

    pub fn subscribe(&self) -> ChangeListener {
        ChangeListener {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for ChangeSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// The consumer half of the change channel.
#[derive(Debug, Clone)]
pub struct ChangeListener {
    rx: watch::Receiver<u64>,
}

impl ChangeListener {
    /// Waits for the next notification after the last one observed.
    pub async fn changed(&mut self) -> Result<()> {
        self.rx
            .changed()
            .await
            .context("The change signal was dropped")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_notify_wakes_listener() {
        let signal = ChangeSignal::new();
        let mut listener = signal.subscribe();
        signal.notify();
        timeout(Duration::from_secs(1), listener.changed())
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_notifications_coalesce() {
        let signal = ChangeSignal::new();
        let mut listener = signal.subscribe();
        signal.notify();
        signal.notify();
        signal.notify();
        timeout(Duration::from_secs(1), listener.changed())
            .await
            .unwrap()
            .unwrap();
        // All three notifications collapsed into the wake-up above.
        assert!(timeout(Duration::from_millis(50), listener.changed())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_every_subscriber_is_woken() {
        let signal = ChangeSignal::new();
        let mut first = signal.subscribe();
        let mut second = signal.subscribe();
        signal.notify();
        timeout(Duration::from_secs(1), first.changed())
            .await
            .unwrap()
            .unwrap();
        timeout(Duration::from_secs(1), second.changed())
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_dropped_signal_is_an_error() {
        let signal = ChangeSignal::new();
        let mut listener = signal.subscribe();
        drop(signal);
        assert!(listener.changed().await.is_err());
    }
}
