//! Settings change notifications.
//!
//! The service publishes a [`SettingsEvent`] on a Tokio broadcast channel.
//! Any number of editor components can [`SettingsNotifier::subscribe`]; each
//! receiver sees every event published after it subscribed.
//!
//! # Why a broadcast channel? (for beginners)
//!
//! An `mpsc` channel delivers each message to exactly one receiver.  Settings
//! changes are interesting to many components at once (the script editor
//! re-reads its colors, the 3D viewport re-reads its navigation scheme), so a
//! `broadcast` channel, which clones each message to every receiver, fits.
//!
//! `broadcast::Sender::send` is synchronous, so publishing works from plain
//! threads without a running Tokio runtime.  Receivers can use `recv().await`
//! inside async code or `try_recv()` from synchronous code.
//!
//! Publishing is fire-and-forget: with no subscribers the event is dropped,
//! and a slow subscriber that falls more than the channel capacity behind
//! observes `RecvError::Lagged` instead of blocking the editor.

use tokio::sync::broadcast;
use tracing::trace;

/// Default number of buffered events per subscriber.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// A notification about the settings store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    /// `key` was set or removed.
    Changed { key: String },
    /// A batch of edits is complete and should be applied by the UI
    /// (e.g. the settings dialog was closed, or settings were reset).
    Applied,
}

/// Publisher side of the settings event channel.
#[derive(Debug, Clone)]
pub struct SettingsNotifier {
    tx: broadcast::Sender<SettingsEvent>,
}

impl SettingsNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Returns a receiver for all events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<SettingsEvent> {
        self.tx.subscribe()
    }

    /// Publishes `event` and returns the number of subscribers it reached.
    pub fn publish(&self, event: SettingsEvent) -> usize {
        match self.tx.send(event) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(event)) => {
                trace!(?event, "no settings subscribers");
                0
            }
        }
    }
}

impl Default for SettingsNotifier {
    fn default() -> Self {
        Self::new(EVENT_CHANNEL_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_without_subscribers_is_not_an_error() {
        let notifier = SettingsNotifier::default();
        assert_eq!(notifier.publish(SettingsEvent::Applied), 0);
    }

    #[test]
    fn test_every_subscriber_receives_each_event() {
        // Arrange
        let notifier = SettingsNotifier::default();
        let mut a = notifier.subscribe();
        let mut b = notifier.subscribe();

        // Act
        let reached = notifier.publish(SettingsEvent::Changed {
            key: "text_editor/tab_size".to_string(),
        });

        // Assert
        assert_eq!(reached, 2);
        let expected = SettingsEvent::Changed {
            key: "text_editor/tab_size".to_string(),
        };
        assert_eq!(a.try_recv().unwrap(), expected);
        assert_eq!(b.try_recv().unwrap(), expected);
    }

    #[test]
    fn test_late_subscriber_misses_earlier_events() {
        let notifier = SettingsNotifier::default();
        notifier.publish(SettingsEvent::Applied);
        let mut late = notifier.subscribe();
        assert!(late.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_receiver_can_await_events() {
        let notifier = SettingsNotifier::default();
        let mut rx = notifier.subscribe();

        notifier.publish(SettingsEvent::Applied);

        assert_eq!(rx.recv().await.unwrap(), SettingsEvent::Applied);
    }
}
