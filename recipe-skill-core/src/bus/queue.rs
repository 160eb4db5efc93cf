//! Async message queue implementation

use super::events::IntentMessage;
use crate::dialog::{DialogSink, SpokenDialog};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::warn;

/// Message bus decoupling the host from the skill
///
/// The host pushes intents to the inbound queue; the skill handles them and
/// pushes spoken dialogs to the outbound queue.
#[derive(Clone)]
pub struct MessageBus {
    /// Inbound intents from the host
    inbound_tx: mpsc::UnboundedSender<IntentMessage>,
    inbound_rx: Arc<RwLock<Option<mpsc::UnboundedReceiver<IntentMessage>>>>,
    /// Outbound dialogs to the host
    outbound_tx: mpsc::UnboundedSender<SpokenDialog>,
    outbound_rx: Arc<RwLock<Option<mpsc::UnboundedReceiver<SpokenDialog>>>>,
}

impl MessageBus {
    /// Create a new message bus
    pub fn new() -> Self {
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();

        Self {
            inbound_tx,
            inbound_rx: Arc::new(RwLock::new(Some(inbound_rx))),
            outbound_tx,
            outbound_rx: Arc::new(RwLock::new(Some(outbound_rx))),
        }
    }

    /// Take the inbound receiver (can only be called once)
    pub async fn take_inbound_receiver(&self) -> Option<mpsc::UnboundedReceiver<IntentMessage>> {
        self.inbound_rx.write().await.take()
    }

    /// Take the outbound receiver (can only be called once)
    pub async fn take_outbound_receiver(&self) -> Option<mpsc::UnboundedReceiver<SpokenDialog>> {
        self.outbound_rx.write().await.take()
    }

    /// Publish an intent from the host to the skill
    pub fn publish_intent(&self, msg: IntentMessage) -> crate::Result<()> {
        self.inbound_tx
            .send(msg)
            .map_err(|_| crate::Error::Channel("Inbound channel closed".to_string()))
    }

    /// Publish a dialog from the skill to the host
    pub fn publish_dialog(&self, dialog: SpokenDialog) -> crate::Result<()> {
        self.outbound_tx
            .send(dialog)
            .map_err(|_| crate::Error::Channel("Outbound channel closed".to_string()))
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogSink for MessageBus {
    fn speak(&self, dialog: SpokenDialog) {
        if let Err(e) = self.publish_dialog(dialog) {
            warn!("Dropped dialog: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::Intent;
    use crate::dialog::DialogTemplate;

    #[tokio::test]
    async fn test_publish_and_receive_intent() {
        let bus = MessageBus::new();
        let mut rx = bus.take_inbound_receiver().await.unwrap();

        bus.publish_intent(IntentMessage::new("alice", Intent::NextStep))
            .unwrap();

        let msg = rx.recv().await.unwrap();
        assert_eq!(msg.user, "alice");
        assert_eq!(msg.intent, Intent::NextStep);
    }

    #[tokio::test]
    async fn test_receivers_taken_once() {
        let bus = MessageBus::new();
        assert!(bus.take_inbound_receiver().await.is_some());
        assert!(bus.take_inbound_receiver().await.is_none());
        assert!(bus.take_outbound_receiver().await.is_some());
        assert!(bus.take_outbound_receiver().await.is_none());
    }

    #[tokio::test]
    async fn test_speak_publishes_dialog() {
        let bus = MessageBus::new();
        let mut rx = bus.take_outbound_receiver().await.unwrap();

        bus.speak(SpokenDialog::new("bob", DialogTemplate::NoRecipe));

        let dialog = rx.recv().await.unwrap();
        assert_eq!(dialog.user, "bob");
        assert_eq!(dialog.template, DialogTemplate::NoRecipe);
    }

    #[test]
    fn test_publish_after_receiver_dropped() {
        tokio_test::block_on(async {
            let bus = MessageBus::new();
            drop(bus.take_outbound_receiver().await);

            let err = bus
                .publish_dialog(SpokenDialog::new("bob", DialogTemplate::NoRecipe))
                .unwrap_err();
            assert!(err.to_string().contains("Outbound channel closed"));
        });
    }
}
