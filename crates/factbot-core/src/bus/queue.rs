//! Async message bus between channels and the dialogue loop.
//!
//! Two bounded `tokio::sync::mpsc` queues. The inbound queue has a single
//! consumer (the dialogue loop), which is what keeps each user's messages
//! in arrival order.

use super::types::{InboundMessage, OutboundMessage};
use tokio::sync::mpsc;

/// The message bus connecting channels ↔ dialogue loop.
///
/// - Channels publish to `inbound` (user messages arriving)
/// - The dialogue loop consumes `inbound` and publishes replies to `outbound`
/// - The channel manager consumes `outbound` and routes to the right channel
pub struct MessageBus {
    capacity: usize,
    inbound_tx: mpsc::Sender<InboundMessage>,
    inbound_rx: tokio::sync::Mutex<mpsc::Receiver<InboundMessage>>,
    outbound_tx: mpsc::Sender<OutboundMessage>,
    outbound_rx: tokio::sync::Mutex<mpsc::Receiver<OutboundMessage>>,
}

impl MessageBus {
    /// Create a new message bus; each direction buffers `capacity` messages.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (inbound_tx, inbound_rx) = mpsc::channel(capacity);
        let (outbound_tx, outbound_rx) = mpsc::channel(capacity);

        MessageBus {
            capacity,
            inbound_tx,
            inbound_rx: tokio::sync::Mutex::new(inbound_rx),
            outbound_tx,
            outbound_rx: tokio::sync::Mutex::new(outbound_rx),
        }
    }

    /// Buffer size of each queue.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Publish a user message from a channel (inbound).
    pub async fn publish_inbound(
        &self,
        msg: InboundMessage,
    ) -> Result<(), mpsc::error::SendError<InboundMessage>> {
        self.inbound_tx.send(msg).await
    }

    /// Wait for the next inbound message.
    /// Returns None if all senders are dropped.
    pub async fn consume_inbound(&self) -> Option<InboundMessage> {
        let mut rx = self.inbound_rx.lock().await;
        rx.recv().await
    }

    /// Publish a reply to a channel (outbound).
    pub async fn publish_outbound(
        &self,
        msg: OutboundMessage,
    ) -> Result<(), mpsc::error::SendError<OutboundMessage>> {
        self.outbound_tx.send(msg).await
    }

    /// Wait for the next outbound message.
    /// Returns None if all senders are dropped.
    pub async fn consume_outbound(&self) -> Option<OutboundMessage> {
        let mut rx = self.outbound_rx.lock().await;
        rx.recv().await
    }

    /// Clone of the inbound sender, for channels.
    pub fn inbound_sender(&self) -> mpsc::Sender<InboundMessage> {
        self.inbound_tx.clone()
    }

    /// Clone of the outbound sender.
    pub fn outbound_sender(&self) -> mpsc::Sender<OutboundMessage> {
        self.outbound_tx.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReplyMarkup;

    #[tokio::test]
    async fn test_inbound_message_flow() {
        let bus = MessageBus::new(10);

        let msg = InboundMessage::new("telegram", "42", "42", "/start");
        bus.publish_inbound(msg).await.unwrap();

        let received = bus.consume_inbound().await.unwrap();
        assert_eq!(received.channel, "telegram");
        assert_eq!(received.content, "/start");
    }

    #[tokio::test]
    async fn test_outbound_keeps_markup() {
        let bus = MessageBus::new(10);

        let msg = OutboundMessage::new("telegram", "42", "Until next time!")
            .with_markup(ReplyMarkup::RemoveMenu);
        bus.publish_outbound(msg).await.unwrap();

        let received = bus.consume_outbound().await.unwrap();
        assert_eq!(received.chat_id, "42");
        assert_eq!(received.markup, ReplyMarkup::RemoveMenu);
    }

    #[tokio::test]
    async fn test_same_user_ordering() {
        let bus = MessageBus::new(10);

        for text in ["Age", "25", "/show_data"] {
            let msg = InboundMessage::new("telegram", "7", "7", text);
            bus.publish_inbound(msg).await.unwrap();
        }

        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(bus.consume_inbound().await.unwrap().content);
        }
        assert_eq!(seen, vec!["Age", "25", "/show_data"]);
    }

    #[tokio::test]
    async fn test_zero_capacity_clamped() {
        let bus = MessageBus::new(0);
        assert_eq!(bus.capacity(), 1);

        bus.publish_inbound(InboundMessage::new("cli", "u", "c", "Done"))
            .await
            .unwrap();
        assert_eq!(bus.consume_inbound().await.unwrap().content, "Done");
    }

    #[tokio::test]
    async fn test_multiple_users_concurrently() {
        let bus = std::sync::Arc::new(MessageBus::new(10));

        let bus1 = bus.clone();
        let bus2 = bus.clone();

        let h1 = tokio::spawn(async move {
            let msg = InboundMessage::new("telegram", "1", "1", "Age");
            bus1.publish_inbound(msg).await.unwrap();
        });

        let h2 = tokio::spawn(async move {
            let msg = InboundMessage::new("telegram", "2", "2", "Done");
            bus2.publish_inbound(msg).await.unwrap();
        });

        h1.await.unwrap();
        h2.await.unwrap();

        let r1 = bus.consume_inbound().await.unwrap();
        let r2 = bus.consume_inbound().await.unwrap();

        let senders: Vec<&str> = vec![r1.sender_id.as_str(), r2.sender_id.as_str()];
        assert!(senders.contains(&"1"));
        assert!(senders.contains(&"2"));
    }

    #[tokio::test]
    async fn test_consume_waits_while_bus_alive() {
        let bus = MessageBus::new(4);
        let sender = bus.inbound_sender();
        sender
            .send(InboundMessage::new("cli", "u", "c", "Age"))
            .await
            .unwrap();
        drop(sender);

        assert!(bus.consume_inbound().await.is_some());
        // The bus itself still holds a sender, so the queue stays open.
        let pending = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            bus.consume_inbound(),
        )
        .await;
        assert!(pending.is_err());
    }
}
