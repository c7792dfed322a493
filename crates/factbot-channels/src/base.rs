//! Channel trait — the interface every chat transport implements.
//!
//! Each channel (Telegram, ...) implements this trait to:
//! - `start()` — begin listening and publish inbound messages to the bus
//! - `stop()` — graceful shutdown
//! - `send()` — deliver one outbound message, markup included
//! - `name()` — channel identifier matching config keys

use async_trait::async_trait;
use factbot_core::bus::OutboundMessage;

/// Every chat channel implements this trait.
///
/// The dialogue engine never sees a channel; only the `ChannelManager`
/// holds them, as `Arc<dyn Channel>`.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Unique channel name (e.g. "telegram").
    ///
    /// Must match `InboundMessage.channel` / `OutboundMessage.channel`.
    fn name(&self) -> &str;

    /// Start listening for incoming messages.
    ///
    /// Long-running: publishes `InboundMessage`s to the bus until `stop()`
    /// is called.
    async fn start(&self) -> anyhow::Result<()>;

    /// Graceful shutdown — stop listening and clean up resources.
    async fn stop(&self) -> anyhow::Result<()>;

    /// Deliver an outbound message.
    ///
    /// Channels without quick-reply support send the text and ignore
    /// `msg.markup`.
    async fn send(&self, msg: &OutboundMessage) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use factbot_core::ReplyMarkup;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    /// Records every message it is asked to send.
    struct RecordingChannel {
        started: Arc<AtomicBool>,
        stopped: Arc<AtomicBool>,
        sent: Arc<tokio::sync::Mutex<Vec<OutboundMessage>>>,
    }

    impl RecordingChannel {
        fn new() -> Self {
            Self {
                started: Arc::new(AtomicBool::new(false)),
                stopped: Arc::new(AtomicBool::new(false)),
                sent: Arc::new(tokio::sync::Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl Channel for RecordingChannel {
        fn name(&self) -> &str {
            "recording"
        }

        async fn start(&self) -> anyhow::Result<()> {
            self.started.store(true, Ordering::SeqCst);
            Ok(())
        }

        async fn stop(&self) -> anyhow::Result<()> {
            self.stopped.store(true, Ordering::SeqCst);
            Ok(())
        }

        async fn send(&self, msg: &OutboundMessage) -> anyhow::Result<()> {
            self.sent.lock().await.push(msg.clone());
            Ok(())
        }
    }

    #[test]
    fn test_channel_name() {
        let ch = RecordingChannel::new();
        assert_eq!(ch.name(), "recording");
    }

    #[tokio::test]
    async fn test_start_stop() {
        let ch = RecordingChannel::new();
        ch.start().await.unwrap();
        ch.stop().await.unwrap();
        assert!(ch.started.load(Ordering::SeqCst));
        assert!(ch.stopped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_send_records_markup() {
        let ch = RecordingChannel::new();
        let msg = OutboundMessage::new("recording", "chat_1", "Until next time!")
            .with_markup(ReplyMarkup::RemoveMenu);
        ch.send(&msg).await.unwrap();

        let sent = ch.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].content, "Until next time!");
        assert_eq!(sent[0].markup, ReplyMarkup::RemoveMenu);
    }
}
