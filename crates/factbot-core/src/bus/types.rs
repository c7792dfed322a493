//! Bus event types — messages flowing between channels and the dialogue loop.

use crate::types::ReplyMarkup;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// An inbound text message from a channel.
#[derive(Clone, Debug)]
pub struct InboundMessage {
    /// Channel name (e.g. "telegram", "cli").
    pub channel: String,
    /// Stable sender identifier within the channel.
    ///
    /// Channels fall back to the chat identifier when the transport
    /// doesn't report a per-sender identity.
    pub sender_id: String,
    /// Chat/conversation identifier replies are addressed to.
    pub chat_id: String,
    /// Text content of the message.
    pub content: String,
    /// When the message was received.
    pub timestamp: DateTime<Utc>,
    /// Channel-specific metadata (e.g. message_id, username).
    pub metadata: HashMap<String, String>,
}

impl InboundMessage {
    /// Create a new inbound message with minimal required fields.
    pub fn new(
        channel: impl Into<String>,
        sender_id: impl Into<String>,
        chat_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        InboundMessage {
            channel: channel.into(),
            sender_id: sender_id.into(),
            chat_id: chat_id.into(),
            content: content.into(),
            timestamp: Utc::now(),
            metadata: HashMap::new(),
        }
    }

    /// Session key combining channel and sender (e.g. "telegram:123456").
    ///
    /// Sessions follow the user, not the chat, so the same person talking
    /// from two chats on one channel shares one set of facts.
    pub fn session_key(&self) -> String {
        format!("{}:{}", self.channel, self.sender_id)
    }

    /// Whether there is any text for the dialogue engine to look at.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// An outbound reply from the dialogue loop to a channel.
#[derive(Clone, Debug)]
pub struct OutboundMessage {
    /// Target channel name.
    pub channel: String,
    /// Target chat/conversation identifier.
    pub chat_id: String,
    /// Text content to send.
    pub content: String,
    /// Quick-reply affordance to show or clear alongside the text.
    pub markup: ReplyMarkup,
    /// Channel-specific metadata.
    pub metadata: HashMap<String, String>,
}

impl OutboundMessage {
    /// Create a new outbound message without markup.
    pub fn new(
        channel: impl Into<String>,
        chat_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        OutboundMessage {
            channel: channel.into(),
            chat_id: chat_id.into(),
            content: content.into(),
            markup: ReplyMarkup::None,
            metadata: HashMap::new(),
        }
    }

    /// Attach reply markup.
    pub fn with_markup(mut self, markup: ReplyMarkup) -> Self {
        self.markup = markup;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbound_message_creation() {
        let msg = InboundMessage::new("telegram", "user_42", "chat_99", "Age");

        assert_eq!(msg.channel, "telegram");
        assert_eq!(msg.sender_id, "user_42");
        assert_eq!(msg.chat_id, "chat_99");
        assert_eq!(msg.content, "Age");
        assert!(msg.metadata.is_empty());
    }

    #[test]
    fn test_session_key_uses_sender() {
        let msg = InboundMessage::new("telegram", "42", "-100123", "test");
        assert_eq!(msg.session_key(), "telegram:42");
    }

    #[test]
    fn test_session_key_format_cli() {
        let msg = InboundMessage::new("cli", "local", "default", "hello");
        assert_eq!(msg.session_key(), "cli:local");
    }

    #[test]
    fn test_is_empty() {
        assert!(InboundMessage::new("cli", "u", "c", "").is_empty());
        // Whitespace is content; the dialogue decides what it means.
        assert!(!InboundMessage::new("cli", "u", "c", "  \n").is_empty());
        assert!(!InboundMessage::new("cli", "u", "c", "Done").is_empty());
    }

    #[test]
    fn test_outbound_message_creation() {
        let msg = OutboundMessage::new("telegram", "chat_99", "Until next time!");

        assert_eq!(msg.channel, "telegram");
        assert_eq!(msg.chat_id, "chat_99");
        assert_eq!(msg.content, "Until next time!");
        assert_eq!(msg.markup, ReplyMarkup::None);
    }

    #[test]
    fn test_outbound_with_markup() {
        let msg = OutboundMessage::new("telegram", "1", "bye").with_markup(ReplyMarkup::RemoveMenu);
        assert_eq!(msg.markup, ReplyMarkup::RemoveMenu);
    }

    #[test]
    fn test_inbound_with_metadata() {
        let mut msg = InboundMessage::new("telegram", "1", "1", "hi");
        msg.metadata
            .insert("username".to_string(), "torrefacto".to_string());

        assert_eq!(msg.metadata.get("username").unwrap(), "torrefacto");
    }
}
