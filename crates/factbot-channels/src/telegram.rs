//! Telegram channel — bot integration via `teloxide`.
//!
//! Features:
//! - Long polling (no webhook/public IP needed)
//! - Text messages only; everything else is ignored
//! - Allow-list by user ID or username
//! - Quick-reply menu rendered as a one-time reply keyboard
//! - Message splitting for >4096 char replies

use std::sync::Arc;

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{
    BotCommand, KeyboardButton, KeyboardMarkup, KeyboardRemove,
    ReplyMarkup as TelegramMarkup, UpdateKind,
};
use tokio::sync::Notify;
use tracing::{debug, error, info, warn};

use factbot_core::bus::{InboundMessage, MessageBus, OutboundMessage};
use factbot_core::ReplyMarkup;

use crate::base::Channel;
use crate::formatting::split_message;

/// Telegram message length limit.
const TELEGRAM_MAX_LEN: usize = 4096;

// ─────────────────────────────────────────────
// TelegramChannel
// ─────────────────────────────────────────────

/// Telegram bot channel using long polling via `teloxide`.
pub struct TelegramChannel {
    bot: Bot,
    /// Message bus for inbound/outbound.
    bus: Arc<MessageBus>,
    /// Allow-list of user IDs / usernames. Empty = allow everyone.
    allowed_users: Vec<String>,
    /// Shutdown signal.
    shutdown: Arc<Notify>,
}

impl TelegramChannel {
    /// Create a new Telegram channel.
    pub fn new(token: String, bus: Arc<MessageBus>, allowed_users: Vec<String>) -> Self {
        Self {
            bot: Bot::new(token),
            bus,
            allowed_users,
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Check if a sender is allowed, by numeric ID or by username.
    ///
    /// Empty allow-list = allow everyone.
    fn is_allowed(&self, user_id: &str, username: Option<&str>) -> bool {
        if self.allowed_users.is_empty() {
            return true;
        }
        self.allowed_users.iter().any(|allowed| {
            allowed == user_id
                || username.is_some_and(|name| allowed.trim_start_matches('@') == name)
        })
    }

    /// Handle an incoming Telegram update.
    async fn handle_update(&self, update: &Update) {
        let message = match &update.kind {
            UpdateKind::Message(msg) => msg,
            _ => return,
        };

        let Some(text) = message.text() else {
            debug!(chat = message.chat.id.0, "non-text telegram message, ignoring");
            return;
        };

        let chat_id = message.chat.id.0.to_string();
        let user = message.from.as_ref();
        // Private chats without a sender fall back to the chat id.
        let sender_id = user
            .map(|u| u.id.0.to_string())
            .unwrap_or_else(|| chat_id.clone());
        let username = user.and_then(|u| u.username.clone());

        if !self.is_allowed(&sender_id, username.as_deref()) {
            warn!(
                sender = %sender_id,
                chat = %chat_id,
                "telegram message from unauthorized user, ignoring"
            );
            return;
        }

        let content = strip_bot_mention(text);
        if content.is_empty() {
            return;
        }

        debug!(
            sender = %sender_id,
            chat = %chat_id,
            content_len = content.len(),
            "telegram inbound message"
        );

        let mut inbound = InboundMessage::new("telegram", &sender_id, &chat_id, content);
        if let Some(name) = username {
            inbound.metadata.insert("username".into(), name);
        }
        if let Some(u) = user {
            inbound
                .metadata
                .insert("first_name".into(), u.first_name.clone());
        }
        inbound
            .metadata
            .insert("message_id".into(), message.id.0.to_string());

        if let Err(e) = self.bus.publish_inbound(inbound).await {
            error!(error = %e, "failed to publish telegram message to bus");
        }
    }
}

/// Drop a trailing `@botname` from a leading command (e.g. `/start@mybot`).
///
/// Group chats address commands this way; anything else passes through.
fn strip_bot_mention(text: &str) -> String {
    if !text.starts_with('/') {
        return text.to_string();
    }
    let (command, rest) = match text.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, Some(rest)),
        None => (text, None),
    };
    let command = command.split('@').next().unwrap_or(command);
    match rest {
        Some(rest) => format!("{command} {rest}"),
        None => command.to_string(),
    }
}

/// Map a reply's markup onto Telegram's reply keyboard.
fn to_telegram_markup(markup: &ReplyMarkup) -> Option<TelegramMarkup> {
    match markup {
        ReplyMarkup::None => None,
        ReplyMarkup::Menu(rows) => {
            let keyboard = rows
                .iter()
                .map(|row| row.iter().map(KeyboardButton::new).collect::<Vec<_>>());
            Some(TelegramMarkup::Keyboard(
                KeyboardMarkup::new(keyboard)
                    .one_time_keyboard()
                    .resize_keyboard(),
            ))
        }
        ReplyMarkup::RemoveMenu => Some(TelegramMarkup::KeyboardRemove(KeyboardRemove::new())),
    }
}

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn start(&self) -> anyhow::Result<()> {
        info!("starting telegram channel (long polling)");

        let commands = vec![
            BotCommand::new("start", "Start the conversation"),
            BotCommand::new("show_data", "Show what you told me so far"),
        ];
        if let Err(e) = self.bot.set_my_commands(commands).await {
            warn!(error = %e, "failed to set bot commands menu");
        }

        info!("telegram bot connected, polling for updates");

        let mut offset: i32 = 0;

        loop {
            tokio::select! {
                updates = self.bot.get_updates().offset(offset).timeout(30).send() => {
                    match updates {
                        Ok(updates) => {
                            for update in &updates {
                                offset = (update.id.0 as i32).wrapping_add(1);
                                self.handle_update(update).await;
                            }
                        }
                        Err(e) => {
                            error!(error = %e, "telegram polling error");
                            tokio::time::sleep(tokio::time::Duration::from_secs(5)).await;
                        }
                    }
                }
                _ = self.shutdown.notified() => {
                    info!("telegram channel shutting down");
                    break;
                }
            }
        }

        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        info!("stopping telegram channel");
        self.shutdown.notify_waiters();
        Ok(())
    }

    async fn send(&self, msg: &OutboundMessage) -> anyhow::Result<()> {
        let chat_id: i64 = msg
            .chat_id
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid telegram chat_id: {}", msg.chat_id))?;

        let chunks = split_message(&msg.content, TELEGRAM_MAX_LEN);
        let last = chunks.len().saturating_sub(1);

        // The keyboard rides on the final chunk so it stays under the reply.
        for (i, chunk) in chunks.into_iter().enumerate() {
            let mut request = self.bot.send_message(ChatId(chat_id), chunk);
            if i == last {
                if let Some(markup) = to_telegram_markup(&msg.markup) {
                    request = request.reply_markup(markup);
                }
            }
            request.await?;
        }

        debug!(chat_id = chat_id, "telegram message sent");
        Ok(())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_channel() -> TelegramChannel {
        let bus = Arc::new(MessageBus::new(32));
        TelegramChannel::new("test_token".into(), bus, vec![])
    }

    fn create_restricted_channel() -> TelegramChannel {
        let bus = Arc::new(MessageBus::new(32));
        TelegramChannel::new(
            "test_token".into(),
            bus,
            vec!["123456".into(), "@johndoe".into()],
        )
    }

    #[test]
    fn test_channel_name() {
        let ch = create_test_channel();
        assert_eq!(ch.name(), "telegram");
    }

    #[test]
    fn test_is_allowed_empty_list() {
        let ch = create_test_channel();
        assert!(ch.is_allowed("1", None));
        assert!(ch.is_allowed("123", Some("user")));
    }

    #[test]
    fn test_is_allowed_by_id() {
        let ch = create_restricted_channel();
        assert!(ch.is_allowed("123456", Some("someuser")));
        assert!(ch.is_allowed("123456", None));
    }

    #[test]
    fn test_is_allowed_by_username() {
        let ch = create_restricted_channel();
        assert!(ch.is_allowed("999999", Some("johndoe")));
    }

    #[test]
    fn test_is_allowed_denied() {
        let ch = create_restricted_channel();
        assert!(!ch.is_allowed("999999", Some("stranger")));
        assert!(!ch.is_allowed("999999", None));
    }

    #[test]
    fn test_strip_bot_mention() {
        assert_eq!(strip_bot_mention("/start@factbot"), "/start");
        assert_eq!(strip_bot_mention("/show_data"), "/show_data");
        assert_eq!(strip_bot_mention("/start@factbot now"), "/start now");
        assert_eq!(strip_bot_mention("mail me@example.com"), "mail me@example.com");
    }

    #[test]
    fn test_menu_becomes_keyboard() {
        let markup = ReplyMarkup::Menu(vec![
            vec!["Age".into(), "Favourite colour".into()],
            vec!["Done".into()],
        ]);
        match to_telegram_markup(&markup) {
            Some(TelegramMarkup::Keyboard(kb)) => {
                assert_eq!(kb.keyboard.len(), 2);
                assert_eq!(kb.keyboard[0][1].text, "Favourite colour");
                assert_eq!(kb.keyboard[1][0].text, "Done");
            }
            other => panic!("expected keyboard, got {other:?}"),
        }
    }

    #[test]
    fn test_remove_menu_and_none() {
        assert!(matches!(
            to_telegram_markup(&ReplyMarkup::RemoveMenu),
            Some(TelegramMarkup::KeyboardRemove(_))
        ));
        assert!(to_telegram_markup(&ReplyMarkup::None).is_none());
    }
}
