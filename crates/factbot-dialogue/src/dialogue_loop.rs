//! Dialogue loop — connects the message bus, the session store, and the
//! dialogue engine.
//!
//! Receives inbound messages, runs the engine under the sender's session
//! lock, and publishes the replies outbound. Delivery happens after the
//! lock is released; a failed publish is logged and the transition stands.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use factbot_core::bus::{InboundMessage, MessageBus, OutboundMessage};
use factbot_core::utils::truncate_string;
use factbot_core::SessionStore;

use crate::engine::{DialogueEngine, Reply};

// ─────────────────────────────────────────────
// DialogueLoop
// ─────────────────────────────────────────────

/// Polls the message bus and answers each message through the engine.
pub struct DialogueLoop {
    /// `None` for direct use, where only `process_direct` is called.
    bus: Option<Arc<MessageBus>>,
    sessions: Arc<SessionStore>,
    engine: DialogueEngine,
}

impl DialogueLoop {
    pub fn new(bus: Arc<MessageBus>, sessions: Arc<SessionStore>, engine: DialogueEngine) -> Self {
        info!(bot_name = %engine.bot_name(), "dialogue loop initialized");
        Self {
            bus: Some(bus),
            sessions,
            engine,
        }
    }

    /// A loop with no bus, driven only through `process_direct`.
    pub fn direct(sessions: Arc<SessionStore>, engine: DialogueEngine) -> Self {
        Self {
            bus: None,
            sessions,
            engine,
        }
    }

    /// The session store backing this loop.
    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// Run the event loop until the inbound channel is closed.
    ///
    /// Messages are handled one at a time, so each user's messages are
    /// applied in the order they arrived on the bus.
    pub async fn run(&self) {
        let Some(bus) = &self.bus else {
            warn!("dialogue loop has no message bus, nothing to run");
            return;
        };

        info!("dialogue loop started, waiting for messages");
        loop {
            match bus.consume_inbound().await {
                Some(msg) => {
                    for outbound in self.process_message(&msg) {
                        if let Err(e) = bus.publish_outbound(outbound).await {
                            error!(
                                error = %e,
                                session_key = %msg.session_key(),
                                "failed to publish outbound message"
                            );
                        }
                    }
                }
                None => {
                    info!("inbound channel closed, dialogue loop exiting");
                    break;
                }
            }
        }
    }

    /// Turn one inbound message into the outbound replies for its chat.
    ///
    /// Empty messages are dropped without touching the session. Whitespace
    /// is not empty; the engine answers it like any other text.
    pub fn process_message(&self, msg: &InboundMessage) -> Vec<OutboundMessage> {
        let session_key = msg.session_key();
        if msg.is_empty() {
            debug!(session_key = %session_key, "ignoring empty message");
            return Vec::new();
        }

        debug!(
            session_key = %session_key,
            content = %truncate_string(&msg.content, 40),
            "received message"
        );

        self.process_direct(&session_key, &msg.content)
            .into_iter()
            .map(|reply| {
                OutboundMessage::new(&msg.channel, &msg.chat_id, reply.text)
                    .with_markup(reply.markup)
            })
            .collect()
    }

    /// Run the engine for `session_key` directly, bypassing the bus.
    ///
    /// Used by the local REPL.
    pub fn process_direct(&self, session_key: &str, text: &str) -> Vec<Reply> {
        if text.is_empty() {
            return Vec::new();
        }
        self.sessions
            .with_session(session_key, |session| self.engine.handle(session, text))
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
