//! Channel Manager — channel lifecycle and outbound routing.
//!
//! Responsibilities:
//! - Register enabled channels
//! - Start/stop all channels concurrently via `tokio::spawn`
//! - Dispatch outbound messages from the bus to the right channel
//!
//! Delivery is at-most-once: a failed send is logged and dropped. Session
//! state has already advanced by the time a reply reaches the dispatcher.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use thiserror::Error;
use tokio::sync::Notify;
use tracing::{debug, error, info, warn};

use factbot_core::bus::{MessageBus, OutboundMessage};

use crate::base::Channel;

/// Why an outbound message could not be delivered.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no channel registered for '{0}'")]
    UnknownChannel(String),

    #[error("channel '{channel}' failed to send to {chat_id}: {source}")]
    Send {
        channel: String,
        chat_id: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

// ─────────────────────────────────────────────
// ChannelManager
// ─────────────────────────────────────────────

/// Manages the lifecycle and message routing for all chat channels.
pub struct ChannelManager {
    /// Registered channels, keyed by name.
    channels: HashMap<String, Arc<dyn Channel>>,
    /// Message bus for outbound message consumption.
    bus: Arc<MessageBus>,
    /// Shutdown signal.
    shutdown: Arc<Notify>,
}

impl ChannelManager {
    pub fn new(bus: Arc<MessageBus>) -> Self {
        Self {
            channels: HashMap::new(),
            bus,
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Register a channel. Overwrites any previous channel with the same name.
    pub fn register(&mut self, channel: Arc<dyn Channel>) {
        let name = channel.name().to_string();
        info!(channel = %name, "registered channel");
        self.channels.insert(name, channel);
    }

    /// Get a registered channel by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Channel>> {
        self.channels.get(name)
    }

    /// Names of all registered channels, sorted.
    pub fn channel_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.channels.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Start all channels + the outbound dispatcher.
    ///
    /// Blocks until shutdown is signaled.
    pub async fn start_all(&self) -> Result<()> {
        if self.channels.is_empty() {
            warn!("no channels registered, nothing to start");
            return Ok(());
        }

        info!(
            channels = ?self.channel_names(),
            "starting {} channel(s)",
            self.channels.len()
        );

        for (name, channel) in &self.channels {
            let ch = channel.clone();
            let ch_name = name.clone();

            tokio::spawn(async move {
                info!(channel = %ch_name, "channel starting");
                if let Err(e) = ch.start().await {
                    error!(channel = %ch_name, error = %e, "channel start failed");
                }
                info!(channel = %ch_name, "channel stopped");
            });
        }

        let bus = self.bus.clone();
        let channels = self.channels.clone();
        let shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            Self::dispatch_outbound(bus, channels, shutdown).await;
        });

        self.shutdown.notified().await;

        info!("channel manager shutting down");
        Ok(())
    }

    /// Stop all channels and the outbound dispatcher.
    pub async fn stop_all(&self) {
        info!("stopping all channels");
        self.shutdown.notify_waiters();

        for (name, channel) in &self.channels {
            debug!(channel = %name, "stopping channel");
            if let Err(e) = channel.stop().await {
                error!(channel = %name, error = %e, "channel stop failed");
            }
        }

        info!("all channels stopped");
    }

    /// Signal the manager to shut down.
    pub fn signal_shutdown(&self) {
        self.shutdown.notify_waiters();
    }

    /// Route one outbound message to its channel.
    pub async fn deliver(
        channels: &HashMap<String, Arc<dyn Channel>>,
        msg: &OutboundMessage,
    ) -> Result<(), DispatchError> {
        let channel = channels
            .get(&msg.channel)
            .ok_or_else(|| DispatchError::UnknownChannel(msg.channel.clone()))?;

        channel.send(msg).await.map_err(|source| DispatchError::Send {
            channel: msg.channel.clone(),
            chat_id: msg.chat_id.clone(),
            source: source.into(),
        })
    }

    /// Outbound dispatcher: drains the bus outbound queue until shutdown.
    async fn dispatch_outbound(
        bus: Arc<MessageBus>,
        channels: HashMap<String, Arc<dyn Channel>>,
        shutdown: Arc<Notify>,
    ) {
        info!("outbound dispatcher started");

        loop {
            tokio::select! {
                msg = bus.consume_outbound() => {
                    match msg {
                        Some(outbound) => {
                            debug!(
                                channel = %outbound.channel,
                                chat_id = %outbound.chat_id,
                                content_len = outbound.content.len(),
                                "dispatching outbound message"
                            );

                            match Self::deliver(&channels, &outbound).await {
                                Ok(()) => {}
                                Err(e @ DispatchError::UnknownChannel(_)) => {
                                    warn!(error = %e, "dropping outbound message");
                                }
                                Err(e) => {
                                    error!(error = %e, "failed to send outbound message");
                                }
                            }
                        }
                        None => {
                            info!("outbound bus closed, dispatcher exiting");
                            break;
                        }
                    }
                }
                _ = shutdown.notified() => {
                    info!("dispatcher received shutdown signal");
                    break;
                }
            }
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
