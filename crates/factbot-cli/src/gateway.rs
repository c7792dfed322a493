//! Gateway command — orchestrates channels, the dialogue loop, and message
//! routing.
//!
//! Startup sequence:
//! 1. Load config
//! 2. Create message bus and session store
//! 3. Create dialogue loop
//! 4. Create channel manager, register configured channels
//! 5. Run: `tokio::select!` of dialogue loop + channel manager
//! 6. Handle Ctrl+C for graceful shutdown

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use factbot_channels::ChannelManager;
use factbot_core::bus::MessageBus;
use factbot_core::config::{load_config, Config};
use factbot_core::SessionStore;
use factbot_dialogue::{DialogueEngine, DialogueLoop};

use crate::helpers;

/// Run the gateway — starts the dialogue loop + channel manager.
pub async fn run(config_path: Option<&Path>) -> Result<()> {
    println!();
    helpers::print_banner();
    println!("  Mode: Gateway");
    println!();

    let config = load_config(config_path);
    let bus = Arc::new(MessageBus::new(config.bus.capacity));
    let channel_manager = build_channel_manager(&config, bus.clone())?;

    let dialogue = DialogueLoop::new(
        bus.clone(),
        Arc::new(SessionStore::new()),
        DialogueEngine::new(),
    );

    info!(
        channels = ?channel_manager.channel_names(),
        bus_capacity = bus.capacity(),
        "gateway starting"
    );

    println!("  Channels:  {}", channel_manager.channel_names().join(", "));
    println!("  Bus:       {} messages per direction", bus.capacity());
    println!();
    println!("  Ctrl+C to stop");
    println!();

    tokio::select! {
        _ = dialogue.run() => {
            info!("dialogue loop exited");
        }
        result = channel_manager.start_all() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "channel manager error");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            println!();
            println!("  Shutting down...");
            info!(
                sessions = dialogue.sessions().len(),
                "received Ctrl+C, shutting down"
            );
            channel_manager.stop_all().await;
        }
    }

    println!("  Gateway stopped. Goodbye!");
    Ok(())
}

/// Register every configured channel.
///
/// Fails when no channel can run, since the gateway would have nobody to
/// talk to.
fn build_channel_manager(config: &Config, bus: Arc<MessageBus>) -> Result<ChannelManager> {
    let tg = &config.channels.telegram;
    if !tg.is_configured() {
        anyhow::bail!(
            "no Telegram bot token configured; set {} or channels.telegram.token in {}",
            factbot_core::config::loader::TELEGRAM_TOKEN_ENV,
            factbot_core::config::get_config_path().display()
        );
    }

    #[cfg(feature = "telegram")]
    {
        use factbot_channels::telegram::TelegramChannel;

        let mut channel_manager = ChannelManager::new(bus.clone());
        let telegram = TelegramChannel::new(tg.token.clone(), bus, tg.allowed_users.clone());
        channel_manager.register(Arc::new(telegram));
        info!(
            allowed_users = tg.allowed_users.len(),
            "registered telegram channel"
        );
        Ok(channel_manager)
    }

    #[cfg(not(feature = "telegram"))]
    {
        let _ = bus;
        anyhow::bail!("factbot was built without Telegram support; rebuild with `--features telegram`")
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
