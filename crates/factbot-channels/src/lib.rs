//! Factbot Channels — chat transports.
//!
//! This crate provides:
//! - **base**: The `Channel` trait every transport implements
//! - **manager**: `ChannelManager` — lifecycle orchestration and outbound message routing
//! - **formatting**: Outbound text helpers
//! - **telegram**: Telegram long-polling transport (feature `telegram`)

pub mod base;
pub mod formatting;
pub mod manager;

#[cfg(feature = "telegram")]
pub mod telegram;

pub use base::Channel;
pub use manager::{ChannelManager, DispatchError};
