//! Factbot Core — types, message bus, session store, and configuration.
//!
//! This crate provides:
//! - **types**: Dialogue state, per-user session, reply markup
//! - **bus**: Inbound/outbound message types and the tokio-backed queue
//! - **session**: `SessionStore`, the concurrent per-user registry
//! - **config**: JSON config schema, loader, and env var overrides

pub mod bus;
pub mod config;
pub mod session;
pub mod types;
pub mod utils;

pub use session::SessionStore;
pub use types::{DialogueState, ReplyMarkup, Session};
