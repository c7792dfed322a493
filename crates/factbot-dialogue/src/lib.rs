//! Factbot Dialogue — the fact-gathering conversation.
//!
//! This crate contains:
//! - **input**: Classification of inbound text into commands, menu picks, or free text
//! - **menu**: The fixed quick-reply menu
//! - **facts**: Rendering of a user's facts
//! - **engine**: `DialogueEngine`, the per-user state machine
//! - **dialogue_loop**: `DialogueLoop`, bus ↔ session store ↔ engine

pub mod dialogue_loop;
pub mod engine;
pub mod facts;
pub mod input;
pub mod menu;

pub use dialogue_loop::DialogueLoop;
pub use engine::{DialogueEngine, Reply};
pub use facts::format_facts;
pub use input::Input;
