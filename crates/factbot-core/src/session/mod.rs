//! Session store — in-memory, per-user conversation state.
//!
//! Nothing is written to disk; sessions live for the lifetime of the
//! process.

pub mod store;

pub use store::SessionStore;
