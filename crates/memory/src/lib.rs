//! Memory system for hearth.
//!
//! Two layers, both session-scoped:
//!
//! - **Short-term**: a bounded FIFO window of recent messages
//!   ([`ConversationWindow`]).
//! - **Long-term**: a single rolling summary string standing in for
//!   messages evicted from the window, refreshed by one model call per
//!   eviction ([`MemoryManager`]).

pub mod manager;
pub mod window;

pub use manager::{MemoryManager, MemorySettings};
pub use window::ConversationWindow;
