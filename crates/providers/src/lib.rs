//! Upstream chat-server client for hearth.
//!
//! The three supported local servers (Nexa, LM Studio, AnythingLLM) all
//! expose the same OpenAI-style `/chat/completions` shape, so a single
//! client parameterized by URL, model identifier, and auth header covers
//! every one of them.

pub mod http;
pub mod router;

pub use http::HttpChatModel;
pub use router::build_from_config;
