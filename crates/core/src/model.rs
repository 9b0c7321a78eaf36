//! ChatModel trait — the abstraction over the upstream chat server.
//!
//! A ChatModel knows how to send an ordered message sequence to a
//! locally hosted LLM endpoint and return the completion text.
//!
//! Implementations: any OpenAI-style `/chat/completions` server
//! (Nexa, LM Studio, AnythingLLM).

use async_trait::async_trait;
use crate::error::UpstreamError;
use crate::message::Message;

/// The core ChatModel trait.
///
/// The dispatch loop and the memory manager both call `complete()`
/// without knowing which upstream server is configured. A call is one
/// network round trip: no retries, no fallback provider.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// A human-readable name for this backend (e.g., "nexa", "lmstudio").
    fn name(&self) -> &str;

    /// Send the messages and return the completion text.
    async fn complete(
        &self,
        messages: &[Message],
        temperature: f32,
    ) -> std::result::Result<String, UpstreamError>;

    /// Send the messages and stream completion chunks.
    ///
    /// Streaming is an explicitly unsupported variant for the local
    /// servers this crate targets; the default implementation refuses
    /// rather than silently falling back to `complete()`.
    async fn stream(
        &self,
        _messages: &[Message],
        _temperature: f32,
    ) -> std::result::Result<
        tokio::sync::mpsc::Receiver<std::result::Result<String, UpstreamError>>,
        UpstreamError,
    > {
        Err(UpstreamError::StreamingUnsupported(self.name().to_string()))
    }
}
