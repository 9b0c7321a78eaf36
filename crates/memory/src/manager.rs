//! The memory manager: window eviction plus the rolling summary.

use std::sync::Arc;
use hearth_core::message::Message;
use hearth_core::model::ChatModel;
use tracing::{debug, warn};

use crate::window::ConversationWindow;

/// Memory behavior knobs, resolved once from configuration.
#[derive(Debug, Clone)]
pub struct MemorySettings {
    /// Maximum messages in the short-term window (`W`).
    pub window_size: usize,

    /// When set, the window is still populated; only eviction-triggered
    /// summarization is skipped.
    pub disable_short_memory: bool,

    /// When set, evicted messages are discarded with no trace.
    pub disable_long_memory: bool,

    /// Token budget hint passed to the summarizer. Never enforced.
    pub long_memory_budget: usize,
}

impl Default for MemorySettings {
    fn default() -> Self {
        Self {
            window_size: 20,
            disable_short_memory: false,
            disable_long_memory: true,
            long_memory_budget: 5096,
        }
    }
}

/// Holds the bounded recent-interaction window and the rolling summary.
///
/// Owned exclusively by the dispatch loop for the lifetime of one
/// session. Summarization reuses the session's chat client, so a turn
/// that evicts costs a second network round trip.
pub struct MemoryManager {
    window: ConversationWindow,
    summary: String,
    settings: MemorySettings,
    model: Arc<dyn ChatModel>,
    temperature: f32,
}

impl MemoryManager {
    pub fn new(model: Arc<dyn ChatModel>, settings: MemorySettings, temperature: f32) -> Self {
        Self {
            window: ConversationWindow::new(settings.window_size),
            summary: String::new(),
            settings,
            model,
            temperature,
        }
    }

    /// Record one completed turn.
    ///
    /// Appends both messages to the window, evicts from the front until
    /// the bound holds, and — when anything was evicted and
    /// summarization applies — replaces the summary wholesale with the
    /// result of one model call. Returns the evicted messages.
    pub async fn observe(&mut self, user: Message, assistant: Message) -> Vec<Message> {
        let evicted = self.window.record_turn(user, assistant);

        if !evicted.is_empty() && self.summarization_enabled() {
            self.refresh_summary(&evicted).await;
        } else if !evicted.is_empty() {
            // Evicted messages vanish here. Documented data-loss
            // behavior when long-term memory is off.
            debug!(count = evicted.len(), "Discarding evicted messages");
        }

        evicted
    }

    /// The rolling summary for prompt assembly, present only when
    /// long-term memory is enabled and something has been summarized.
    pub fn context_summary(&self) -> Option<&str> {
        if self.settings.disable_long_memory || self.summary.is_empty() {
            None
        } else {
            Some(&self.summary)
        }
    }

    pub fn window(&self) -> &ConversationWindow {
        &self.window
    }

    /// The raw summary string, regardless of gating. Test/diagnostic use.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    fn summarization_enabled(&self) -> bool {
        !self.settings.disable_long_memory && !self.settings.disable_short_memory
    }

    /// One summarization round trip. On failure the previous summary
    /// is kept unchanged.
    async fn refresh_summary(&mut self, evicted: &[Message]) {
        let evicted_lines = evicted
            .iter()
            .map(Message::as_prompt_line)
            .collect::<Vec<_>>()
            .join("\n");

        let instruction = format!(
            "Update the long-term memory summary for this agent.\n\
             Previous summary:\n{}\n\n\
             Messages that just dropped off short-term memory:\n{}\n\n\
             Current short-term memory:\n{}\n\n\
             Write a concise English summary that keeps the important \
             context from all of the above without duplicating \
             short-term memory. Stay under roughly {} tokens. \
             Respond in English only.",
            self.summary,
            evicted_lines,
            self.window.render_lines(),
            self.settings.long_memory_budget,
        );

        let request = [Message::system(instruction)];
        match self.model.complete(&request, self.temperature).await {
            Ok(text) => {
                self.summary = text.trim().to_string();
                debug!(len = self.summary.len(), "Refreshed long-term summary");
            }
            Err(e) => {
                warn!(error = %e, "Summarization failed, keeping previous summary");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use hearth_core::error::UpstreamError;
    use std::sync::Mutex;

    /// A scripted model that counts calls and can be told to fail.
    struct StubModel {
        reply: String,
        fail: bool,
        calls: Mutex<usize>,
    }

    impl StubModel {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.into(),
                fail: false,
                calls: Mutex::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: String::new(),
                fail: true,
                calls: Mutex::new(0),
            })
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl ChatModel for StubModel {
        fn name(&self) -> &str {
            "stub"
        }

        async fn complete(
            &self,
            _messages: &[Message],
            _temperature: f32,
        ) -> Result<String, UpstreamError> {
            *self.calls.lock().unwrap() += 1;
            if self.fail {
                Err(UpstreamError::Network("connection refused".into()))
            } else {
                Ok(self.reply.clone())
            }
        }
    }

    fn settings(window_size: usize, long_memory: bool) -> MemorySettings {
        MemorySettings {
            window_size,
            disable_short_memory: false,
            disable_long_memory: !long_memory,
            long_memory_budget: 5096,
        }
    }

    #[tokio::test]
    async fn window_bound_holds_across_turns() {
        let model = StubModel::replying("summary");
        let mut memory = MemoryManager::new(model, settings(4, false), 0.7);

        for n in 0..8 {
            memory
                .observe(
                    Message::user(format!("q{n}")),
                    Message::assistant(format!("a{n}")),
                )
                .await;
            assert!(memory.window().len() <= 4);
        }
    }

    #[tokio::test]
    async fn summary_untouched_when_long_memory_disabled() {
        let model = StubModel::replying("should never appear");
        let mut memory = MemoryManager::new(model.clone(), settings(2, false), 0.7);

        for n in 0..5 {
            memory
                .observe(
                    Message::user(format!("q{n}")),
                    Message::assistant(format!("a{n}")),
                )
                .await;
        }

        assert_eq!(memory.summary(), "");
        assert_eq!(model.calls(), 0, "no summarization call should be made");
    }

    #[tokio::test]
    async fn eviction_triggers_one_summarization_call() {
        let model = StubModel::replying("  the user asked things  ");
        let mut memory = MemoryManager::new(model.clone(), settings(2, true), 0.7);

        memory
            .observe(Message::user("q0"), Message::assistant("a0"))
            .await;
        assert_eq!(model.calls(), 0);

        let evicted = memory
            .observe(Message::user("q1"), Message::assistant("a1"))
            .await;
        assert_eq!(evicted.len(), 2);
        assert_eq!(model.calls(), 1);
        // Whitespace is trimmed; summary replaced wholesale.
        assert_eq!(memory.context_summary(), Some("the user asked things"));
    }

    #[tokio::test]
    async fn failed_summarization_keeps_previous_summary() {
        let good = StubModel::replying("first summary");
        let mut memory = MemoryManager::new(good, settings(2, true), 0.7);
        memory
            .observe(Message::user("q0"), Message::assistant("a0"))
            .await;
        memory
            .observe(Message::user("q1"), Message::assistant("a1"))
            .await;
        assert_eq!(memory.summary(), "first summary");

        // Swap in a failing model by rebuilding with carried state.
        let failing = StubModel::failing();
        let mut broken = MemoryManager {
            window: memory.window.clone(),
            summary: memory.summary.clone(),
            settings: settings(2, true),
            model: failing.clone(),
            temperature: 0.7,
        };

        broken
            .observe(Message::user("q2"), Message::assistant("a2"))
            .await;
        assert_eq!(failing.calls(), 1);
        assert_eq!(broken.summary(), "first summary");
    }

    #[tokio::test]
    async fn disable_short_memory_still_fills_window() {
        let model = StubModel::replying("summary");
        let quirky = MemorySettings {
            window_size: 2,
            disable_short_memory: true,
            disable_long_memory: false,
            long_memory_budget: 5096,
        };
        let mut memory = MemoryManager::new(model.clone(), quirky, 0.7);

        for n in 0..4 {
            memory
                .observe(
                    Message::user(format!("q{n}")),
                    Message::assistant(format!("a{n}")),
                )
                .await;
        }

        // Window populated and bounded, but no summarization happened.
        assert_eq!(memory.window().len(), 2);
        assert_eq!(model.calls(), 0);
        assert_eq!(memory.summary(), "");
    }

    #[tokio::test]
    async fn single_slot_window_keeps_most_recent() {
        let model = StubModel::replying("summary");
        let mut memory = MemoryManager::new(model, settings(1, false), 0.7);

        memory
            .observe(Message::user("q0"), Message::assistant("a0"))
            .await;
        memory
            .observe(Message::user("q1"), Message::assistant("a1"))
            .await;

        assert_eq!(memory.window().len(), 1);
        assert_eq!(memory.window().iter().next().unwrap().content, "a1");
    }
}
