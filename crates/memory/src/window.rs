//! The bounded short-term conversation window.

use hearth_core::message::Message;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// An ordered sequence of recent messages, bounded at `max` entries.
///
/// Messages are appended in user/assistant pairs but evicted singly,
/// so an odd `max` can split a pair across the eviction boundary. That
/// is accepted behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationWindow {
    messages: VecDeque<Message>,
    max: usize,
}

impl ConversationWindow {
    /// Create an empty window bounded at `max` messages.
    pub fn new(max: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(max + 2),
            max,
        }
    }

    /// Append one turn (user message, then assistant message), then
    /// evict from the front until the bound holds again.
    ///
    /// Returns the evicted messages in eviction order (oldest first).
    /// The `len <= max` invariant holds when this returns.
    pub fn record_turn(&mut self, user: Message, assistant: Message) -> Vec<Message> {
        self.messages.push_back(user);
        self.messages.push_back(assistant);

        let mut evicted = Vec::new();
        while self.messages.len() > self.max {
            if let Some(oldest) = self.messages.pop_front() {
                evicted.push(oldest);
            }
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// Iterate the window in conversation order.
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    /// Flatten the window to `Role: content` lines for prompt text.
    pub fn render_lines(&self) -> String {
        self.messages
            .iter()
            .map(Message::as_prompt_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_core::message::Role;

    fn turn(n: usize) -> (Message, Message) {
        (
            Message::user(format!("question {n}")),
            Message::assistant(format!("answer {n}")),
        )
    }

    #[test]
    fn length_never_exceeds_bound() {
        let mut window = ConversationWindow::new(4);
        for n in 0..10 {
            let (u, a) = turn(n);
            window.record_turn(u, a);
            assert!(window.len() <= 4, "window exceeded bound at turn {n}");
        }
    }

    #[test]
    fn eviction_is_strict_fifo() {
        let mut window = ConversationWindow::new(2);
        let (u0, a0) = turn(0);
        window.record_turn(u0, a0);

        let (u1, a1) = turn(1);
        let evicted = window.record_turn(u1, a1);

        assert_eq!(evicted.len(), 2);
        assert_eq!(evicted[0].content, "question 0");
        assert_eq!(evicted[1].content, "answer 0");
    }

    #[test]
    fn odd_bound_splits_a_pair() {
        // With max = 1, each turn appends two and evicts until one
        // remains: only the assistant half of the pair survives.
        let mut window = ConversationWindow::new(1);
        let (u0, a0) = turn(0);
        window.record_turn(u0, a0);
        assert_eq!(window.len(), 1);

        let (u1, a1) = turn(1);
        window.record_turn(u1, a1);
        assert_eq!(window.len(), 1);

        let last = window.iter().next().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.content, "answer 1");
    }

    #[test]
    fn no_eviction_under_bound() {
        let mut window = ConversationWindow::new(10);
        let (u, a) = turn(0);
        let evicted = window.record_turn(u, a);
        assert!(evicted.is_empty());
        assert_eq!(window.len(), 2);
    }

    #[test]
    fn render_lines_flattens_in_order() {
        let mut window = ConversationWindow::new(4);
        let (u, a) = turn(0);
        window.record_turn(u, a);
        let lines = window.render_lines();
        assert_eq!(lines, "User: question 0\nAssistant: answer 0");
    }
}
