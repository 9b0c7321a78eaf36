//! Prompt assembly.
//!
//! The layering order is fixed for reproducibility:
//!
//! 1. the agent's core identity
//! 2. the long-term summary (only if enabled and non-empty)
//! 3. the recent-interaction window (only if non-empty)
//! 4. the new user message, last

use hearth_core::message::Message;
use hearth_memory::ConversationWindow;

/// Assemble the message sequence for one primary model call.
pub fn assemble_prompt(
    identity: &str,
    summary: Option<&str>,
    window: &ConversationWindow,
    user_input: &str,
) -> Vec<Message> {
    let mut messages = vec![Message::system(identity)];

    if let Some(summary) = summary {
        messages.push(Message::system(format!("Long-Term Memory:\n{summary}")));
    }

    if !window.is_empty() {
        messages.push(Message::system("Recent Interactions:"));
        for message in window.iter() {
            messages.push(Message::system(message.as_prompt_line()));
        }
    }

    messages.push(Message::user(user_input));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_core::message::Role;

    fn window_with_turn() -> ConversationWindow {
        let mut window = ConversationWindow::new(10);
        window.record_turn(Message::user("hi"), Message::assistant("hello"));
        window
    }

    #[test]
    fn minimal_prompt_is_identity_then_input() {
        let window = ConversationWindow::new(10);
        let messages = assemble_prompt("identity text", None, &window, "question");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, "identity text");
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "question");
    }

    #[test]
    fn summary_slots_in_after_identity() {
        let window = ConversationWindow::new(10);
        let messages = assemble_prompt("identity", Some("the digest"), &window, "q");

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].content, "Long-Term Memory:\nthe digest");
        assert_eq!(messages[1].role, Role::System);
    }

    #[test]
    fn window_renders_as_system_lines() {
        let window = window_with_turn();
        let messages = assemble_prompt("identity", None, &window, "q");

        assert_eq!(messages.len(), 5);
        assert_eq!(messages[1].content, "Recent Interactions:");
        assert_eq!(messages[2].content, "User: hi");
        assert_eq!(messages[3].content, "Assistant: hello");
        assert!(messages[1..4].iter().all(|m| m.role == Role::System));
        assert_eq!(messages[4].role, Role::User);
    }

    #[test]
    fn full_layering_order() {
        let window = window_with_turn();
        let messages = assemble_prompt("identity", Some("digest"), &window, "next question");

        let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(
            contents,
            vec![
                "identity",
                "Long-Term Memory:\ndigest",
                "Recent Interactions:",
                "User: hi",
                "Assistant: hello",
                "next question",
            ]
        );
    }
}
