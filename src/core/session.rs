//! # Chat Session
//!
//! The transcript currently on screen. Append-only, unbounded, in memory
//! only. It goes away with the process.

use crate::core::message::{ChatMessage, Sender};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of messages attributed to `sender`.
    pub fn count_from(&self, sender: Sender) -> usize {
        self.messages.iter().filter(|m| m.sender == sender).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_order() {
        let mut session = ChatSession::new();
        session.push(ChatMessage::user("one"));
        session.push(ChatMessage::bot("two"));
        session.push(ChatMessage::user("three"));

        let texts: Vec<&str> = session.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_count_from() {
        let mut session = ChatSession::new();
        assert!(session.is_empty());
        session.push(ChatMessage::user("a"));
        session.push(ChatMessage::bot("b"));
        session.push(ChatMessage::user("c"));
        assert_eq!(session.count_from(Sender::User), 2);
        assert_eq!(session.count_from(Sender::Bot), 1);
        assert_eq!(session.len(), 3);
    }
}
