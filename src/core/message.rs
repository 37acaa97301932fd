use serde::{Deserialize, Serialize};

/// Shown when the server answers with a non-2xx status.
pub const FALLBACK_REJECTED: &str = "Sorry, I couldn't process your request.";
/// Shown when no usable response arrives at all.
pub const FALLBACK_UNREACHABLE: &str = "There was an error connecting to the server.";

/// Who a message is attributed to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// Category name derived from the sender, e.g. `"bot-message"`.
    pub fn class_name(self) -> &'static str {
        match self {
            Sender::User => "user-message",
            Sender::Bot => "bot-message",
        }
    }
}

/// A single rendered transcript entry. Never mutated after creation.
///
/// The text is always displayed literally; nothing downstream interprets it
/// as markup.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: String,
    pub sender: Sender,
}

impl ChatMessage {
    pub fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            text: text.into(),
            sender,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Bot)
    }

    /// Full class list, e.g. `"message user-message"`.
    pub fn class(&self) -> String {
        format!("message {}", self.sender.class_name())
    }
}

/// How a single round trip ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 2xx with a parsable reply.
    Answered(String),
    /// Non-2xx status. Server detail is not shown.
    Rejected,
    /// No response, or a body that could not be read.
    Unreachable,
}

impl Outcome {
    /// The bot message to render for this outcome.
    pub fn into_message(self) -> ChatMessage {
        match self {
            Outcome::Answered(text) => ChatMessage::bot(text),
            Outcome::Rejected => ChatMessage::bot(FALLBACK_REJECTED),
            Outcome::Unreachable => ChatMessage::bot(FALLBACK_UNREACHABLE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_derived_from_sender() {
        assert_eq!(ChatMessage::user("hi").class(), "message user-message");
        assert_eq!(ChatMessage::bot("hi").class(), "message bot-message");
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        let json = serde_json::to_string(&ChatMessage::bot("yo")).unwrap();
        assert_eq!(json, r#"{"text":"yo","sender":"bot"}"#);
    }

    #[test]
    fn test_outcome_fallbacks() {
        assert_eq!(Outcome::Rejected.into_message().text, FALLBACK_REJECTED);
        assert_eq!(Outcome::Unreachable.into_message().text, FALLBACK_UNREACHABLE);

        let answered = Outcome::Answered("Hi there".to_string()).into_message();
        assert_eq!(answered.text, "Hi there");
        assert_eq!(answered.sender, Sender::Bot);
    }

    #[test]
    fn test_markup_is_kept_verbatim() {
        let msg = ChatMessage::bot("<b>bold</b> & **stars**");
        assert_eq!(msg.text, "<b>bold</b> & **stars**");
    }
}
