//! # Chat Widget
//!
//! The controller between the text input, the chat server and the
//! transcript. One submission is:
//!
//! ```text
//! input ─trim─▶ empty? ──yes──▶ nothing happens
//!                 │no
//!                 ▼
//!        append user message, clear input
//!                 │
//!                 ▼
//!        backend.send(text).await
//!                 │
//!     ┌───────────┼───────────────┐
//!     ▼           ▼               ▼
//!   reply     non-2xx       no response / bad body
//!     │      FALLBACK_REJECTED  FALLBACK_UNREACHABLE
//!     └───────────┴───────────────┘
//!                 ▼
//!        append bot message, scroll to end
//! ```
//!
//! Errors never leave the widget. They are logged and turned into one of the
//! two fallback messages.
//!
//! The widget is split into `on_submit` and `send_message` so the TUI can run
//! the network half on a background task. Nothing stops a second submission
//! while the first is still waiting; replies are appended in whatever order
//! they resolve.

use std::sync::Arc;

use log::{info, warn};

use crate::client::{BackendError, ChatBackend};
use crate::core::message::{ChatMessage, Outcome, Sender};
use crate::core::view::ChatView;

#[derive(Clone)]
pub struct ChatWidget {
    backend: Arc<dyn ChatBackend>,
}

impl ChatWidget {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    /// Handles a form submission up to the point where the network is needed.
    ///
    /// Returns the trimmed text to send, or `None` if the input was blank
    /// (in which case the view is left untouched).
    pub fn on_submit<V: ChatView>(&self, view: &mut V) -> Option<String> {
        let text = view.input_value().trim().to_string();
        if text.is_empty() {
            return None;
        }

        Self::append_message(view, text.clone(), Sender::User);
        view.clear_input();
        Some(text)
    }

    /// Sends `text` and classifies the result. Never fails.
    pub async fn exchange(&self, text: &str) -> Outcome {
        match self.backend.send(text).await {
            Ok(reply) => Outcome::Answered(reply),
            Err(BackendError::Rejected { status, message }) => {
                warn!(
                    "{} rejected message (HTTP {}): {}",
                    self.backend.name(),
                    status,
                    message
                );
                Outcome::Rejected
            }
            Err(e) => {
                warn!("{} unreachable: {}", self.backend.name(), e);
                Outcome::Unreachable
            }
        }
    }

    /// Sends `text` and returns the bot message to render for the result.
    pub async fn send_message(&self, text: &str) -> ChatMessage {
        self.exchange(text).await.into_message()
    }

    /// Appends a message and scrolls the transcript so it is visible.
    pub fn append_message<V: ChatView>(view: &mut V, text: impl Into<String>, sender: Sender) {
        view.append_message(ChatMessage::new(text, sender));
        view.scroll_to_end();
    }

    /// The whole submit handler, run to completion.
    pub async fn submit<V: ChatView>(&self, view: &mut V) {
        let Some(text) = self.on_submit(view) else {
            return;
        };

        let reply = self.send_message(&text).await;
        info!("Rendering {} reply", reply.sender.class_name());
        Self::append_message(view, reply.text, reply.sender);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::{FALLBACK_REJECTED, FALLBACK_UNREACHABLE};
    use crate::test_support::{RecordingView, ScriptedBackend};

    fn widget_with(backend: &Arc<ScriptedBackend>) -> ChatWidget {
        ChatWidget::new(backend.clone())
    }

    #[tokio::test]
    async fn test_submit_success_renders_user_then_bot() {
        let backend = Arc::new(ScriptedBackend::replying(vec![Ok("Hi there".to_string())]));
        let widget = widget_with(&backend);
        let mut view = RecordingView::with_input("hello");

        widget.submit(&mut view).await;

        assert_eq!(view.messages.len(), 2);
        assert_eq!(view.messages[0], ChatMessage::user("hello"));
        let last = view.messages.last().unwrap();
        assert_eq!(last.text, "Hi there");
        assert!(last.class().contains("bot-message"));
        assert_eq!(backend.calls(), vec!["hello".to_string()]);
    }

    #[tokio::test]
    async fn test_submit_trims_input() {
        let backend = Arc::new(ScriptedBackend::replying(vec![Ok("ok".to_string())]));
        let widget = widget_with(&backend);
        let mut view = RecordingView::with_input("   spaced out \n");

        widget.submit(&mut view).await;

        assert_eq!(view.messages[0].text, "spaced out");
        assert_eq!(backend.calls(), vec!["spaced out".to_string()]);
    }

    #[tokio::test]
    async fn test_blank_input_is_a_no_op() {
        for input in ["", "   ", "\t\n "] {
            let backend = Arc::new(ScriptedBackend::replying(vec![]));
            let widget = widget_with(&backend);
            let mut view = RecordingView::with_input(input);

            widget.submit(&mut view).await;

            assert!(view.messages.is_empty(), "input {:?} rendered something", input);
            assert!(backend.calls().is_empty(), "input {:?} hit the network", input);
            assert_eq!(view.input, input, "blank input should be left alone");
        }
    }

    #[tokio::test]
    async fn test_rejected_renders_first_fallback() {
        let backend = Arc::new(ScriptedBackend::replying(vec![Err(BackendError::Rejected {
            status: 500,
            message: "boom".to_string(),
        })]));
        let widget = widget_with(&backend);
        let mut view = RecordingView::with_input("hello");

        widget.submit(&mut view).await;

        assert_eq!(view.messages.len(), 2);
        assert_eq!(view.messages[1], ChatMessage::bot(FALLBACK_REJECTED));
    }

    #[tokio::test]
    async fn test_transport_and_parse_render_second_fallback() {
        let errors = vec![
            BackendError::Transport("connection refused".to_string()),
            BackendError::Parse("expected value".to_string()),
        ];
        for err in errors {
            let backend = Arc::new(ScriptedBackend::replying(vec![Err(err)]));
            let widget = widget_with(&backend);
            let mut view = RecordingView::with_input("hello");

            widget.submit(&mut view).await;

            assert_eq!(view.messages.len(), 2);
            assert_eq!(view.messages[1], ChatMessage::bot(FALLBACK_UNREACHABLE));
        }
    }

    #[test]
    fn test_on_submit_clears_input_before_any_network() {
        let backend = Arc::new(ScriptedBackend::replying(vec![]));
        let widget = widget_with(&backend);
        let mut view = RecordingView::with_input("question?");

        let text = widget.on_submit(&mut view);

        assert_eq!(text.as_deref(), Some("question?"));
        assert!(view.input.is_empty());
        assert_eq!(view.messages, vec![ChatMessage::user("question?")]);
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_every_append_scrolls_to_end() {
        let backend = Arc::new(ScriptedBackend::replying(vec![
            Ok("one".to_string()),
            Ok("two".to_string()),
        ]));
        let widget = widget_with(&backend);
        let mut view = RecordingView::with_input("first");

        widget.submit(&mut view).await;
        assert_eq!(view.scroll_top, view.scroll_height());

        view.input = "second".to_string();
        widget.submit(&mut view).await;
        assert_eq!(view.scroll_top, view.scroll_height());
        assert_eq!(view.scroll_top, 4);
    }

    #[tokio::test]
    async fn test_exchange_classifies_results() {
        let backend = Arc::new(ScriptedBackend::replying(vec![
            Ok("fine".to_string()),
            Err(BackendError::Rejected {
                status: 400,
                message: "Please ask a question.".to_string(),
            }),
            Err(BackendError::Transport("reset".to_string())),
        ]));
        let widget = widget_with(&backend);

        assert_eq!(widget.exchange("a").await, Outcome::Answered("fine".to_string()));
        assert_eq!(widget.exchange("b").await, Outcome::Rejected);
        assert_eq!(widget.exchange("c").await, Outcome::Unreachable);
    }
}
