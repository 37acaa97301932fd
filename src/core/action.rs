//! # Actions
//!
//! Everything that can happen in the chat becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! A reply comes back from the server? That's `Action::ReplyReceived(message)`.
//!
//! `update()` applies an action to a view and returns an `Effect` describing
//! the I/O the caller should start. No I/O happens here.
//!
//! ```text
//! View + Action  →  update()  →  Effect
//! ```

use crate::core::message::ChatMessage;
use crate::core::view::ChatView;
use crate::core::widget::ChatWidget;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Submit,
    ReplyReceived(ChatMessage),
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Send this text to the server and report back with `ReplyReceived`.
    Send(String),
    Quit,
}

pub fn update<V: ChatView>(widget: &ChatWidget, view: &mut V, action: Action) -> Effect {
    match action {
        Action::Submit => match widget.on_submit(view) {
            Some(text) => Effect::Send(text),
            None => Effect::None,
        },
        Action::ReplyReceived(message) => {
            ChatWidget::append_message(view, message.text, message.sender);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
