//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::client::{BackendError, ChatBackend};
use crate::core::message::ChatMessage;
use crate::core::view::ChatView;
use crate::core::widget::ChatWidget;

/// A backend that hands out pre-scripted results in order and records
/// every message it was asked to send.
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<String, BackendError>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn replying(replies: Vec<Result<String, BackendError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn send(&self, message: &str) -> Result<String, BackendError> {
        self.calls.lock().unwrap().push(message.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::Transport("no scripted reply".to_string())))
    }
}

/// A widget whose backend has nothing scripted.
pub fn noop_widget() -> ChatWidget {
    ChatWidget::new(Arc::new(ScriptedBackend::replying(Vec::new())))
}

/// An in-memory view. Each message is one unit of scroll height.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub input: String,
    pub messages: Vec<ChatMessage>,
    pub scroll_top: usize,
}

impl RecordingView {
    pub fn with_input(input: &str) -> Self {
        Self {
            input: input.to_string(),
            ..Default::default()
        }
    }

    pub fn scroll_height(&self) -> usize {
        self.messages.len()
    }
}

impl ChatView for RecordingView {
    fn input_value(&self) -> String {
        self.input.clone()
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }

    fn append_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    fn scroll_to_end(&mut self) {
        self.scroll_top = self.scroll_height();
    }
}
