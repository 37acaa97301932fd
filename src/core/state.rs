//! # Application State
//!
//! Core state for the chat client. Presentation state (scroll offsets,
//! the input buffer) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── session: ChatSession      // transcript on screen
//! ├── bot_name: String          // label for bot messages
//! ├── user_name: String         // label for user messages
//! ├── server_url: String        // shown in the title bar
//! ├── status_message: String    // status bar text
//! └── in_flight: usize          // requests awaiting a reply
//! ```

use crate::core::config::ResolvedConfig;
use crate::core::message::Sender;
use crate::core::session::ChatSession;

pub struct App {
    pub session: ChatSession,
    pub bot_name: String,
    pub user_name: String,
    pub server_url: String,
    pub status_message: String,
    pub in_flight: usize,
}

impl App {
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            session: ChatSession::new(),
            bot_name: config.bot_name.clone(),
            user_name: config.user_name.clone(),
            server_url: config.base_url.clone(),
            status_message: String::new(),
            in_flight: 0,
        }
    }

    pub fn label_for(&self, sender: Sender) -> &str {
        match sender {
            Sender::User => &self.user_name,
            Sender::Bot => &self.bot_name,
        }
    }

    pub fn request_started(&mut self) {
        self.in_flight += 1;
        self.refresh_status();
    }

    pub fn request_finished(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.refresh_status();
    }

    fn refresh_status(&mut self) {
        self.status_message = match self.in_flight {
            0 => String::new(),
            1 => "Waiting for reply".to_string(),
            n => format!("Waiting for {n} replies"),
        };
    }
}
