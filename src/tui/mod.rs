//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! The loop owns `App` and `TuiState` on the main thread. Submissions go
//! through `core::action::update` against a [`ChatScreen`], and an
//! `Effect::Send` is run on a tokio task. The task reports back over a
//! `std::sync::mpsc` channel with `Action::ReplyReceived`, which the loop
//! drains between input polls.
//!
//! ## Redraw Strategy
//!
//! Frames are only drawn after an event or a reply. The poll timeout is
//! short while replies are outstanding so they appear promptly, and long
//! when idle.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::message::ChatMessage;
use crate::core::state::App;
use crate::core::view::ChatView;
use crate::core::widget::ChatWidget;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const IDLE_POLL: Duration = Duration::from_millis(500);
const WAITING_POLL: Duration = Duration::from_millis(50);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
        }
    }
}

/// The terminal screen as seen by the chat controller.
///
/// The transcript lives in `App`, the input field and scroll position in
/// `TuiState`; this borrows both for the duration of one `update` call.
pub struct ChatScreen<'a> {
    pub app: &'a mut App,
    pub tui: &'a mut TuiState,
}

impl ChatView for ChatScreen<'_> {
    fn input_value(&self) -> String {
        self.tui.input_box.value().to_string()
    }

    fn clear_input(&mut self) {
        self.tui.input_box.clear();
    }

    fn append_message(&mut self, message: ChatMessage) {
        self.app.session.push(message);
    }

    fn scroll_to_end(&mut self) {
        // The layout cache catches up on the next render; the pin keeps
        // the view at the end once it does.
        self.tui.message_list.scroll_to_end();
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: draw() resets the blink timer
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste, Hide);
    }
}

pub fn run(config: &ResolvedConfig, widget: ChatWidget) -> std::io::Result<()> {
    let mut app = App::from_config(config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new().inspect_err(|e| {
        warn!("Failed to enable terminal modes: {}", e);
    });

    // Channel for replies from background tasks
    let (tx, rx) = mpsc::channel();
    let mut needs_redraw = true;

    let result = loop {
        if needs_redraw {
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &app, &mut tui)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        let timeout = if app.in_flight > 0 {
            WAITING_POLL
        } else {
            IDLE_POLL
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                // Resize just needs a redraw (already flagged above)
                TuiEvent::Resize => {}
                TuiEvent::Quit | TuiEvent::Submit => {
                    let action = if event == TuiEvent::Quit {
                        Action::Quit
                    } else {
                        Action::Submit
                    };
                    let mut screen = ChatScreen {
                        app: &mut app,
                        tui: &mut tui,
                    };
                    match update(&widget, &mut screen, action) {
                        Effect::Send(text) => {
                            app.request_started();
                            spawn_send(&widget, text, tx.clone());
                        }
                        Effect::Quit => should_quit = true,
                        Effect::None => {}
                    }
                }
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown
                | TuiEvent::ScrollToBottom => {
                    tui.message_list.handle_event(&event);
                }
                _ => {
                    tui.input_box.handle_event(&event);
                }
            }
        }

        if should_quit {
            break Ok(());
        }

        // Replies from background requests
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            app.request_finished();
            let mut screen = ChatScreen {
                app: &mut app,
                tui: &mut tui,
            };
            update(&widget, &mut screen, action);
        }
    };

    if app.in_flight > 0 {
        info!("Exiting with {} request(s) still in flight", app.in_flight);
    }

    ratatui::restore();
    result
}

fn spawn_send(widget: &ChatWidget, text: String, tx: mpsc::Sender<Action>) {
    info!("Spawning chat request ({} bytes)", text.len());
    let widget = widget.clone();
    tokio::spawn(async move {
        let reply = widget.send_message(&text).await;
        if tx.send(Action::ReplyReceived(reply)).is_err() {
            warn!("Failed to deliver reply: receiver dropped");
        }
    });
}
