//! # Core Application Logic
//!
//! The chat controller and everything it needs. It knows nothing about any
//! specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • ChatWidget           │
//!                    │  • ChatView (seam)      │
//!                    │  • Action / update()    │
//!                    └───────────┬─────────────┘
//!                                │
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!           ┌────────────┐              ┌────────────┐
//!           │    TUI     │              │  Headless  │
//!           │ (ratatui)  │              │  LineView  │
//!           └────────────┘              └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`message`]: `ChatMessage`, `Sender`, fallback texts
//! - [`session`]: the in-memory transcript
//! - [`view`]: the `ChatView` trait front-ends implement
//! - [`widget`]: `ChatWidget`, the submit handler
//! - [`action`]: `Action` / `Effect` reducer used by the event loop
//! - [`state`]: `App`, core state for the TUI
//! - [`config`]: layered configuration

pub mod action;
pub mod config;
pub mod message;
pub mod session;
pub mod state;
pub mod view;
pub mod widget;
