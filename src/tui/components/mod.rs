//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Built fresh every frame from borrowed data:
//! - `TitleBar`: bot name, server and request status
//! - `LandingPage`: greeting while the transcript is empty
//! - `Message`: one transcript entry
//! - `MessageList`: the transcript, wrapping `&mut MessageListState`
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `InputBox`: single-line text field
//! - `MessageListState`: scroll position and layout cache
//!
//! Each file holds its state types, event types, rendering, event handling
//! and tests.
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs     (Top status bar)
//! ├── landing.rs       (Empty-transcript greeting)
//! ├── message.rs       (Single message renderer)
//! ├── message_list.rs  (Scrollable message container)
//! └── input_box/       (Single-line text input)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod input_box;
pub mod landing;
pub mod message;
pub mod message_list;
pub use input_box::InputBox;
pub use landing::LandingPage;
pub use message_list::{MessageList, MessageListState};
