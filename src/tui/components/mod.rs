//! # TUI Components
//!
//! Every piece of the Atlas screen.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: app name, status line, topic chips, unseen-content marker
//! - `Message`: a single chat bubble (or the typing placeholder)
//! - `FollowUpBar`: suggested follow-up questions
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `InputBox`: text input, disabled while a reply is pending
//! - `MessageList`: scrollable transcript with layout caching
//!
//! Each file holds the component's state types, event types, rendering,
//! event handling, and tests.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── message.rs       (Single message renderer)
//! ├── message_list.rs  (Scrollable message container)
//! ├── follow_ups.rs    (Suggestion rows)
//! └── input_box/       (Text input + wrapping helpers)
//! ```

mod follow_ups;
mod title_bar;
pub use follow_ups::FollowUpBar;
pub use title_bar::TitleBar;

pub mod input_box;
pub mod message;
pub use input_box::{InputBox, InputEvent};
pub mod message_list;
pub use message_list::{MessageList, MessageListState};
