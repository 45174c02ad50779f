//! # Application State
//!
//! Core conversation state for Atlas. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── messages: Vec<Message>         // append-only transcript
//! ├── input: String                  // current input buffer
//! ├── is_thinking: bool              // a reply is scheduled
//! ├── active_topics: Vec<TopicId>    // chips shown in the title bar
//! ├── follow_ups: Vec<String>        // suggestion row
//! ├── reply_delay: Duration          // artificial "thinking" time
//! └── next_seq: u64                  // message id sequence
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::config::ResolvedConfig;
use crate::core::topic::TopicId;

pub const ASSISTANT_NAME: &str = "Atlas";

/// Default artificial delay before a reply lands.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(350);

const SEED_GREETING: &str = "Hey bestie! I'm Atlas, your go-to brain who nerds out on sports, politics, and health. \
    Tell me what's on your mind and I'll give you the breakdown, the context, and a plan we can actually run with.";

const SEED_FOLLOW_UPS: [&str; 3] = [
    "Catch me up on the latest game or matchup you're hyped about.",
    "Need a sanity check on a headline or policy move?",
    "Want help tuning your routine so you feel better this week?",
];

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry of the transcript. Never mutated after it is pushed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
}

/// The role + content view of a message handed to the reply generator.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

pub struct App {
    pub messages: Vec<Message>,
    pub input: String,
    pub is_thinking: bool,
    pub active_topics: Vec<TopicId>,
    pub follow_ups: Vec<String>,
    pub reply_delay: Duration,
    next_seq: u64,
}

impl App {
    pub fn new(reply_delay: Duration) -> Self {
        let mut app = Self {
            messages: Vec::new(),
            input: String::new(),
            is_thinking: false,
            active_topics: TopicId::ALL.to_vec(),
            follow_ups: SEED_FOLLOW_UPS.iter().map(|s| s.to_string()).collect(),
            reply_delay,
            next_seq: 0,
        };
        // The seed greeting keeps a fixed id so it is recognizable in logs.
        app.messages.push(Message {
            id: "init-agent".to_string(),
            role: Role::Assistant,
            content: SEED_GREETING.to_string(),
        });
        app
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.reply_delay)
    }

    /// Appends a message and returns a reference to it.
    pub fn push_message(&mut self, role: Role, content: String) -> &Message {
        let id = self.next_message_id(role);
        let index = self.messages.len();
        self.messages.push(Message { id, role, content });
        &self.messages[index]
    }

    /// `<unix-millis>-<seq>-<role>`; the sequence keeps ids unique within
    /// a millisecond.
    fn next_message_id(&mut self, role: Role) -> String {
        self.next_seq += 1;
        let suffix = match role {
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        format!(
            "{}-{}-{}",
            chrono::Utc::now().timestamp_millis(),
            self.next_seq,
            suffix
        )
    }

    /// Role + content of every message, in order.
    pub fn history(&self) -> Vec<ChatTurn> {
        self.messages
            .iter()
            .map(|m| ChatTurn {
                role: m.role,
                content: m.content.clone(),
            })
            .collect()
    }

    /// Status line shown next to the title.
    pub fn status_line(&self) -> String {
        if self.is_thinking {
            format!("{ASSISTANT_NAME} is thinking...")
        } else if self.messages.len() > 1 {
            format!("{ASSISTANT_NAME} is ready when you are.")
        } else {
            format!("{ASSISTANT_NAME} is online and tuned in.")
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.messages.len(), 1);
        assert_eq!(app.messages[0].role, Role::Assistant);
        assert!(app.messages[0].content.starts_with("Hey bestie!"));
        assert!(!app.is_thinking);
        assert!(app.input.is_empty());
        assert_eq!(app.active_topics, TopicId::ALL.to_vec());
        assert_eq!(app.follow_ups.len(), 3);
    }

    #[test]
    fn test_message_ids_are_unique() {
        let mut app = test_app();
        for i in 0..50 {
            app.push_message(Role::User, format!("msg {i}"));
        }
        let mut ids: Vec<&str> = app.messages.iter().map(|m| m.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), app.messages.len());
    }

    #[test]
    fn test_message_id_carries_role() {
        let mut app = test_app();
        let id = app.push_message(Role::User, "hi".into()).id.clone();
        assert!(id.ends_with("-user"));
        let id = app.push_message(Role::Assistant, "hey".into()).id.clone();
        assert!(id.ends_with("-assistant"));
    }

    #[test]
    fn test_history_strips_ids() {
        let mut app = test_app();
        app.push_message(Role::User, "hello".into());
        let history = app.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1], ChatTurn::user("hello"));
    }

    #[test]
    fn test_status_line_progression() {
        let mut app = test_app();
        assert_eq!(app.status_line(), "Atlas is online and tuned in.");

        app.push_message(Role::User, "hello".into());
        app.is_thinking = true;
        assert_eq!(app.status_line(), "Atlas is thinking...");

        app.is_thinking = false;
        assert_eq!(app.status_line(), "Atlas is ready when you are.");
    }

    #[test]
    fn test_chat_turn_wire_format() {
        let json = serde_json::to_string(&ChatTurn::assistant("hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }
}
