//! # Actions
//!
//! Everything that can happen in Atlas becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! The thinking delay elapsed? That's `Action::ReplyReady(text)`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state, and returns the `Effect` the adapter must perform.
//! No I/O happens here; timers and redraws live in the adapter.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: feed actions, assert on `App` and the effect.

use std::time::Duration;

use log::{debug, info, warn};

use crate::core::reply::generate_agent_reply;
use crate::core::state::{App, Role};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// User submitted the input buffer.
    Submit(String),
    /// The thinking delay for `text` elapsed.
    ReplyReady(String),
    /// User picked a follow-up suggestion. Fills the input, never submits.
    SelectSuggestion(String),
    /// The editor buffer changed.
    InputChanged(String),
    Quit,
}

/// A reply waiting for its thinking delay.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingReply {
    pub text: String,
    pub delay: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Start the one-shot delay; deliver `Action::ReplyReady` when it fires.
    /// The message list changed, so the view also scrolls to the latest message.
    ScheduleReply(PendingReply),
    /// The message list or thinking flag changed.
    ScrollToLatest,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                debug!("Ignoring blank submission");
                return Effect::None;
            }
            if app.is_thinking {
                debug!("Ignoring submission while a reply is pending");
                return Effect::None;
            }

            let trimmed = trimmed.to_string();
            app.push_message(Role::User, trimmed.clone());
            app.input.clear();
            app.is_thinking = true;
            info!(
                "Accepted user message ({} chars), reply in {:?}",
                trimmed.len(),
                app.reply_delay
            );

            Effect::ScheduleReply(PendingReply {
                text: trimmed,
                delay: app.reply_delay,
            })
        }
        Action::ReplyReady(text) => {
            if !app.is_thinking {
                warn!("ReplyReady arrived with no reply pending, dropping it");
                return Effect::None;
            }

            let out = generate_agent_reply(&app.history(), &text);
            debug!(
                "Generated reply: topics={:?}, {} follow-ups",
                out.detected_topics,
                out.follow_ups.len()
            );

            app.push_message(Role::Assistant, out.reply);
            app.follow_ups = out.follow_ups;
            app.active_topics = out.detected_topics;
            app.is_thinking = false;

            Effect::ScrollToLatest
        }
        Action::SelectSuggestion(text) => {
            app.input = text;
            Effect::None
        }
        Action::InputChanged(text) => {
            app.input = text;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::topic::TopicId;
    use crate::test_support::test_app;

    fn submit_and_resolve(app: &mut App, text: &str) -> Effect {
        match update(app, Action::Submit(text.to_string())) {
            Effect::ScheduleReply(pending) => update(app, Action::ReplyReady(pending.text)),
            other => other,
        }
    }

    #[test]
    fn test_submit_appends_trimmed_user_message() {
        let mut app = test_app();
        app.input = "  hello there  ".to_string();

        let effect = update(&mut app, Action::Submit("  hello there  ".to_string()));

        assert_eq!(
            effect,
            Effect::ScheduleReply(PendingReply {
                text: "hello there".to_string(),
                delay: app.reply_delay,
            })
        );
        assert_eq!(app.messages.len(), 2);
        assert_eq!(app.messages[1].role, Role::User);
        assert_eq!(app.messages[1].content, "hello there");
        assert!(app.input.is_empty());
        assert!(app.is_thinking);
    }

    #[test]
    fn test_blank_submit_is_noop() {
        for blank in ["", "   ", "\n\t  \n"] {
            let mut app = test_app();
            let effect = update(&mut app, Action::Submit(blank.to_string()));
            assert_eq!(effect, Effect::None);
            assert_eq!(app.messages.len(), 1);
            assert!(!app.is_thinking);
        }
    }

    #[test]
    fn test_submit_while_thinking_is_noop() {
        let mut app = test_app();
        update(&mut app, Action::Submit("first".to_string()));
        let effect = update(&mut app, Action::Submit("second".to_string()));

        assert_eq!(effect, Effect::None);
        assert_eq!(app.messages.len(), 2);
        assert!(app.is_thinking);
    }

    #[test]
    fn test_reply_ready_appends_one_assistant_message() {
        let mut app = test_app();
        let effect = submit_and_resolve(&mut app, "Who do you like in the game tonight?");

        assert_eq!(effect, Effect::ScrollToLatest);
        assert_eq!(app.messages.len(), 3);
        assert_eq!(app.messages[2].role, Role::Assistant);
        assert!(!app.is_thinking);
        assert!(app.active_topics.contains(&TopicId::Sports));
    }

    #[test]
    fn test_reply_ready_without_pending_is_ignored() {
        let mut app = test_app();
        let effect = update(&mut app, Action::ReplyReady("stray".to_string()));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.messages.len(), 1);
        assert_eq!(app.active_topics, TopicId::ALL.to_vec());
    }

    #[test]
    fn test_topics_stick_across_turns() {
        let mut app = test_app();
        submit_and_resolve(&mut app, "Big game tonight");
        assert_eq!(app.active_topics, vec![TopicId::Sports]);

        submit_and_resolve(&mut app, "what do you think?");
        assert_eq!(app.active_topics, vec![TopicId::Sports]);
        assert_eq!(app.messages.len(), 5);
    }

    #[test]
    fn test_selected_suggestion_not_offered_again() {
        let mut app = test_app();
        let suggestion = app.follow_ups[1].clone();

        update(&mut app, Action::SelectSuggestion(suggestion.clone()));
        assert_eq!(app.input, suggestion);
        assert_eq!(app.messages.len(), 1, "selecting must not submit");
        assert!(!app.is_thinking);

        let input = app.input.clone();
        submit_and_resolve(&mut app, &input);
        assert!(!app.follow_ups.contains(&suggestion));
        assert!(!app.follow_ups.is_empty());
    }

    #[test]
    fn test_input_changed_mirrors_buffer() {
        let mut app = test_app();
        let effect = update(&mut app, Action::InputChanged("typing".to_string()));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.input, "typing");
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
