//! End-to-end conversation flow: submit → reply timer → ReplyReady → update.
//!
//! Runs on a paused tokio clock so the thinking delay elapses instantly.

use std::sync::mpsc;
use std::time::Duration;

use atlas::core::action::{Action, Effect, update};
use atlas::core::state::{App, Role};
use atlas::core::topic::TopicId;
use atlas::tui::spawn_reply;

const DELAY: Duration = Duration::from_millis(350);

/// Submit `text`, wait out the timer, and feed the delivered action back in.
async fn exchange(app: &mut App, text: &str) -> Effect {
    let pending = match update(app, Action::Submit(text.to_string())) {
        Effect::ScheduleReply(pending) => pending,
        other => panic!("Expected ScheduleReply for {text:?}, got {other:?}"),
    };
    assert!(app.is_thinking);
    assert_eq!(pending.delay, DELAY);

    let (tx, rx) = mpsc::channel();
    spawn_reply(pending, tx).await.unwrap();
    let action = rx.try_recv().expect("reply delivered");
    update(app, action)
}

#[tokio::test(start_paused = true)]
async fn test_sports_question_gets_sports_reply() {
    let mut app = App::new(DELAY);
    assert_eq!(app.messages.len(), 1);

    let effect = exchange(&mut app, "Who do you like in the game tonight?").await;

    assert_eq!(effect, Effect::ScrollToLatest);
    assert_eq!(app.messages.len(), 3);
    assert_eq!(app.messages[1].role, Role::User);
    assert_eq!(app.messages[1].content, "Who do you like in the game tonight?");
    assert_eq!(app.messages[2].role, Role::Assistant);
    assert_eq!(app.active_topics, vec![TopicId::Sports]);
    assert!(!app.is_thinking);
    assert!(!app.follow_ups.is_empty());
    assert!(app.follow_ups.len() <= 3);
}

#[tokio::test(start_paused = true)]
async fn test_unmatched_message_keeps_previous_topic() {
    let mut app = App::new(DELAY);
    exchange(&mut app, "What's the new policy on the election?").await;
    assert_eq!(app.active_topics, vec![TopicId::Politics]);

    exchange(&mut app, "Okay, tell me more").await;
    assert_eq!(app.active_topics, vec![TopicId::Politics]);
    assert_eq!(app.messages.len(), 5);
}

#[tokio::test(start_paused = true)]
async fn test_picked_follow_up_is_not_suggested_again() {
    let mut app = App::new(DELAY);

    for _ in 0..4 {
        let pick = app.follow_ups[0].clone();
        update(&mut app, Action::SelectSuggestion(pick.clone()));
        assert_eq!(app.input, pick);

        exchange(&mut app, &pick).await;
        assert!(
            !app.follow_ups.contains(&pick),
            "{pick:?} offered again: {:?}",
            app.follow_ups
        );
    }
}

#[test]
fn test_blank_submit_changes_nothing() {
    let mut app = App::new(DELAY);
    let effect = update(&mut app, Action::Submit("   \n\t".to_string()));

    assert_eq!(effect, Effect::None);
    assert_eq!(app.messages.len(), 1);
    assert!(!app.is_thinking);
}

#[test]
fn test_second_submit_while_thinking_is_ignored() {
    let mut app = App::new(DELAY);
    update(&mut app, Action::Submit("How should I train for a 5k?".to_string()));
    let effect = update(&mut app, Action::Submit("Also, big game?".to_string()));

    assert_eq!(effect, Effect::None);
    assert_eq!(app.messages.len(), 2);
}
