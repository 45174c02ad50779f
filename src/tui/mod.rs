//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Thinking**: draws every ~80ms so the typing bubble can pulse.
//! - **Idle**: sleeps up to 250ms, only redraws on events or terminal resize.
//!
//! ## Reply Timer
//!
//! `Effect::ScheduleReply` spawns a one-shot tokio task that sleeps for the
//! configured delay and sends `Action::ReplyReady` back over an mpsc channel.
//! The loop drains that channel after handling terminal events.
//!
//! A `SteadyBlock` cursor style is used because ratatui's
//! `set_cursor_position` resets the terminal's blink timer on every `draw()`.

mod component;
mod components;
mod event;
mod ui;

use std::io::stdout;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use log::{debug, info, warn};
use ratatui::layout::Rect;

use crate::core::action::{Action, Effect, PendingReply, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{FollowUpBar, InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const THINKING_POLL: Duration = Duration::from_millis(80);
const IDLE_POLL: Duration = Duration::from_millis(250);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub message_list: MessageListState,
    pub input_box: InputBox,
    /// Follow-up currently highlighted by Tab/Shift+Tab or a click
    pub highlighted_suggestion: Option<usize>,
    /// Where the follow-up bar was drawn last frame, for click hit-testing
    pub follow_up_area: Rect,
    // Animation state
    pub pulse_value: f32,
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
            highlighted_suggestion: None,
            follow_up_area: Rect::default(),
            pulse_value: 0.0,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Runs `restore` when dropped, so every exit path (including `?`) leaves
/// the terminal usable.
struct RestoreGuard<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> RestoreGuard<F> {
    fn new(restore: F) -> Self {
        Self { restore }
    }
}

impl<F: FnMut()> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    // Declared before the mode guard so raw mode is left last
    let _restore_guard = RestoreGuard::new(ratatui::restore);
    let _terminal_mode_guard = match TerminalModeGuard::new() {
        Ok(guard) => Some(guard),
        Err(e) => {
            warn!("Could not enable mouse/paste modes, continuing without them: {}", e);
            None
        }
    };

    // Channel for actions from the reply timer
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        // Sync InputBox props with App state
        tui.input_box.disabled = app.is_thinking;

        if app.is_thinking {
            needs_redraw = true;
        }

        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            tui.pulse_value = (elapsed * 5.0).sin() * 0.5 + 0.5;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if app.is_thinking {
            THINKING_POLL
        } else {
            IDLE_POLL
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let effect = handle_event(&mut app, &mut tui, event);
            if perform_effect(effect, &mut tui, &tx) {
                break 'main;
            }
        }

        // Handle actions from background tasks (the reply timer)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if matches!(action, Action::ReplyReady(_)) {
                // The follow-up list is about to be replaced
                tui.highlighted_suggestion = None;
            }
            let effect = update(&mut app, action);
            if perform_effect(effect, &mut tui, &tx) {
                break 'main;
            }
        }
    }

    info!(
        "Atlas shutting down after {} messages",
        app.messages.len()
    );
    Ok(())
}

/// Route one terminal event to the right component and turn the result
/// into a core action. Returns the effect the loop must perform.
pub fn handle_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    tui.input_box.disabled = app.is_thinking;

    match event {
        TuiEvent::Resize => Effect::None,
        TuiEvent::Quit => update(app, Action::Quit),
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(&event);
            Effect::None
        }
        TuiEvent::NextSuggestion | TuiEvent::PrevSuggestion => {
            let count = app.follow_ups.len();
            if count == 0 {
                return Effect::None;
            }
            let step: isize = if matches!(event, TuiEvent::NextSuggestion) {
                1
            } else {
                -1
            };
            let index = match tui.highlighted_suggestion {
                Some(current) => (current as isize + step).rem_euclid(count as isize) as usize,
                None if step > 0 => 0,
                None => count - 1,
            };
            choose_suggestion(app, tui, index)
        }
        TuiEvent::MouseClick(col, row) => {
            match FollowUpBar::hit_test(tui.follow_up_area, app.follow_ups.len(), col, row) {
                Some(index) => choose_suggestion(app, tui, index),
                None => Effect::None,
            }
        }
        // Up/Down move within a multi-line input first, then scroll the list
        TuiEvent::CursorUp | TuiEvent::CursorDown => {
            if let Some(input_event) = tui.input_box.handle_event(&event) {
                return apply_input_event(app, tui, input_event);
            }
            let scroll = if matches!(event, TuiEvent::CursorUp) {
                TuiEvent::ScrollUp
            } else {
                TuiEvent::ScrollDown
            };
            tui.message_list.handle_event(&scroll);
            Effect::None
        }
        _ => match tui.input_box.handle_event(&event) {
            Some(input_event) => apply_input_event(app, tui, input_event),
            None => Effect::None,
        },
    }
}

fn apply_input_event(app: &mut App, tui: &mut TuiState, input_event: InputEvent) -> Effect {
    tui.highlighted_suggestion = None;
    match input_event {
        InputEvent::Submit(text) => update(app, Action::Submit(text)),
        InputEvent::ContentChanged => {
            update(app, Action::InputChanged(tui.input_box.buffer.clone()))
        }
    }
}

fn choose_suggestion(app: &mut App, tui: &mut TuiState, index: usize) -> Effect {
    let Some(text) = app.follow_ups.get(index).cloned() else {
        return Effect::None;
    };
    debug!("Follow-up {} selected", index);
    tui.highlighted_suggestion = Some(index);
    tui.input_box.set_text(&text);
    update(app, Action::SelectSuggestion(text))
}

/// Carry out an effect. Returns true when the app should exit.
fn perform_effect(effect: Effect, tui: &mut TuiState, tx: &mpsc::Sender<Action>) -> bool {
    match effect {
        Effect::None => false,
        Effect::ScheduleReply(pending) => {
            tui.message_list.scroll_to_latest();
            spawn_reply(pending, tx.clone());
            false
        }
        Effect::ScrollToLatest => {
            tui.message_list.scroll_to_latest();
            false
        }
        Effect::Quit => true,
    }
}

/// Deliver `Action::ReplyReady` once `pending.delay` has elapsed.
pub fn spawn_reply(
    pending: PendingReply,
    tx: mpsc::Sender<Action>,
) -> tokio::task::JoinHandle<()> {
    info!("Scheduling reply in {:?}", pending.delay);
    tokio::spawn(async move {
        tokio::time::sleep(pending.delay).await;
        if tx.send(Action::ReplyReady(pending.text)).is_err() {
            warn!("Failed to deliver ReplyReady: receiver dropped");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    fn type_text(app: &mut App, tui: &mut TuiState, text: &str) {
        for c in text.chars() {
            handle_event(app, tui, TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_tab_cycles_and_copies_suggestion() {
        let mut app = test_app();
        let mut tui = TuiState::new();

        handle_event(&mut app, &mut tui, TuiEvent::NextSuggestion);
        assert_eq!(tui.highlighted_suggestion, Some(0));
        assert_eq!(tui.input_box.buffer, app.follow_ups[0]);
        assert_eq!(app.input, app.follow_ups[0]);

        handle_event(&mut app, &mut tui, TuiEvent::NextSuggestion);
        assert_eq!(tui.highlighted_suggestion, Some(1));

        handle_event(&mut app, &mut tui, TuiEvent::PrevSuggestion);
        handle_event(&mut app, &mut tui, TuiEvent::PrevSuggestion);
        assert_eq!(tui.highlighted_suggestion, Some(2), "wraps backwards");
        assert_eq!(app.input, app.follow_ups[2]);
        assert_eq!(app.messages.len(), 1, "selecting never submits");
    }

    #[test]
    fn test_shift_tab_from_nothing_picks_last() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        handle_event(&mut app, &mut tui, TuiEvent::PrevSuggestion);
        assert_eq!(tui.highlighted_suggestion, Some(2));
    }

    #[test]
    fn test_tab_without_suggestions_is_noop() {
        let mut app = test_app();
        app.follow_ups.clear();
        let mut tui = TuiState::new();
        let effect = handle_event(&mut app, &mut tui, TuiEvent::NextSuggestion);
        assert_eq!(effect, Effect::None);
        assert_eq!(tui.highlighted_suggestion, None);
    }

    #[test]
    fn test_click_on_follow_up_selects_it() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        tui.follow_up_area = Rect::new(0, 20, 80, 5);

        handle_event(&mut app, &mut tui, TuiEvent::MouseClick(5, 22));
        assert_eq!(tui.highlighted_suggestion, Some(1));
        assert_eq!(app.input, app.follow_ups[1]);

        // Clicking the border does nothing
        handle_event(&mut app, &mut tui, TuiEvent::MouseClick(5, 20));
        assert_eq!(tui.highlighted_suggestion, Some(1));
    }

    #[test]
    fn test_typing_syncs_input_and_clears_highlight() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        handle_event(&mut app, &mut tui, TuiEvent::NextSuggestion);

        type_text(&mut app, &mut tui, "!");
        assert_eq!(tui.highlighted_suggestion, None);
        assert!(app.input.ends_with('!'));
        assert_eq!(app.input, tui.input_box.buffer);
    }

    #[test]
    fn test_enter_submits_and_schedules_reply() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        type_text(&mut app, &mut tui, "How's the team looking?");

        let effect = handle_event(&mut app, &mut tui, TuiEvent::Submit);
        match effect {
            Effect::ScheduleReply(pending) => {
                assert_eq!(pending.text, "How's the team looking?");
                assert_eq!(pending.delay, Duration::ZERO);
            }
            other => panic!("Expected ScheduleReply, got {other:?}"),
        }
        assert!(app.is_thinking);
        assert!(app.input.is_empty());
        assert!(tui.input_box.buffer.is_empty());
    }

    #[test]
    fn test_enter_while_thinking_keeps_draft() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        type_text(&mut app, &mut tui, "first");
        handle_event(&mut app, &mut tui, TuiEvent::Submit);

        type_text(&mut app, &mut tui, "second");
        let effect = handle_event(&mut app, &mut tui, TuiEvent::Submit);
        assert_eq!(effect, Effect::None);
        assert_eq!(tui.input_box.buffer, "second");
        assert_eq!(app.messages.len(), 2);
    }

    #[test]
    fn test_up_on_single_line_input_scrolls_list() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        assert!(tui.message_list.stick_to_bottom);

        handle_event(&mut app, &mut tui, TuiEvent::CursorUp);
        assert!(!tui.message_list.stick_to_bottom);
    }

    #[test]
    fn test_quit_and_effects() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        let (tx, _rx) = mpsc::channel();

        let effect = handle_event(&mut app, &mut tui, TuiEvent::Quit);
        assert_eq!(effect, Effect::Quit);
        assert!(perform_effect(effect, &mut tui, &tx));

        tui.message_list.stick_to_bottom = false;
        assert!(!perform_effect(Effect::ScrollToLatest, &mut tui, &tx));
        assert!(tui.message_list.stick_to_bottom);
        assert!(!perform_effect(Effect::None, &mut tui, &tx));
    }

    #[test]
    fn test_restore_runs_on_early_error_return() {
        use std::cell::Cell;

        fn draw_fails(restored: &Cell<u32>) -> std::io::Result<()> {
            let _guard = RestoreGuard::new(|| restored.set(restored.get() + 1));
            Err::<(), _>(std::io::Error::other("draw failed"))?;
            Ok(())
        }

        let restored = Cell::new(0);
        assert!(draw_fails(&restored).is_err());
        assert_eq!(restored.get(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_fires_once_after_delay() {
        let (tx, rx) = mpsc::channel();
        let handle = spawn_reply(
            PendingReply {
                text: "hi".to_string(),
                delay: Duration::from_millis(350),
            },
            tx,
        );

        tokio::time::sleep(Duration::from_millis(349)).await;
        assert!(rx.try_recv().is_err(), "fired early");

        handle.await.unwrap();
        assert_eq!(rx.try_recv(), Ok(Action::ReplyReady("hi".to_string())));
        assert!(rx.try_recv().is_err(), "fired twice");
    }
}
