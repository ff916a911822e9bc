//! Update function (Update in TEA pattern)

use nellipsis_core::prelude::*;
use nellipsis_engine::Trigger;

use crate::layout;
use crate::message::{InputKey, Message};
use crate::state::ViewerState;

/// Apply one message to the state
pub fn update(state: &mut ViewerState, message: Message) {
    match message {
        Message::Key(key) => {
            if let Some(next) = handle_key(state, key) {
                update(state, next);
            }
        }
        Message::TerminalResized { width, height } => handle_terminal_resize(state, width, height),
        Message::ContentFileChanged => match state.reload_content() {
            Ok(()) => {
                let outcome = state.ellipsis.handle_trigger(Trigger::ContentChanged);
                state.record(outcome);
            }
            Err(e) => {
                warn!("Failed to reload content: {}", e);
                state.error = Some(e.to_string());
            }
        },
        Message::WatcherError { message } => {
            state.error = Some(message);
        }
        Message::Tick => state.drain_events(),
        Message::Quit => state.should_quit = true,
    }
}

/// Handle a key press; quit keys become a follow-up message
fn handle_key(state: &mut ViewerState, key: InputKey) -> Option<Message> {
    let (columns, rows) = state.box_size();
    match key {
        InputKey::Char('q') | InputKey::Esc | InputKey::CharCtrl('c') => {
            return Some(Message::Quit);
        }
        InputKey::Char('r') | InputKey::Enter => {
            let outcome = state.ellipsis.handle_trigger(Trigger::Manual);
            state.record(outcome);
        }
        InputKey::Left => resize_box(state, columns.saturating_sub(1), rows),
        InputKey::Right => resize_box(state, columns.saturating_add(1), rows),
        InputKey::Up => resize_box(state, columns, rows.saturating_sub(1)),
        InputKey::Down => resize_box(state, columns, rows.saturating_add(1)),
        _ => {}
    }
    None
}

fn resize_box(state: &mut ViewerState, columns: u16, rows: u16) {
    state.set_box_size(columns, rows);
    let outcome = state.ellipsis.handle_trigger(Trigger::ElementResized);
    state.record(outcome);
}

fn handle_terminal_resize(state: &mut ViewerState, width: u16, height: u16) {
    let areas = layout::create(
        ratatui::layout::Rect::new(0, 0, width, height),
        state.show_status_bar,
    );
    let (max_columns, max_rows) = layout::max_box_size(areas.viewport);
    state.set_max_box_size(max_columns, max_rows);

    let outcome = state.ellipsis.handle_trigger(Trigger::WindowResized);
    state.record(outcome);

    // a box shrunk to fit the terminal is also an element resize
    let outcome = state.ellipsis.handle_trigger(Trigger::ElementResized);
    state.record(outcome);
}
