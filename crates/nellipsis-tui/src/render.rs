//! Main render/view function (View in TEA pattern)

use ratatui::Frame;

use crate::state::ViewerState;
use crate::{layout, widgets};

/// Render the complete UI
pub fn view(frame: &mut Frame, state: &ViewerState) {
    let areas = layout::create(frame.area(), state.show_status_bar);
    let (columns, rows) = state.box_size();

    frame.render_widget(
        widgets::EllipsisView::new(state.ellipsis.surface(), columns, rows),
        areas.viewport,
    );

    if let Some(status) = areas.status {
        frame.render_widget(widgets::StatusBar::new(state), status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{lorem_state, TestTerminal};

    #[test]
    fn test_full_view() {
        let mut state = lorem_state(20, 3);
        state.start();

        let mut term = TestTerminal::with_size(40, 8);
        term.draw_with(|frame| view(frame, &state));

        assert_eq!(term.line(1), "│Lorem ipsum dolor   │                  ");
        assert_eq!(term.line(2), "│sit amet, consetetur│                  ");
        assert_eq!(term.line(3), "│sadipscing elitr,...│                  ");
        assert!(term.line(7).contains("✂ 56/95"));
    }

    #[test]
    fn test_view_without_status_bar() {
        let mut state = lorem_state(20, 3).with_status_bar(false);
        state.start();

        let mut term = TestTerminal::with_size(40, 8);
        term.draw_with(|frame| view(frame, &state));

        assert!(!term.buffer_contains("resize-observer"));
    }
}
