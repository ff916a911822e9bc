//! Status bar widget
//!
//! Displays the truncation outcome, the resize detection mode, the box size
//! and the last error.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::state::ViewerState;
use crate::theme;

/// Single-line status bar
pub struct StatusBar<'a> {
    state: &'a ViewerState,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a ViewerState) -> Self {
        Self { state }
    }

    /// Truncation outcome with appropriate styling
    fn outcome(&self) -> Span<'static> {
        if !self.state.ellipsis.options().active {
            return Span::styled("○ inactive", Style::default().fg(theme::TEXT_MUTED));
        }

        match self.state.result() {
            None => Span::styled("… pending", Style::default().fg(theme::STATUS_YELLOW)),
            Some(result) => match result.offset {
                Some(offset) if result.truncated => Span::styled(
                    format!("✂ {}/{}", offset, result.initial_length),
                    Style::default().fg(theme::STATUS_YELLOW),
                ),
                _ => Span::styled("✓ fits", Style::default().fg(theme::STATUS_GREEN)),
            },
        }
    }

    fn error(&self) -> Option<Span<'static>> {
        self.state.error.as_ref().map(|message| {
            Span::styled(
                format!("✗ {}", message),
                Style::default()
                    .fg(theme::STATUS_RED)
                    .add_modifier(Modifier::BOLD),
            )
        })
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (columns, rows) = self.state.box_size();
        let separator = Span::styled(" │ ", Style::default().fg(theme::BORDER_DIM));
        let muted = Style::default().fg(theme::TEXT_MUTED);

        let mut spans = vec![
            Span::raw(" "),
            self.outcome(),
            separator.clone(),
            Span::styled(
                self.state.ellipsis.options().resize_detection.to_string(),
                muted,
            ),
            separator.clone(),
            Span::styled(format!("{}x{}", columns, rows), muted),
        ];

        match self.error() {
            Some(error) => {
                spans.push(separator);
                spans.push(error);
            }
            None => {
                spans.push(separator);
                spans.push(Span::styled("q quit  ←→↑↓ resize  r apply", muted));
            }
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
