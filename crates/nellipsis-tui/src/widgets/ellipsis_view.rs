//! Bordered box showing the laid-out lines of a [`TextBox`]

use nellipsis_engine::layout::{InlineStyle, Line as LayoutLine};
use nellipsis_engine::TextBox;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::theme;

/// The truncated content inside a border sized to the box
pub struct EllipsisView<'a> {
    text_box: &'a TextBox,
    columns: u16,
    rows: u16,
}

impl<'a> EllipsisView<'a> {
    pub fn new(text_box: &'a TextBox, columns: u16, rows: u16) -> Self {
        Self {
            text_box,
            columns,
            rows,
        }
    }
}

impl Widget for EllipsisView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let outer = Rect::new(
            area.x,
            area.y,
            self.columns.saturating_add(2).min(area.width),
            self.rows.saturating_add(2).min(area.height),
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER_ACTIVE))
            .title(format!(" {}x{} ", self.columns, self.rows));
        let inner = block.inner(outer);
        block.render(outer, buf);

        let lines: Vec<Line<'static>> = self.text_box.lines().iter().map(to_line).collect();
        Paragraph::new(lines)
            .style(Style::default().fg(theme::TEXT_PRIMARY))
            .render(inner, buf);
    }
}

fn to_line(line: &LayoutLine) -> Line<'static> {
    Line::from(
        line.fragments
            .iter()
            .map(|fragment| Span::styled(fragment.text.clone(), fragment_style(fragment.style)))
            .collect::<Vec<_>>(),
    )
}

fn fragment_style(style: InlineStyle) -> Style {
    let mut modifiers = Modifier::empty();
    if style.bold {
        modifiers |= Modifier::BOLD;
    }
    if style.italic {
        modifiers |= Modifier::ITALIC;
    }
    if style.underline {
        modifiers |= Modifier::UNDERLINED;
    }
    Style::default().add_modifier(modifiers)
}
