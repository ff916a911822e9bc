//! Test utilities for viewer rendering verification
//!
//! Wraps ratatui's TestBackend so widgets and the full view can be rendered
//! and inspected without a real terminal.

use nellipsis_core::RenderNode;
use nellipsis_engine::{CellMetrics, Ellipsis, EllipsisOptions, TextBox};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::Frame;
use ratatui::Terminal;

use crate::state::ViewerState;

pub const LOREM: &str = "Lorem ipsum dolor sit amet, consetetur sadipscing elitr, sed diam nonumy eirmod tempor invidunt";

/// Standard test terminal size
pub const TEST_WIDTH: u16 = 80;
pub const TEST_HEIGHT: u16 = 24;

/// Viewer state for LOREM in a `columns` x `rows` box with default options
pub fn lorem_state(columns: u16, rows: u16) -> ViewerState {
    lorem_state_with(columns, rows, EllipsisOptions::default())
}

pub fn lorem_state_with(columns: u16, rows: u16, options: EllipsisOptions) -> ViewerState {
    let text_box = TextBox::new(CellMetrics::default(), 0.0, 0.0);
    let ellipsis =
        Ellipsis::new(text_box, options).with_content(Some(vec![RenderNode::text(LOREM)]));
    ViewerState::new(ellipsis, columns, rows)
}

/// Test utility wrapper around ratatui's TestBackend terminal.
pub struct TestTerminal {
    pub terminal: Terminal<TestBackend>,
}

impl TestTerminal {
    /// Create a new test terminal with standard dimensions (80x24)
    pub fn new() -> Self {
        Self::with_size(TEST_WIDTH, TEST_HEIGHT)
    }

    pub fn with_size(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("Failed to create test terminal");
        Self { terminal }
    }

    /// Get the full terminal area
    pub fn area(&self) -> Rect {
        let size = self.terminal.size().expect("Failed to get terminal size");
        Rect::new(0, 0, size.width, size.height)
    }

    /// Render a widget to the terminal
    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        self.terminal
            .draw(|frame| frame.render_widget(widget, area))
            .expect("Failed to render widget");
    }

    /// Draw a full frame with a custom rendering function
    pub fn draw_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f).expect("Failed to draw frame");
    }

    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    /// Check if the buffer contains a string anywhere
    pub fn buffer_contains(&self, text: &str) -> bool {
        self.content().contains(text)
    }

    /// Content of row `y`
    pub fn line(&self, y: u16) -> String {
        let buffer = self.buffer();
        let mut result = String::new();
        if y < buffer.area.height {
            for x in 0..buffer.area.width {
                result.push_str(buffer[(x, y)].symbol());
            }
        }
        result
    }

    /// All rows joined by newlines
    pub fn content(&self) -> String {
        (0..self.buffer().area.height)
            .map(|y| self.line(y))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for TestTerminal {
    fn default() -> Self {
        Self::new()
    }
}
