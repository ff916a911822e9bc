//! Colors used by the viewer

use ratatui::style::Color;

pub const BORDER_ACTIVE: Color = Color::Cyan;
pub const BORDER_DIM: Color = Color::DarkGray;

pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_MUTED: Color = Color::DarkGray;

pub const STATUS_GREEN: Color = Color::Green;
pub const STATUS_RED: Color = Color::Red;
pub const STATUS_YELLOW: Color = Color::Yellow;
