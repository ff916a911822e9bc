//! Screen layout definitions for the viewer

use ratatui::layout::{Constraint, Layout, Rect};

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Area the bordered box is drawn into
    pub viewport: Rect,

    /// Bottom status line, if shown
    pub status: Option<Rect>,
}

/// Create the main screen layout
pub fn create(area: Rect, show_status_bar: bool) -> ScreenAreas {
    if !show_status_bar {
        return ScreenAreas {
            viewport: area,
            status: None,
        };
    }

    let chunks = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(area);

    ScreenAreas {
        viewport: chunks[0],
        status: Some(chunks[1]),
    }
}

/// Largest box, in cells, that fits `viewport` together with its border
pub fn max_box_size(viewport: Rect) -> (u16, u16) {
    (
        viewport.width.saturating_sub(2).max(1),
        viewport.height.saturating_sub(2).max(1),
    )
}
