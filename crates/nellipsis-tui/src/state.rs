//! Viewer state (Model in TEA pattern)

use std::path::PathBuf;

use nellipsis_core::prelude::*;
use nellipsis_engine::{Ellipsis, EllipsisEvent, TextBox, TruncationResult};
use tokio::sync::broadcast::{self, error::TryRecvError};

/// Everything the viewer renders and updates
pub struct ViewerState {
    pub ellipsis: Ellipsis<TextBox>,

    events: broadcast::Receiver<EllipsisEvent>,

    /// Most recent change event received from the controller
    pub last_event: Option<EllipsisEvent>,

    /// Last error, cleared by the next successful application
    pub error: Option<String>,

    /// File the content was loaded from; watched for changes
    pub content_path: Option<PathBuf>,

    pub show_status_bar: bool,

    /// Box size in cells
    columns: u16,
    rows: u16,

    /// Largest box that fits the terminal
    max_box: (u16, u16),

    pub should_quit: bool,
}

impl ViewerState {
    /// Create the state for a box of `columns` x `rows` cells
    pub fn new(ellipsis: Ellipsis<TextBox>, columns: u16, rows: u16) -> Self {
        let events = ellipsis.subscribe();
        let mut state = Self {
            ellipsis,
            events,
            last_event: None,
            error: None,
            content_path: None,
            show_status_bar: true,
            columns,
            rows,
            max_box: (u16::MAX, u16::MAX),
            should_quit: false,
        };
        state.set_box_size(columns, rows);
        state
    }

    pub fn with_content_path(mut self, path: PathBuf) -> Self {
        self.content_path = Some(path);
        self
    }

    pub fn with_status_bar(mut self, show: bool) -> Self {
        self.show_status_bar = show;
        self
    }

    /// Box size in cells
    pub fn box_size(&self) -> (u16, u16) {
        (self.columns, self.rows)
    }

    /// Resize the box, clamped to at least one cell and to the terminal
    pub fn set_box_size(&mut self, columns: u16, rows: u16) {
        self.columns = columns.clamp(1, self.max_box.0.max(1));
        self.rows = rows.clamp(1, self.max_box.1.max(1));

        let metrics = *self.ellipsis.surface().font_metrics();
        self.ellipsis.surface_mut().resize(
            f64::from(self.columns) * metrics.cell_width,
            f64::from(self.rows) * metrics.cell_height,
        );
    }

    /// Record the largest box the terminal can show and shrink to it
    pub fn set_max_box_size(&mut self, columns: u16, rows: u16) {
        self.max_box = (columns, rows);
        self.set_box_size(self.columns, self.rows);
    }

    /// First application
    pub fn start(&mut self) {
        let outcome = self.ellipsis.init();
        self.record(outcome);
    }

    /// Keep the outcome of an application for display
    pub fn record(&mut self, outcome: Result<Option<TruncationResult>>) {
        match outcome {
            Ok(Some(_)) => self.error = None,
            Ok(None) => {}
            Err(e) if e.is_recoverable() => {
                warn!("Truncation failed, keeping the previous render: {}", e);
                self.error = Some(e.to_string());
            }
            Err(e) => {
                error!("Truncation failed: {:?}", e);
                self.error = Some(e.to_string());
                self.should_quit = true;
            }
        }
        self.drain_events();
    }

    /// Receive pending change events
    pub fn drain_events(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(event) => self.last_event = Some(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    debug!("skipped {} change events", skipped);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }

    /// The result currently displayed
    pub fn result(&self) -> Option<&TruncationResult> {
        self.ellipsis.last_result()
    }

    /// Re-read and parse the content file
    pub fn reload_content(&mut self) -> Result<()> {
        let Some(path) = &self.content_path else {
            return Ok(());
        };

        let markup = std::fs::read_to_string(path)?;
        let content = nellipsis_core::parse(&markup)?;
        debug!("reloaded content from {:?}", path);
        self.ellipsis.set_content(Some(content));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{lorem_state, LOREM};

    #[test]
    fn test_box_size_sets_surface_pixels() {
        let state = lorem_state(12, 2);
        let size = state.ellipsis.surface().size();
        assert_eq!(size.width, 96.0);
        assert_eq!(size.height, 32.0);
    }

    #[test]
    fn test_box_size_is_clamped() {
        let mut state = lorem_state(12, 2);
        state.set_box_size(0, 0);
        assert_eq!(state.box_size(), (1, 1));

        state.set_max_box_size(10, 3);
        state.set_box_size(40, 40);
        assert_eq!(state.box_size(), (10, 3));
    }

    #[test]
    fn test_start_records_event() {
        let mut state = lorem_state(12, 2);
        state.start();
        assert_eq!(
            state.last_event,
            Some(EllipsisEvent::Change { offset: Some(21) })
        );
        assert_eq!(
            state.result().map(TruncationResult::markup).as_deref(),
            Some("Lorem ipsum dolor sit...")
        );
    }

    #[test]
    fn test_reload_content_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.html");
        std::fs::write(&path, "<b>Test</b>").unwrap();

        let mut state = lorem_state(12, 2).with_content_path(path);
        state.reload_content().unwrap();

        assert_eq!(
            nellipsis_core::serialize(state.ellipsis.content()),
            "<b>Test</b>"
        );
        assert_ne!(nellipsis_core::serialize(state.ellipsis.content()), LOREM);
    }

    #[test]
    fn test_reload_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = lorem_state(12, 2).with_content_path(dir.path().join("missing.html"));
        assert!(state.reload_content().is_err());
    }

    #[test]
    fn test_recoverable_error_keeps_viewer_running() {
        let mut state = lorem_state(12, 2);
        state.record(Err(Error::measure("layout failed")));
        assert_eq!(state.error.as_deref(), Some("Measurement failed: layout failed"));
        assert!(!state.should_quit);
    }

    #[test]
    fn test_unrecoverable_error_quits() {
        let mut state = lorem_state(12, 2);
        state.record(Err(Error::terminal("lost terminal")));
        assert!(state.error.is_some());
        assert!(state.should_quit);
    }
}
