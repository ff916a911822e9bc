//! nellipsis-tui - Terminal viewer for Nested Ellipsis
//!
//! Shows a resizable box whose content is kept truncated by an
//! [`Ellipsis`](nellipsis_engine::Ellipsis) controller. Arrow keys resize the
//! box (element resizes), terminal resizes are window resizes, `r` requests
//! a manual re-application and an optional content file is watched for
//! changes.

pub mod event;
pub mod handler;
pub mod layout;
pub mod message;
pub mod render;
pub mod runner;
pub mod state;
pub mod terminal;
pub mod theme;
pub mod watcher;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

// Re-export main entry points
pub use message::{InputKey, Message};
pub use runner::run;
pub use state::ViewerState;
