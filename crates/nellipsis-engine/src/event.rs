//! Events emitted by the [`Ellipsis`](crate::Ellipsis) controller
//!
//! Events are broadcast after each completed application via
//! `Ellipsis::subscribe()`, and only while at least one subscriber exists.

use serde::Serialize;

/// Domain events emitted by the controller for external consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EllipsisEvent {
    /// Truncation was applied.
    ///
    /// `offset` is the kept content length, or `None` when the content was
    /// rendered untruncated.
    Change { offset: Option<usize> },
}

impl EllipsisEvent {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            EllipsisEvent::Change { .. } => "change",
        }
    }
}
