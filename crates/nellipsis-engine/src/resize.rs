//! Resize detection and the scoped resize listener
//!
//! The controller holds at most one [`ResizeListener`]. It is closed at the
//! start of every truncation attempt so that rendering candidates cannot
//! feed resize notifications back into the controller, and reopened once the
//! result is committed.

use std::fmt;

use nellipsis_core::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};

/// Which external signal triggers re-application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeDetection {
    /// Observe the element's own client size
    #[default]
    ResizeObserver,
    /// React to window (terminal) resizes
    Window,
    /// No automatic triggers; the collaborator applies explicitly
    Manual,
}

impl ResizeDetection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResizeDetection::ResizeObserver => "resize-observer",
            ResizeDetection::Window => "window",
            ResizeDetection::Manual => "manual",
        }
    }

    /// Parse a detection mode name.
    ///
    /// Unknown names fall back to [`ResizeDetection::ResizeObserver`] with a
    /// warning.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "resize-observer" | "resizeobserver" | "element" => ResizeDetection::ResizeObserver,
            "window" => ResizeDetection::Window,
            "manual" => ResizeDetection::Manual,
            other => {
                warn!(
                    "No such resize detection strategy: '{}'. Using '{}' instead.",
                    other,
                    ResizeDetection::ResizeObserver
                );
                ResizeDetection::ResizeObserver
            }
        }
    }
}

impl fmt::Display for ResizeDetection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ResizeDetection {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(ResizeDetection::parse(&value))
    }
}

/// Notification delivered to [`Ellipsis::handle_trigger`](crate::Ellipsis::handle_trigger).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The observed element may have changed size
    ElementResized,
    /// The window (terminal) was resized
    WindowResized,
    /// Content or indicator may have changed
    ContentChanged,
    /// Explicit request to re-apply
    Manual,
}

/// Open resize subscription.
///
/// Dropping the handle closes the subscription.
#[derive(Debug, PartialEq, Eq)]
pub struct ResizeListener {
    detection: ResizeDetection,
}

impl ResizeListener {
    /// Open a listener for `detection`; manual mode has none
    pub fn open(detection: ResizeDetection) -> Option<Self> {
        match detection {
            ResizeDetection::Manual => None,
            detection => {
                trace!("resize listener opened ({})", detection);
                Some(Self { detection })
            }
        }
    }

    pub fn detection(&self) -> ResizeDetection {
        self.detection
    }

    /// Whether this listener delivers `trigger`
    pub fn accepts(&self, trigger: Trigger) -> bool {
        matches!(
            (self.detection, trigger),
            (ResizeDetection::ResizeObserver, Trigger::ElementResized)
                | (ResizeDetection::Window, Trigger::WindowResized)
        )
    }
}

impl Drop for ResizeListener {
    fn drop(&mut self) {
        trace!("resize listener closed ({})", self.detection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Holder {
        mode: ResizeDetection,
    }

    #[test]
    fn test_parse_known_modes() {
        assert_eq!(ResizeDetection::parse("resize-observer"), ResizeDetection::ResizeObserver);
        assert_eq!(ResizeDetection::parse("window"), ResizeDetection::Window);
        assert_eq!(ResizeDetection::parse("Manual"), ResizeDetection::Manual);
    }

    #[test]
    fn test_unknown_mode_falls_back_to_observer() {
        assert_eq!(ResizeDetection::parse("polling"), ResizeDetection::ResizeObserver);
        assert_eq!(ResizeDetection::parse(""), ResizeDetection::ResizeObserver);
    }

    #[test]
    fn test_deserialize_never_fails_on_unknown_mode() {
        let holder: Holder = toml::from_str(r#"mode = "element-query""#).unwrap();
        assert_eq!(holder.mode, ResizeDetection::ResizeObserver);

        let holder: Holder = toml::from_str(r#"mode = "window""#).unwrap();
        assert_eq!(holder.mode, ResizeDetection::Window);
    }

    #[test]
    fn test_display_round_trips() {
        for mode in [
            ResizeDetection::ResizeObserver,
            ResizeDetection::Window,
            ResizeDetection::Manual,
        ] {
            assert_eq!(ResizeDetection::parse(&mode.to_string()), mode);
        }
    }

    #[test]
    fn test_manual_mode_has_no_listener() {
        assert!(ResizeListener::open(ResizeDetection::Manual).is_none());
    }

    #[test]
    fn test_listener_accepts_matching_trigger_only() {
        let element = ResizeListener::open(ResizeDetection::ResizeObserver).unwrap();
        assert!(element.accepts(Trigger::ElementResized));
        assert!(!element.accepts(Trigger::WindowResized));

        let window = ResizeListener::open(ResizeDetection::Window).unwrap();
        assert!(window.accepts(Trigger::WindowResized));
        assert!(!window.accepts(Trigger::ElementResized));
        assert_eq!(window.detection(), ResizeDetection::Window);
    }
}
