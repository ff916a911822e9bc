//! The `Ellipsis` controller
//!
//! Owns a measurement surface, the source content and the options, and
//! decides when truncation has to be re-applied: on explicit request, when
//! the content signature changes, or when the installed resize listener
//! reports a relevant resize.

use nellipsis_core::prelude::*;
use nellipsis_core::{signature, RenderNode};
use tokio::sync::broadcast;

use crate::engine::{self, TruncationResult};
use crate::event::EllipsisEvent;
use crate::measure::{Dimensions, MeasureSurface};
use crate::options::EllipsisOptions;
use crate::resize::{ResizeDetection, ResizeListener, Trigger};

/// Capacity of the event broadcast channel
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Truncation controller for one surface.
pub struct Ellipsis<S: MeasureSurface> {
    surface: S,
    content: Vec<RenderNode>,
    options: EllipsisOptions,

    /// Open resize subscription; `None` during an attempt, in manual mode,
    /// while inactive and after `destroy`
    listener: Option<ResizeListener>,

    /// Content + indicator signature at the last application
    previous_signature: Option<String>,

    /// Client size last acted upon by an element resize
    previous_dimensions: Dimensions,

    /// Last successfully committed result
    committed: Option<TruncationResult>,

    /// Application requested while the surface was detached
    pending: bool,

    destroyed: bool,

    events: broadcast::Sender<EllipsisEvent>,
}

impl<S: MeasureSurface> Ellipsis<S> {
    pub fn new(surface: S, options: EllipsisOptions) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let previous_dimensions = surface.dimensions();
        Self {
            surface,
            content: Vec::new(),
            options,
            listener: None,
            previous_signature: None,
            previous_dimensions,
            committed: None,
            pending: false,
            destroyed: false,
            events,
        }
    }

    pub fn with_content(mut self, content: Option<Vec<RenderNode>>) -> Self {
        self.set_content(content);
        self
    }

    /// Replace the source content; absent content is treated as empty.
    ///
    /// Nothing is re-applied until [`detect_changes`](Self::detect_changes)
    /// or a trigger runs.
    pub fn set_content(&mut self, content: Option<Vec<RenderNode>>) {
        self.content = content.unwrap_or_default();
    }

    pub fn content(&self) -> &[RenderNode] {
        &self.content
    }

    /// Replace the options; takes effect on the next application
    pub fn set_options(&mut self, options: EllipsisOptions) {
        self.options = options;
    }

    pub fn options(&self) -> &EllipsisOptions {
        &self.options
    }

    /// Subscribe to change events.
    ///
    /// Events are only sent while at least one receiver exists.
    pub fn subscribe(&self) -> broadcast::Receiver<EllipsisEvent> {
        self.events.subscribe()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The last committed result
    pub fn last_result(&self) -> Option<&TruncationResult> {
        self.committed.as_ref()
    }

    /// Whether an application is waiting for the surface to attach
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// The open resize listener, if any
    pub fn listener(&self) -> Option<&ResizeListener> {
        self.listener.as_ref()
    }

    /// Signature of the current content and indicator
    pub fn signature(&self) -> String {
        let mut signature = signature(&self.content);
        signature.push_str(&self.options.indicator.signature());
        signature
    }

    /// Record the surface size and apply for the first time
    pub fn init(&mut self) -> Result<Option<TruncationResult>> {
        self.previous_dimensions = self.surface.dimensions();
        self.apply_truncation()
    }

    /// The collaborator reports that the surface is now mounted; runs a
    /// deferred application, if any.
    pub fn attached(&mut self) -> Result<Option<TruncationResult>> {
        if !self.pending {
            return Ok(None);
        }
        debug!("surface attached, running deferred truncation");
        self.init()
    }

    /// Truncate the content to fit the surface and commit the result.
    ///
    /// The resize listener is closed for the duration of the attempt and
    /// reopened afterwards. On a measurement error the previously committed
    /// render is restored and the error returned.
    pub fn apply_truncation(&mut self) -> Result<Option<TruncationResult>> {
        self.listener = None;

        if !self.surface.is_attached() {
            if !self.pending {
                debug!("surface not attached, deferring truncation until attached");
            }
            self.pending = true;
            return Ok(None);
        }
        self.pending = false;
        self.previous_signature = Some(self.signature());

        let result = match engine::apply_truncation(&self.content, &mut self.surface, &self.options)
        {
            Ok(Some(result)) => result,
            Ok(None) => {
                self.pending = true;
                return Ok(None);
            }
            Err(e) => {
                warn!("Truncation failed, keeping previous render: {}", e);
                let prior = self
                    .committed
                    .as_ref()
                    .map(|result| result.content.as_slice())
                    .unwrap_or_default();
                self.surface.render(prior);
                self.reopen_listener();
                return Err(e);
            }
        };

        self.committed = Some(result.clone());

        if !self.options.active {
            return Ok(Some(result));
        }

        self.reopen_listener();
        self.emit(EllipsisEvent::Change {
            offset: result.offset,
        });

        Ok(Some(result))
    }

    /// Re-apply if the content or indicator changed since the last
    /// application. Does nothing in manual mode or before the first
    /// application.
    pub fn detect_changes(&mut self) -> Result<Option<TruncationResult>> {
        if self.options.resize_detection == ResizeDetection::Manual {
            return Ok(None);
        }

        let current = self.signature();
        let changed = self
            .previous_signature
            .as_deref()
            .is_some_and(|previous| previous != current);

        if !changed {
            return Ok(None);
        }

        debug!("content signature changed, re-applying truncation");
        self.apply_truncation()
    }

    /// Dispatch a trigger observed by the collaborator.
    ///
    /// Resize triggers are ignored unless a listener of the matching kind is
    /// open. Element resizes only re-apply when the client size actually
    /// changed since the last one acted upon.
    pub fn handle_trigger(&mut self, trigger: Trigger) -> Result<Option<TruncationResult>> {
        match trigger {
            Trigger::Manual => self.apply_truncation(),
            Trigger::ContentChanged => self.detect_changes(),
            Trigger::ElementResized | Trigger::WindowResized => {
                let listening = self
                    .listener
                    .as_ref()
                    .is_some_and(|listener| listener.accepts(trigger));
                if !listening {
                    trace!("ignoring {:?}, no matching listener", trigger);
                    return Ok(None);
                }

                if trigger == Trigger::WindowResized {
                    return self.apply_truncation();
                }

                if self.surface.dimensions() == self.previous_dimensions {
                    return Ok(None);
                }

                let dimensions = self.surface.dimensions();
                let result = self.apply_truncation();
                // a failed attempt must be retried at the same size
                if result.is_ok() {
                    self.previous_dimensions = dimensions;
                }
                result
            }
        }
    }

    /// Close the resize listener for good
    pub fn destroy(&mut self) {
        self.listener = None;
        self.destroyed = true;
    }

    fn reopen_listener(&mut self) {
        if !self.destroyed {
            self.listener = ResizeListener::open(self.options.resize_detection);
        }
    }

    fn emit(&self, event: EllipsisEvent) {
        if self.events.receiver_count() > 0 {
            trace!("emitting {} event", event.name());
            let _ = self.events.send(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::tests::serif_16px;
    use crate::layout::AdvanceTable;
    use crate::measure::{BoxMetrics, Overflow};
    use crate::options::Indicator;
    use crate::surface::TextBox;
    use nellipsis_core::markup;

    const LOREM: &str = "Lorem ipsum dolor sit amet, consetetur sadipscing elitr, sed diam nonumy eirmod tempor invidunt";

    fn lorem() -> Option<Vec<RenderNode>> {
        Some(vec![RenderNode::text(LOREM)])
    }

    fn controller(options: EllipsisOptions) -> Ellipsis<TextBox<AdvanceTable>> {
        Ellipsis::new(TextBox::new(serif_16px(), 100.0, 50.0), options).with_content(lorem())
    }

    fn rendered<S: MeasureSurface>(ellipsis: &Ellipsis<S>) -> String {
        ellipsis
            .last_result()
            .map(TruncationResult::markup)
            .unwrap_or_default()
    }

    /// TextBox whose measurements can be made to fail
    struct FlakyBox {
        inner: TextBox<AdvanceTable>,
        failing: bool,
    }

    impl MeasureSurface for FlakyBox {
        fn is_attached(&self) -> bool {
            self.inner.is_attached()
        }

        fn render(&mut self, nodes: &[RenderNode]) {
            self.inner.render(nodes);
        }

        fn metrics(&self) -> Result<BoxMetrics> {
            if self.failing {
                return Err(Error::measure("layout engine went away"));
            }
            self.inner.metrics()
        }

        fn overflow(&self) -> Overflow {
            self.inner.overflow()
        }

        fn set_overflow(&mut self, overflow: Overflow) {
            self.inner.set_overflow(overflow);
        }

        fn dimensions(&self) -> Dimensions {
            self.inner.dimensions()
        }
    }

    #[test]
    fn test_init_applies_and_emits() {
        let mut ellipsis = controller(EllipsisOptions::default());
        let mut rx = ellipsis.subscribe();

        let result = ellipsis.init().unwrap().unwrap();

        assert_eq!(result.markup(), "Lorem ipsum dolor sit amet...");
        assert_eq!(rx.try_recv().unwrap(), EllipsisEvent::Change { offset: Some(26) });
        assert!(rx.try_recv().is_err());
        assert!(ellipsis.listener().is_some());
    }

    #[test]
    fn test_content_change_to_fitting_text_emits_none() {
        let mut ellipsis = controller(EllipsisOptions::default());
        ellipsis.init().unwrap();
        let mut rx = ellipsis.subscribe();

        ellipsis.set_content(Some(vec![RenderNode::text("Test")]));
        let result = ellipsis.handle_trigger(Trigger::ContentChanged).unwrap().unwrap();

        assert!(!result.truncated);
        assert_eq!(rx.try_recv().unwrap(), EllipsisEvent::Change { offset: None });
        assert_eq!(markup::serialize(ellipsis.surface().content()), "Test");
    }

    #[test]
    fn test_unchanged_content_is_not_reapplied() {
        let mut ellipsis = controller(EllipsisOptions::default());
        ellipsis.init().unwrap();
        let mut rx = ellipsis.subscribe();
        let passes = ellipsis.surface().layout_passes();

        assert!(ellipsis.detect_changes().unwrap().is_none());
        assert!(rx.try_recv().is_err());
        assert_eq!(ellipsis.surface().layout_passes(), passes);
    }

    #[test]
    fn test_no_change_detection_before_first_application() {
        let mut ellipsis = controller(EllipsisOptions::default());
        assert!(ellipsis.detect_changes().unwrap().is_none());
        assert!(ellipsis.last_result().is_none());
    }

    #[test]
    fn test_indicator_change_is_detected() {
        let mut ellipsis = controller(EllipsisOptions::default());
        ellipsis.init().unwrap();

        ellipsis.set_options(EllipsisOptions::default().with_indicator(Indicator::Text(" »".into())));
        let result = ellipsis.detect_changes().unwrap().unwrap();
        assert!(result.markup().ends_with(" »"));
    }

    #[test]
    fn test_null_content_renders_nothing() {
        let mut ellipsis = controller(EllipsisOptions::default()).with_content(None);
        let mut rx = ellipsis.subscribe();

        let result = ellipsis.init().unwrap().unwrap();

        assert!(result.content.is_empty());
        assert!(!result.truncated);
        assert_eq!(rx.try_recv().unwrap(), EllipsisEvent::Change { offset: None });
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_repeated_application_is_idempotent() {
        let mut ellipsis = controller(EllipsisOptions::default().with_word_boundaries(" \n"));
        let first = ellipsis.apply_truncation().unwrap();
        let second = ellipsis.apply_truncation().unwrap();
        assert_eq!(first, second);
        assert_eq!(rendered(&ellipsis), "Lorem ipsum dolor sit...");
    }

    #[test]
    fn test_element_resize_reapplies_only_when_size_changed() {
        let mut ellipsis = controller(EllipsisOptions::default());
        ellipsis.init().unwrap();

        assert!(ellipsis.handle_trigger(Trigger::ElementResized).unwrap().is_none());

        ellipsis.surface_mut().resize(100.0, 100.0);
        let result = ellipsis.handle_trigger(Trigger::ElementResized).unwrap().unwrap();
        assert!(result.offset.unwrap() > 26);

        assert!(ellipsis.handle_trigger(Trigger::ElementResized).unwrap().is_none());
        assert!(ellipsis.handle_trigger(Trigger::WindowResized).unwrap().is_none());
    }

    #[test]
    fn test_window_mode_reapplies_on_window_resize() {
        let options = EllipsisOptions::default().with_resize_detection(ResizeDetection::Window);
        let mut ellipsis = controller(options);
        ellipsis.init().unwrap();

        ellipsis.surface_mut().resize(100.0, 100.0);
        assert!(ellipsis.handle_trigger(Trigger::ElementResized).unwrap().is_none());
        assert!(ellipsis.handle_trigger(Trigger::WindowResized).unwrap().is_some());
        // window resizes re-apply even without a size change
        assert!(ellipsis.handle_trigger(Trigger::WindowResized).unwrap().is_some());
    }

    #[test]
    fn test_manual_mode_has_no_automatic_triggers() {
        let options = EllipsisOptions::default().with_resize_detection(ResizeDetection::Manual);
        let mut ellipsis = controller(options);
        ellipsis.init().unwrap();
        assert!(ellipsis.listener().is_none());

        ellipsis.surface_mut().resize(100.0, 100.0);
        ellipsis.set_content(Some(vec![RenderNode::text("Test")]));
        assert!(ellipsis.handle_trigger(Trigger::ElementResized).unwrap().is_none());
        assert!(ellipsis.handle_trigger(Trigger::WindowResized).unwrap().is_none());
        assert!(ellipsis.handle_trigger(Trigger::ContentChanged).unwrap().is_none());
        assert_eq!(rendered(&ellipsis), "Lorem ipsum dolor sit amet...");

        let result = ellipsis.handle_trigger(Trigger::Manual).unwrap().unwrap();
        assert_eq!(result.markup(), "Test");
    }

    #[test]
    fn test_inactive_renders_everything_without_events() {
        let mut ellipsis = controller(EllipsisOptions::default().with_active(false));
        let mut rx = ellipsis.subscribe();

        let result = ellipsis.init().unwrap().unwrap();

        assert_eq!(result.markup(), LOREM);
        assert!(rx.try_recv().is_err());
        assert!(ellipsis.listener().is_none());
    }

    #[test]
    fn test_detached_surface_defers_until_attached() {
        let surface = TextBox::detached(serif_16px(), 100.0, 50.0);
        let mut ellipsis = Ellipsis::new(surface, EllipsisOptions::default()).with_content(lorem());
        let mut rx = ellipsis.subscribe();

        assert!(ellipsis.init().unwrap().is_none());
        assert!(ellipsis.is_pending());
        assert!(rx.try_recv().is_err());
        assert!(ellipsis.surface().content().is_empty());

        ellipsis.surface_mut().attach();
        let result = ellipsis.attached().unwrap().unwrap();
        assert_eq!(result.markup(), "Lorem ipsum dolor sit amet...");
        assert!(!ellipsis.is_pending());
        assert!(rx.try_recv().is_ok());

        assert!(ellipsis.attached().unwrap().is_none());
    }

    #[test]
    fn test_measurement_error_keeps_previous_render() {
        let surface = FlakyBox {
            inner: TextBox::new(serif_16px(), 100.0, 50.0),
            failing: false,
        };
        let mut ellipsis = Ellipsis::new(surface, EllipsisOptions::default()).with_content(lorem());
        ellipsis.init().unwrap();
        let committed = ellipsis.surface().inner.content().to_vec();

        ellipsis.surface_mut().failing = true;
        ellipsis.set_content(Some(vec![RenderNode::text("Something else entirely")]));
        let err = ellipsis.apply_truncation().unwrap_err();

        assert!(err.is_recoverable());
        assert_eq!(ellipsis.surface().inner.content(), committed.as_slice());
        assert_eq!(rendered(&ellipsis), "Lorem ipsum dolor sit amet...");
        assert!(ellipsis.listener().is_some());
    }

    #[test]
    fn test_failed_element_resize_is_retried_at_same_size() {
        let surface = FlakyBox {
            inner: TextBox::new(serif_16px(), 100.0, 50.0),
            failing: false,
        };
        let mut ellipsis = Ellipsis::new(surface, EllipsisOptions::default()).with_content(lorem());
        ellipsis.init().unwrap();

        ellipsis.surface_mut().inner.resize(100.0, 100.0);
        ellipsis.surface_mut().failing = true;
        assert!(ellipsis.handle_trigger(Trigger::ElementResized).is_err());
        assert_eq!(rendered(&ellipsis), "Lorem ipsum dolor sit amet...");

        ellipsis.surface_mut().failing = false;
        let result = ellipsis.handle_trigger(Trigger::ElementResized).unwrap().unwrap();
        assert!(result.offset.unwrap() > 26);

        // committed now, so the same size is no longer a change
        assert!(ellipsis.handle_trigger(Trigger::ElementResized).unwrap().is_none());
    }

    #[test]
    fn test_destroy_closes_listener() {
        let mut ellipsis = controller(EllipsisOptions::default());
        ellipsis.init().unwrap();
        ellipsis.destroy();
        assert!(ellipsis.listener().is_none());

        ellipsis.surface_mut().resize(100.0, 100.0);
        assert!(ellipsis.handle_trigger(Trigger::ElementResized).unwrap().is_none());

        // explicit application still works but does not resubscribe
        assert!(ellipsis.apply_truncation().unwrap().is_some());
        assert!(ellipsis.listener().is_none());
    }

    #[test]
    fn test_signature_covers_content_and_indicator() {
        let ellipsis = controller(EllipsisOptions::default());
        assert_eq!(ellipsis.signature(), format!("{LOREM}..."));
    }
}
