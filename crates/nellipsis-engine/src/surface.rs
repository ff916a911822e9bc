//! Fixed-size text box measurement surface
//!
//! [`TextBox`] is the in-process stand-in for a rendered element: it keeps
//! the forest it was last asked to render, lays it out with
//! [`layout`](crate::layout::layout) and answers box size queries the way a
//! block element with a fixed width and height would.

use nellipsis_core::prelude::*;
use nellipsis_core::RenderNode;

use crate::layout::{layout, CellMetrics, FontMetrics, Layout, Line};
use crate::measure::{BoxMetrics, Dimensions, MeasureSurface, Overflow};

/// A fixed-size box that lays out inline content.
#[derive(Debug, Clone)]
pub struct TextBox<M: FontMetrics = CellMetrics> {
    metrics: M,
    size: Dimensions,
    overflow: Overflow,
    attached: bool,
    content: Vec<RenderNode>,
    layout: Layout,
    /// Visible size after scrollbars
    client: Dimensions,
    layout_passes: usize,
}

impl<M: FontMetrics> TextBox<M> {
    /// Create an attached, empty box of `width` x `height` pixels
    pub fn new(metrics: M, width: f64, height: f64) -> Self {
        let mut text_box = Self {
            metrics,
            size: Dimensions::new(width, height),
            overflow: Overflow::default(),
            attached: true,
            content: Vec::new(),
            layout: Layout::default(),
            client: Dimensions::new(width, height),
            layout_passes: 0,
        };
        text_box.relayout();
        text_box
    }

    /// Create a box that is not mounted yet
    pub fn detached(metrics: M, width: f64, height: f64) -> Self {
        let mut text_box = Self::new(metrics, width, height);
        text_box.attached = false;
        text_box
    }

    pub fn with_overflow(mut self, overflow: Overflow) -> Self {
        self.set_overflow(overflow);
        self
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// Change the outer size of the box
    pub fn resize(&mut self, width: f64, height: f64) {
        let size = Dimensions::new(width.max(0.0), height.max(0.0));
        if size != self.size {
            debug!("text box resized to {}x{}", size.width, size.height);
            self.size = size;
            self.relayout();
        }
    }

    /// Outer size of the box, scrollbars included
    pub fn size(&self) -> Dimensions {
        self.size
    }

    pub fn font_metrics(&self) -> &M {
        &self.metrics
    }

    /// The forest currently displayed
    pub fn content(&self) -> &[RenderNode] {
        &self.content
    }

    /// Laid-out lines of the current content
    pub fn lines(&self) -> &[Line] {
        &self.layout.lines
    }

    /// Number of layouts performed so far
    pub fn layout_passes(&self) -> usize {
        self.layout_passes
    }

    /// Space taken by a scrollbar: one em wide, one line tall
    fn scrollbar(&self) -> Dimensions {
        Dimensions::new(self.metrics.font_size(), self.metrics.line_height())
    }

    fn relayout(&mut self) {
        self.layout_passes += 1;
        let scrollbar = self.scrollbar();

        let (width, height) = match self.overflow {
            Overflow::Visible | Overflow::Hidden => (self.size.width, self.size.height),
            Overflow::Scroll => (
                self.size.width - scrollbar.width,
                self.size.height - scrollbar.height,
            ),
            Overflow::Auto => {
                let full = layout(&self.content, &self.metrics, self.size.width);
                if full.height > self.size.height + f64::EPSILON {
                    (self.size.width - scrollbar.width, self.size.height)
                } else {
                    self.client = self.size;
                    self.layout = full;
                    return;
                }
            }
        };

        self.client = Dimensions::new(width.max(0.0), height.max(0.0));
        self.layout = layout(&self.content, &self.metrics, self.client.width);
    }
}

impl<M: FontMetrics> MeasureSurface for TextBox<M> {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn render(&mut self, nodes: &[RenderNode]) {
        self.content = nodes.to_vec();
        self.relayout();
    }

    fn metrics(&self) -> Result<BoxMetrics> {
        if !self.attached {
            return Err(Error::Detached);
        }

        Ok(BoxMetrics {
            client_width: self.client.width,
            client_height: self.client.height,
            scroll_width: self.client.width.max(self.layout.width),
            scroll_height: self.client.height.max(self.layout.height),
        })
    }

    fn overflow(&self) -> Overflow {
        self.overflow
    }

    fn set_overflow(&mut self, overflow: Overflow) {
        if overflow != self.overflow {
            self.overflow = overflow;
            self.relayout();
        }
    }

    fn dimensions(&self) -> Dimensions {
        self.client
    }
}
