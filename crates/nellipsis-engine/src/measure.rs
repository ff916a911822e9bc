//! Overflow measurement adapter
//!
//! The engine talks to whatever displays the content through
//! [`MeasureSurface`]: it renders a candidate forest into the surface and
//! reads back the visible (client) and content (scroll) box sizes.

use nellipsis_core::prelude::*;
use nellipsis_core::RenderNode;
use serde::{Deserialize, Serialize};

/// Sub-pixel tolerance when comparing visible and content sizes
pub const OVERFLOW_EPSILON: f64 = 1.0;

/// Overflow clipping mode of a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Scroll,
    Auto,
}

impl std::fmt::Display for Overflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Overflow::Visible => write!(f, "visible"),
            Overflow::Hidden => write!(f, "hidden"),
            Overflow::Scroll => write!(f, "scroll"),
            Overflow::Auto => write!(f, "auto"),
        }
    }
}

/// Width and height in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Box sizes reported by a surface after layout
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxMetrics {
    pub client_width: f64,
    pub client_height: f64,
    pub scroll_width: f64,
    pub scroll_height: f64,
}

impl BoxMetrics {
    /// Whether the content box exceeds the visible box by more than
    /// [`OVERFLOW_EPSILON`] on either axis
    pub fn overflows(&self) -> bool {
        self.client_width < self.scroll_width - OVERFLOW_EPSILON
            || self.client_height < self.scroll_height - OVERFLOW_EPSILON
    }
}

/// A live box the engine renders candidates into and measures.
#[cfg_attr(test, mockall::automock)]
pub trait MeasureSurface {
    /// Whether the surface is mounted and can be measured
    fn is_attached(&self) -> bool;

    /// Replace the displayed content
    fn render(&mut self, nodes: &[RenderNode]);

    /// Current box sizes of the displayed content
    fn metrics(&self) -> Result<BoxMetrics>;

    fn overflow(&self) -> Overflow;

    fn set_overflow(&mut self, overflow: Overflow);

    /// Visible (client) size of the box
    fn dimensions(&self) -> Dimensions;
}

/// Forces `Overflow::Hidden` for as long as it lives and restores the prior
/// mode when dropped.
pub struct OverflowGuard<'a, S: MeasureSurface + ?Sized> {
    surface: &'a mut S,
    previous: Overflow,
}

impl<'a, S: MeasureSurface + ?Sized> OverflowGuard<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        let previous = surface.overflow();
        if previous != Overflow::Hidden {
            surface.set_overflow(Overflow::Hidden);
        }
        Self { surface, previous }
    }

    pub fn surface(&self) -> &S {
        &*self.surface
    }

    /// Mode that will be restored on drop
    pub fn previous(&self) -> Overflow {
        self.previous
    }
}

impl<S: MeasureSurface + ?Sized> Drop for OverflowGuard<'_, S> {
    fn drop(&mut self) {
        if self.previous != Overflow::Hidden {
            self.surface.set_overflow(self.previous);
        }
    }
}

/// Whether the content currently rendered into `surface` overflows it.
///
/// Measured with clipping forced to hidden; the surface's own overflow mode
/// is restored on every path, including a measurement error.
pub fn is_overflowing<S: MeasureSurface + ?Sized>(surface: &mut S) -> Result<bool> {
    let guard = OverflowGuard::new(surface);
    let metrics = guard.surface().metrics()?;
    let overflowing = metrics.overflows();
    trace!(
        "measured client {}x{} scroll {}x{} overflowing={}",
        metrics.client_width,
        metrics.client_height,
        metrics.scroll_width,
        metrics.scroll_height,
        overflowing
    );
    Ok(overflowing)
}
