//! Configuration types for Nested Ellipsis
//!
//! Defines `Settings` (`.nellipsis/config.toml`) and its sections.

use nellipsis_core::prelude::*;
use serde::{Deserialize, Serialize};

use crate::layout::CellMetrics;
use crate::measure::Overflow;
use crate::options::{EllipsisOptions, Indicator, DEFAULT_INDICATOR};
use crate::resize::ResizeDetection;

/// Application settings (.nellipsis/config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub ellipsis: EllipsisSettings,

    #[serde(default)]
    pub layout: LayoutSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

impl Settings {
    /// Truncation options described by these settings
    pub fn options(&self) -> EllipsisOptions {
        EllipsisOptions::default()
            .with_active(self.ellipsis.active)
            .with_indicator(self.ellipsis.indicator())
            .with_word_boundaries(self.ellipsis.word_boundaries.clone())
            .with_resize_detection(self.ellipsis.resize_detection)
    }
}

/// Truncation settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EllipsisSettings {
    /// Render untruncated content when false
    #[serde(default = "default_true")]
    pub active: bool,

    #[serde(default = "default_indicator")]
    pub indicator: String,

    /// Parse `indicator` as markup instead of literal text
    #[serde(default)]
    pub indicator_markup: bool,

    /// Characters at which text may be cut; empty means anywhere
    #[serde(default)]
    pub word_boundaries: String,

    #[serde(default)]
    pub resize_detection: ResizeDetection,
}

impl EllipsisSettings {
    /// The configured indicator. Markup that fails to parse is used as
    /// literal text.
    pub fn indicator(&self) -> Indicator {
        if !self.indicator_markup {
            return Indicator::Text(self.indicator.clone());
        }

        match nellipsis_core::parse(&self.indicator) {
            Ok(nodes) => Indicator::Tree(nodes),
            Err(e) => {
                warn!("Invalid indicator markup {:?}, using it as text: {}", self.indicator, e);
                Indicator::Text(self.indicator.clone())
            }
        }
    }
}

impl Default for EllipsisSettings {
    fn default() -> Self {
        Self {
            active: true,
            indicator: default_indicator(),
            indicator_markup: false,
            word_boundaries: String::new(),
            resize_detection: ResizeDetection::default(),
        }
    }
}

/// Layout settings for the terminal surface
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LayoutSettings {
    /// Pixels per terminal cell column
    #[serde(default = "default_cell_width")]
    pub cell_width: f64,

    /// Pixels per line
    #[serde(default = "default_line_height")]
    pub line_height: f64,

    #[serde(default)]
    pub overflow: Overflow,
}

impl LayoutSettings {
    pub fn cell_metrics(&self) -> CellMetrics {
        CellMetrics::new(self.cell_width, self.line_height)
    }
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            cell_width: default_cell_width(),
            line_height: default_line_height(),
            overflow: Overflow::default(),
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiSettings {
    #[serde(default = "default_true")]
    pub show_status_bar: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            show_status_bar: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_indicator() -> String {
    DEFAULT_INDICATOR.to_string()
}

fn default_cell_width() -> f64 {
    CellMetrics::DEFAULT_CELL_WIDTH
}

fn default_line_height() -> f64 {
    CellMetrics::DEFAULT_CELL_HEIGHT
}
