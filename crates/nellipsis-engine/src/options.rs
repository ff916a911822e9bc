//! Collaborator-facing truncation options

use nellipsis_core::{markup, RenderNode};
use serde::{Deserialize, Serialize};

use crate::boundary::{CutPolicy, MayTruncateAt, WordBoundaries};
use crate::resize::ResizeDetection;

/// Default indicator appended to truncated content
pub const DEFAULT_INDICATOR: &str = "...";

/// Marker appended when content has been truncated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Indicator {
    /// Literal text, glued onto the text unit where the cut happened
    Text(String),
    /// A render forest appended after the kept content
    Tree(Vec<RenderNode>),
}

impl Indicator {
    /// Signature contribution: text verbatim, trees serialized
    pub fn signature(&self) -> String {
        match self {
            Indicator::Text(text) => text.clone(),
            Indicator::Tree(nodes) => markup::serialize(nodes),
        }
    }
}

impl Default for Indicator {
    fn default() -> Self {
        Indicator::Text(DEFAULT_INDICATOR.to_string())
    }
}

impl From<&str> for Indicator {
    fn from(text: &str) -> Self {
        Indicator::Text(text.to_string())
    }
}

impl From<Vec<RenderNode>> for Indicator {
    fn from(nodes: Vec<RenderNode>) -> Self {
        Indicator::Tree(nodes)
    }
}

/// Options controlling how content is truncated.
#[derive(Debug, Clone)]
pub struct EllipsisOptions {
    /// When false the content is rendered untruncated
    pub active: bool,

    pub indicator: Indicator,

    /// Characters at which text may be cut; empty means any character
    pub word_boundaries: String,

    pub may_truncate_at: Option<MayTruncateAt>,

    pub resize_detection: ResizeDetection,
}

impl Default for EllipsisOptions {
    fn default() -> Self {
        Self {
            active: true,
            indicator: Indicator::default(),
            word_boundaries: String::new(),
            may_truncate_at: None,
            resize_detection: ResizeDetection::default(),
        }
    }
}

impl EllipsisOptions {
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_indicator(mut self, indicator: impl Into<Indicator>) -> Self {
        self.indicator = indicator.into();
        self
    }

    pub fn with_word_boundaries(mut self, chars: impl Into<String>) -> Self {
        self.word_boundaries = chars.into();
        self
    }

    pub fn with_may_truncate_at(
        mut self,
        predicate: impl Fn(&str, usize) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.may_truncate_at = Some(MayTruncateAt::new(predicate));
        self
    }

    pub fn with_resize_detection(mut self, detection: ResizeDetection) -> Self {
        self.resize_detection = detection;
        self
    }

    /// Compile the boundary set and predicate into a cut policy
    pub fn cut_policy(&self) -> CutPolicy {
        CutPolicy::new(
            WordBoundaries::new(&self.word_boundaries),
            self.may_truncate_at.clone(),
        )
    }
}
