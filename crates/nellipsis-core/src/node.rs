//! # Render Tree Types
//!
//! The render tree is the content handed to the truncation engine: an ordered
//! forest of text runs and inline elements. It is owned by the caller and never
//! mutated by the engine; truncation works on a disposable
//! [`WorkingTree`](crate::arena::WorkingTree) copy instead.
//!
//! ## Key Types
//!
//! - [`RenderNode`] - A text run, an inline element, or a comment
//! - [`TextUnit`] - Character data
//! - [`ElementUnit`] - An element with a tag, attributes and children

use serde::{Deserialize, Serialize};

use crate::markup;

// ============================================================================
// RenderNode
// ============================================================================

/// A node of the render tree.
///
/// Serialized with an internal `type` tag so that trees can be exchanged as
/// JSON (`{"type": "text", "data": "..."}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RenderNode {
    /// A run of character data
    Text(TextUnit),
    /// An inline element
    Element(ElementUnit),
    /// A comment; rendered and serialized but never counted or truncated
    Comment { data: String },
}

impl RenderNode {
    /// Create a text node
    pub fn text(data: impl Into<String>) -> Self {
        Self::Text(TextUnit { data: data.into() })
    }

    /// Create an element node without attributes
    pub fn element(tag: impl Into<String>, children: Vec<RenderNode>) -> Self {
        Self::Element(ElementUnit {
            tag: tag.into(),
            attributes: Vec::new(),
            children,
        })
    }

    /// Create a comment node
    pub fn comment(data: impl Into<String>) -> Self {
        Self::Comment { data: data.into() }
    }

    /// Content length of this subtree.
    ///
    /// Elements count as 1 plus their children, text counts its characters,
    /// comments count nothing.
    pub fn content_length(&self) -> usize {
        match self {
            Self::Text(unit) => unit.len(),
            Self::Element(element) => 1 + content_length(&element.children),
            Self::Comment { .. } => 0,
        }
    }
}

/// Content length of a forest: the sum of [`RenderNode::content_length`].
pub fn content_length(nodes: &[RenderNode]) -> usize {
    nodes.iter().map(RenderNode::content_length).sum()
}

/// Structural signature of a forest, used for change detection.
///
/// Two forests have the same signature exactly when they serialize to the
/// same markup.
pub fn signature(nodes: &[RenderNode]) -> String {
    markup::serialize(nodes)
}

// ============================================================================
// TextUnit
// ============================================================================

/// Character data of a text node.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextUnit {
    pub data: String,
}

impl TextUnit {
    /// Length in characters (Unicode scalar values)
    pub fn len(&self) -> usize {
        self.data.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// ============================================================================
// ElementUnit
// ============================================================================

/// An inline element.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ElementUnit {
    /// Lowercase tag name (e.g. "b", "span", "br")
    pub tag: String,

    /// Attributes in document order
    #[serde(default)]
    pub attributes: Vec<(String, String)>,

    /// Child nodes
    #[serde(default)]
    pub children: Vec<RenderNode>,
}

impl ElementUnit {
    /// Whether this element can never have children (`<br>`, `<img>`, ...)
    pub fn is_void(&self) -> bool {
        markup::is_void_element(&self.tag)
    }
}

// ============================================================================
// Tests
// ============================================================================
