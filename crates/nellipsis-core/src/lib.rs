//! # nellipsis-core - Render Tree and Length Model
//!
//! Foundation crate for Nested Ellipsis. Provides the render tree handed to the
//! truncation engine, the disposable working copy each attempt prunes, the
//! flattening/length model, markup parsing and error handling.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, tracing, html5ever, indextree).
//!
//! ## Public API
//!
//! ### Render Tree (`node`)
//! - [`RenderNode`] - Text run, inline element, or comment
//! - [`TextUnit`], [`ElementUnit`] - Node payloads
//! - [`content_length()`] - Total length of a forest (elements count 1)
//! - [`signature()`] - Structural signature used for change detection
//!
//! ### Working Copy (`arena`)
//! - [`WorkingTree`] - Arena-backed mutable copy of a forest
//! - [`WorkingNode`] - Arena node payload
//!
//! ### Flattening (`flatten`)
//! - [`FlatUnit`] - Addressable unit with start offset and length
//! - [`flatten()`] - Depth-first pre-order linearization
//!
//! ### Markup (`markup`)
//! - [`parse()`] - Parse an HTML fragment into a forest
//! - [`serialize()`] - Serialize a forest back to markup
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use nellipsis_core::prelude::*;
//! ```

pub mod arena;
pub mod error;
pub mod flatten;
pub mod logging;
pub mod markup;
pub mod node;

/// Prelude for common imports used throughout all Nested Ellipsis crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use arena::{WorkingNode, WorkingTree};
pub use error::{Error, Result, ResultExt};
pub use flatten::{flatten, flatten_nodes, total_length, unit_at_offset, FlatUnit, UnitKind};
pub use indextree::NodeId;
pub use markup::{is_void_element, parse, parse_optional, serialize};
pub use node::{content_length, signature, ElementUnit, RenderNode, TextUnit};
