//! nellipsis-engine - Truncation engine for Nested Ellipsis
//!
//! Finds, by binary search over the flattened content length, the longest
//! prefix of a render forest that still fits a measurement surface, appends
//! the indicator and commits the result. The [`Ellipsis`] controller decides
//! when to re-apply (content changes, resizes, explicit requests) and
//! broadcasts [`EllipsisEvent`]s.
//!
//! ## Public API
//!
//! - [`apply_truncation()`] - One complete search against a surface
//! - [`truncate_to()`] / [`truncate_text()`] - Realize a single candidate
//! - [`numeric_binary_search()`] - The search primitive
//! - [`MeasureSurface`] - What the engine needs from a rendered box
//! - [`TextBox`] - Fixed-size box with greedy inline layout
//! - [`Ellipsis`] - Controller owning surface, content and options
//! - [`config`] - `.nellipsis/config.toml` settings

pub mod boundary;
pub mod config;
pub mod ellipsis;
pub mod engine;
pub mod event;
pub mod layout;
pub mod measure;
pub mod options;
pub mod resize;
pub mod search;
pub mod surface;
pub mod truncate;

// Re-export primary types
pub use boundary::{CutPolicy, MayTruncateAt, WordBoundaries};
pub use ellipsis::Ellipsis;
pub use engine::{apply_truncation, truncate_text, TruncationResult};
pub use event::EllipsisEvent;
pub use layout::{AdvanceTable, CellMetrics, FontMetrics, InlineStyle};
pub use measure::{is_overflowing, BoxMetrics, Dimensions, MeasureSurface, Overflow};
pub use options::{EllipsisOptions, Indicator, DEFAULT_INDICATOR};
pub use resize::{ResizeDetection, ResizeListener, Trigger};
pub use search::{numeric_binary_search, try_numeric_binary_search};
pub use surface::TextBox;
pub use truncate::{truncate_to, Truncation};
