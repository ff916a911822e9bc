//! Configuration file parsing for Nested Ellipsis
//!
//! Supports:
//! - `.nellipsis/config.toml` - Truncation, layout and UI settings

pub mod settings;
pub mod types;

pub use settings::{config_path, init_config_dir, load_settings, read_settings};
pub use types::*;
