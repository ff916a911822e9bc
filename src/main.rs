//! Nested Ellipsis - truncate nested markup to fit a fixed box
//!
//! This is the binary entry point. All logic lives in the library.

use clap::Parser;
use nested_ellipsis::Args;

fn main() -> nellipsis_core::Result<()> {
    nested_ellipsis::run(Args::parse())
}
