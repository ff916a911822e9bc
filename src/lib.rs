//! Nested Ellipsis Library
//!
//! Truncates nested markup to fit a fixed box, either once (headless) or
//! live in a terminal viewer.

pub mod cli;
pub mod headless;

use std::io;

use nellipsis_core::prelude::*;
use nellipsis_engine::{Ellipsis, TextBox};
use nellipsis_tui::ViewerState;

pub use cli::Args;

/// Main application entry point
pub fn run(args: Args) -> Result<()> {
    // Initialize error handling
    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;

    // Initialize logging (to file, since the viewer owns stdout)
    nellipsis_core::logging::init()?;

    info!("Nested Ellipsis starting");

    if args.init {
        let project_path = args.project_path();
        nellipsis_engine::config::init_config_dir(&project_path)?;
        println!(
            "{}",
            nellipsis_engine::config::config_path(&project_path).display()
        );
        return Ok(());
    }

    let settings = args.settings()?;
    let content = args.read_content()?;

    let result = if args.interactive {
        let metrics = settings.layout.cell_metrics();
        let text_box = TextBox::new(metrics, 0.0, 0.0).with_overflow(settings.layout.overflow);
        let ellipsis = Ellipsis::new(text_box, settings.options()).with_content(Some(content));

        let mut state = ViewerState::new(ellipsis, args.width, args.height)
            .with_status_bar(settings.ui.show_status_bar);
        if let Some(path) = &args.file {
            state = state.with_content_path(path.clone());
        }
        nellipsis_tui::run(state)
    } else {
        headless::truncate(content, &settings, args.width, args.height)
            .and_then(|report| headless::write_report(&mut io::stdout().lock(), &report, args.json))
    };

    if let Err(ref e) = result {
        error!("Application error: {:?}", e);
    }

    info!("Nested Ellipsis exiting");
    result
}
