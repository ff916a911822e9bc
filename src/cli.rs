//! Command-line arguments

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Parser;
use nellipsis_core::prelude::*;
use nellipsis_core::RenderNode;
use nellipsis_engine::config::{load_settings, read_settings, Settings};
use nellipsis_engine::ResizeDetection;

/// Nested Ellipsis - truncate nested markup to fit a fixed box
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "nellipsis")]
#[command(about = "Truncate nested markup to fit a fixed box", long_about = None)]
pub struct Args {
    /// Markup to truncate ("-" reads stdin)
    #[arg(value_name = "CONTENT")]
    pub content: Option<String>,

    /// Read markup from a file (watched in interactive mode)
    #[arg(long, short = 'f', value_name = "PATH", conflicts_with = "content")]
    pub file: Option<PathBuf>,

    /// Box width in cells
    #[arg(long, default_value_t = 40)]
    pub width: u16,

    /// Box height in cells
    #[arg(long, default_value_t = 3)]
    pub height: u16,

    /// Text appended to truncated content
    #[arg(long)]
    pub indicator: Option<String>,

    /// Characters at which text may be cut
    #[arg(long, value_name = "CHARS")]
    pub word_boundaries: Option<String>,

    /// resize-observer, window or manual
    #[arg(long, value_name = "MODE")]
    pub resize_detection: Option<String>,

    /// Render the content untruncated
    #[arg(long)]
    pub inactive: bool,

    /// Directory containing .nellipsis/config.toml (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub config: Option<PathBuf>,

    /// Write a default .nellipsis/config.toml and exit
    #[arg(long, conflicts_with_all = ["content", "file", "interactive", "json"])]
    pub init: bool,

    /// Print the result as JSON
    #[arg(long, conflicts_with = "interactive")]
    pub json: bool,

    /// Open the interactive viewer
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

impl Args {
    /// Directory holding `.nellipsis/`
    pub fn project_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// Settings from the config file with command-line overrides applied.
    ///
    /// A directory named with `--config` must hold a valid config file; the
    /// current directory falls back to defaults.
    pub fn settings(&self) -> Result<Settings> {
        let settings = match &self.config {
            Some(dir) => read_settings(dir)?,
            None => load_settings(&self.project_path()),
        };
        Ok(self.apply_overrides(settings))
    }

    /// Apply command-line flags on top of `settings`
    pub fn apply_overrides(&self, mut settings: Settings) -> Settings {
        if let Some(indicator) = &self.indicator {
            settings.ellipsis.indicator = indicator.clone();
        }
        if let Some(boundaries) = &self.word_boundaries {
            settings.ellipsis.word_boundaries = boundaries.clone();
        }
        if let Some(mode) = &self.resize_detection {
            settings.ellipsis.resize_detection = ResizeDetection::parse(mode);
        }
        if self.inactive {
            settings.ellipsis.active = false;
        }
        settings
    }

    /// Parse the content markup; no content at all is an empty forest
    pub fn read_content(&self) -> Result<Vec<RenderNode>> {
        let markup = match (&self.file, self.content.as_deref()) {
            (Some(path), _) => Some(read_file(path)?),
            (None, Some("-")) => {
                let mut markup = String::new();
                std::io::stdin()
                    .read_to_string(&mut markup)
                    .context("Failed to read content from stdin")?;
                Some(markup)
            }
            (None, Some(markup)) => Some(markup.to_string()),
            (None, None) => None,
        };
        nellipsis_core::parse_optional(markup.as_deref())
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
