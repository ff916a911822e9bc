//! Headless mode - one-shot truncation without the TUI
//!
//! Lays the content out in a box of the requested size, truncates it once
//! and prints either the laid-out lines or a JSON report:
//!
//! ```json
//! {"truncated":true,"offset":21,"markup":"Lorem ipsum dolor sit...","lines":["Lorem ipsum","dolor sit..."]}
//! ```

use std::io::Write;

use nellipsis_core::prelude::*;
use nellipsis_core::RenderNode;
use nellipsis_engine::config::Settings;
use nellipsis_engine::layout::Line;
use nellipsis_engine::{Ellipsis, TextBox};
use serde::Serialize;

/// Outcome of a headless run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadlessReport {
    pub truncated: bool,
    /// Kept content length, `null` when untruncated
    pub offset: Option<usize>,
    /// Committed render as markup
    pub markup: String,
    /// Laid-out lines of the committed render
    pub lines: Vec<String>,
}

/// Truncate `content` to a `columns` x `rows` cell box
pub fn truncate(
    content: Vec<RenderNode>,
    settings: &Settings,
    columns: u16,
    rows: u16,
) -> Result<HeadlessReport> {
    let metrics = settings.layout.cell_metrics();
    let text_box = TextBox::new(
        metrics,
        f64::from(columns) * metrics.cell_width,
        f64::from(rows) * metrics.cell_height,
    )
    .with_overflow(settings.layout.overflow);

    let mut ellipsis = Ellipsis::new(text_box, settings.options()).with_content(Some(content));
    let result = ellipsis.init()?.ok_or(Error::Detached)?;

    Ok(HeadlessReport {
        truncated: result.truncated,
        offset: result.offset,
        markup: result.markup(),
        lines: ellipsis.surface().lines().iter().map(Line::text).collect(),
    })
}

/// Print the report as lines or as a single JSON object
pub fn write_report<W: Write>(out: &mut W, report: &HeadlessReport, json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(report)?)?;
    } else {
        for line in &report.lines {
            writeln!(out, "{}", line)?;
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nellipsis_engine::Overflow;

    const LOREM: &str = "Lorem ipsum dolor sit amet, consetetur sadipscing elitr, sed diam nonumy eirmod tempor invidunt";

    fn lorem() -> Vec<RenderNode> {
        vec![RenderNode::text(LOREM)]
    }

    #[test]
    fn test_truncate_to_cells() {
        let report = truncate(lorem(), &Settings::default(), 12, 2).unwrap();
        assert!(report.truncated);
        assert_eq!(report.offset, Some(21));
        assert_eq!(report.markup, "Lorem ipsum dolor sit...");
        assert_eq!(report.lines, vec!["Lorem ipsum", "dolor sit..."]);
    }

    #[test]
    fn test_word_boundaries_from_settings() {
        let mut settings = Settings::default();
        settings.ellipsis.word_boundaries = " \n".into();

        let report = truncate(lorem(), &settings, 40, 2).unwrap();
        assert_eq!(report.offset, Some(72));
        assert!(report.markup.ends_with("nonumy..."));
    }

    #[test]
    fn test_fitting_content() {
        let report = truncate(lorem(), &Settings::default(), 40, 5).unwrap();
        assert!(!report.truncated);
        assert_eq!(report.offset, None);
        assert_eq!(report.lines.len(), 3);
    }

    #[test]
    fn test_hidden_overflow_is_restored_after_measuring() {
        let mut settings = Settings::default();
        settings.layout.overflow = Overflow::Hidden;
        let report = truncate(lorem(), &settings, 12, 2).unwrap();
        assert_eq!(report.offset, Some(21));
    }

    #[test]
    fn test_write_lines() {
        let report = truncate(lorem(), &Settings::default(), 12, 2).unwrap();
        let mut out = Vec::new();
        write_report(&mut out, &report, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Lorem ipsum\ndolor sit...\n");
    }

    #[test]
    fn test_write_json() {
        let report = truncate(lorem(), &Settings::default(), 12, 2).unwrap();
        let mut out = Vec::new();
        write_report(&mut out, &report, true).unwrap();
        insta::assert_snapshot!(String::from_utf8(out).unwrap().trim_end(), @r#"{"truncated":true,"offset":21,"markup":"Lorem ipsum dolor sit...","lines":["Lorem ipsum","dolor sit..."]}"#);
    }

    #[test]
    fn test_empty_content() {
        let report = truncate(Vec::new(), &Settings::default(), 12, 2).unwrap();
        assert!(!report.truncated);
        assert_eq!(report.markup, "");
        assert!(report.lines.is_empty());
    }
}
