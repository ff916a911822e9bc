//! Greedy inline layout for [`TextBox`](crate::surface::TextBox)
//!
//! Just enough of inline formatting to decide whether content fits a fixed
//! box: whitespace collapses to single breaking spaces, words wrap greedily,
//! `<br>` forces a break and a word wider than the line overflows it.
//! Widths are summed in integer font design units and converted to pixels
//! only when compared, so a line that exactly fills the box fits.

use std::collections::HashMap;

use nellipsis_core::RenderNode;
use unicode_width::UnicodeWidthChar;

// ─────────────────────────────────────────────────────────────────────────────
// Font metrics
// ─────────────────────────────────────────────────────────────────────────────

/// Horizontal and vertical metrics of the font used for layout.
pub trait FontMetrics {
    /// Advance width of `ch` in design units
    fn advance(&self, ch: char) -> u32;

    /// Design units per em
    fn units_per_em(&self) -> u32;

    /// Size of one em in pixels
    fn font_size(&self) -> f64;

    /// Height of one line in pixels
    fn line_height(&self) -> f64;

    /// Convert a design unit total to pixels
    fn to_px(&self, units: u64) -> f64 {
        units as f64 * self.font_size() / f64::from(self.units_per_em())
    }
}

/// Terminal cell metrics: every character advances by its display width in
/// cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    /// Pixels per cell column
    pub cell_width: f64,
    /// Pixels per cell row
    pub cell_height: f64,
}

impl CellMetrics {
    pub const DEFAULT_CELL_WIDTH: f64 = 8.0;
    pub const DEFAULT_CELL_HEIGHT: f64 = 16.0;

    pub fn new(cell_width: f64, cell_height: f64) -> Self {
        Self {
            cell_width,
            cell_height,
        }
    }

    /// Columns that fit into `px` pixels
    pub fn columns(&self, px: f64) -> u16 {
        (px / self.cell_width).floor().clamp(0.0, f64::from(u16::MAX)) as u16
    }

    /// Rows that fit into `px` pixels
    pub fn rows(&self, px: f64) -> u16 {
        (px / self.cell_height).floor().clamp(0.0, f64::from(u16::MAX)) as u16
    }
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CELL_WIDTH, Self::DEFAULT_CELL_HEIGHT)
    }
}

impl FontMetrics for CellMetrics {
    fn advance(&self, ch: char) -> u32 {
        ch.width().unwrap_or(0) as u32
    }

    fn units_per_em(&self) -> u32 {
        1
    }

    fn font_size(&self) -> f64 {
        self.cell_width
    }

    fn line_height(&self) -> f64 {
        self.cell_height
    }
}

/// Proportional metrics from a per-character advance table.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvanceTable {
    advances: HashMap<char, u32>,
    default_advance: u32,
    units_per_em: u32,
    font_size: f64,
    line_height: f64,
}

impl AdvanceTable {
    /// Empty table where every character advances half an em
    pub fn new(units_per_em: u32, font_size: f64, line_height: f64) -> Self {
        Self {
            advances: HashMap::new(),
            default_advance: units_per_em / 2,
            units_per_em,
            font_size,
            line_height,
        }
    }

    /// Advance used for characters missing from the table
    pub fn with_default_advance(mut self, advance: u32) -> Self {
        self.default_advance = advance;
        self
    }

    pub fn with_advances(mut self, advances: impl IntoIterator<Item = (char, u32)>) -> Self {
        self.advances.extend(advances);
        self
    }

    pub fn set_advance(&mut self, ch: char, advance: u32) {
        self.advances.insert(ch, advance);
    }
}

impl FontMetrics for AdvanceTable {
    fn advance(&self, ch: char) -> u32 {
        self.advances
            .get(&ch)
            .copied()
            .unwrap_or(self.default_advance)
    }

    fn units_per_em(&self) -> u32 {
        self.units_per_em
    }

    fn font_size(&self) -> f64 {
        self.font_size
    }

    fn line_height(&self) -> f64 {
        self.line_height
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Layout output
// ─────────────────────────────────────────────────────────────────────────────

/// Text decoration inherited from enclosing elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InlineStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl InlineStyle {
    /// Style of the children of an element with tag `tag`
    pub fn nested(self, tag: &str) -> Self {
        let mut style = self;
        match tag {
            "b" | "strong" => style.bold = true,
            "i" | "em" | "cite" | "var" => style.italic = true,
            "u" | "ins" => style.underline = true,
            _ => {}
        }
        style
    }
}

/// A run of characters sharing one style
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fragment {
    pub text: String,
    pub style: InlineStyle,
}

/// One laid-out line
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    pub fragments: Vec<Fragment>,
    /// Width in pixels, excluding a hanging trailing space
    pub width: f64,
}

impl Line {
    /// Plain text of the line
    pub fn text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    fn push(&mut self, ch: char, style: InlineStyle) {
        match self.fragments.last_mut() {
            Some(last) if last.style == style => last.text.push(ch),
            _ => self.fragments.push(Fragment {
                text: ch.to_string(),
                style,
            }),
        }
    }
}

/// Result of laying out a forest
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    pub lines: Vec<Line>,
    /// Widest line in pixels
    pub width: f64,
    /// Total line box height in pixels
    pub height: f64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Line breaking
// ─────────────────────────────────────────────────────────────────────────────

enum Item {
    Char(char, InlineStyle),
    Break,
}

fn is_collapsible_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

fn collect_items(nodes: &[RenderNode], style: InlineStyle, items: &mut Vec<Item>) {
    for node in nodes {
        match node {
            RenderNode::Text(unit) => {
                items.extend(unit.data.chars().map(|ch| Item::Char(ch, style)));
            }
            RenderNode::Element(element) if element.tag == "br" => items.push(Item::Break),
            RenderNode::Element(element) => {
                collect_items(&element.children, style.nested(&element.tag), items);
            }
            RenderNode::Comment { .. } => {}
        }
    }
}

struct LineBreaker<'a, M: FontMetrics + ?Sized> {
    metrics: &'a M,
    available_width: f64,
    lines: Vec<Line>,
    line: Line,
    line_units: u64,
    word: Vec<(char, InlineStyle)>,
    word_units: u64,
    /// Collapsed space waiting for the next word on the current line
    space: Option<InlineStyle>,
}

impl<'a, M: FontMetrics + ?Sized> LineBreaker<'a, M> {
    fn new(metrics: &'a M, available_width: f64) -> Self {
        Self {
            metrics,
            available_width,
            lines: Vec::new(),
            line: Line::default(),
            line_units: 0,
            word: Vec::new(),
            word_units: 0,
            space: None,
        }
    }

    fn push_char(&mut self, ch: char, style: InlineStyle) {
        if is_collapsible_space(ch) {
            self.flush_word();
            if !self.line.is_empty() {
                self.space = Some(style);
            }
        } else {
            self.word.push((ch, style));
            self.word_units += u64::from(self.metrics.advance(ch));
        }
    }

    fn flush_word(&mut self) {
        if self.word.is_empty() {
            return;
        }

        if !self.line.is_empty() {
            let space_units = u64::from(self.metrics.advance(' '));
            let candidate = self.line_units + space_units + self.word_units;
            if self.metrics.to_px(candidate) <= self.available_width {
                if let Some(style) = self.space {
                    self.line.push(' ', style);
                }
                self.line_units += space_units;
            } else {
                self.finish_line();
            }
        }

        for (ch, style) in self.word.drain(..) {
            self.line.push(ch, style);
        }
        self.line_units += self.word_units;
        self.word_units = 0;
        self.space = None;
    }

    fn finish_line(&mut self) {
        let mut line = std::mem::take(&mut self.line);
        line.width = self.metrics.to_px(self.line_units);
        self.lines.push(line);
        self.line_units = 0;
        self.space = None;
    }

    fn force_break(&mut self) {
        self.flush_word();
        self.finish_line();
    }

    fn finish(mut self) -> Layout {
        self.flush_word();
        if !self.line.is_empty() {
            self.finish_line();
        }

        let width = self.lines.iter().map(|l| l.width).fold(0.0, f64::max);
        let height = self.lines.len() as f64 * self.metrics.line_height();
        Layout {
            lines: self.lines,
            width,
            height,
        }
    }
}

/// Lay out `nodes` into lines no wider than `available_width` pixels, except
/// for single words that do not fit on a line of their own.
pub fn layout<M: FontMetrics + ?Sized>(
    nodes: &[RenderNode],
    metrics: &M,
    available_width: f64,
) -> Layout {
    let mut items = Vec::new();
    collect_items(nodes, InlineStyle::default(), &mut items);

    let mut breaker = LineBreaker::new(metrics, available_width);
    for item in items {
        match item {
            Item::Char(ch, style) => breaker.push_char(ch, style),
            Item::Break => breaker.force_break(),
        }
    }
    breaker.finish()
}
