//! Word boundary and cut predicate resolution
//!
//! A cut point inside a text unit is valid when the character at that index
//! is a configured boundary character and the optional [`MayTruncateAt`]
//! predicate accepts it. An empty boundary set accepts any character.

use std::fmt;
use std::sync::Arc;

use nellipsis_core::prelude::*;
use regex::Regex;

// ─────────────────────────────────────────────────────────────────────────────
// WordBoundaries
// ─────────────────────────────────────────────────────────────────────────────

/// Set of characters at which text may be truncated.
#[derive(Debug, Clone, Default)]
pub struct WordBoundaries {
    raw: String,
    /// `None` means any character is a boundary
    class: Option<Regex>,
}

impl WordBoundaries {
    /// Build a boundary set from a raw string where every character is a
    /// boundary. Characters with a meaning inside a character class are
    /// escaped.
    pub fn new(chars: &str) -> Self {
        if chars.is_empty() {
            return Self::default();
        }

        let pattern = format!("[{}]", regex::escape(chars));
        match Regex::new(&pattern) {
            Ok(class) => Self {
                raw: chars.to_string(),
                class: Some(class),
            },
            Err(e) => {
                warn!(
                    "Ignoring word boundaries {:?}, pattern {:?} failed to compile: {}",
                    chars, pattern, e
                );
                Self::default()
            }
        }
    }

    /// Whether no boundary restriction applies
    pub fn is_any(&self) -> bool {
        self.class.is_none()
    }

    /// The configured boundary characters
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether `ch` is a boundary character
    pub fn contains(&self, ch: char) -> bool {
        match &self.class {
            Some(class) => {
                let mut buf = [0u8; 4];
                class.is_match(ch.encode_utf8(&mut buf))
            }
            None => true,
        }
    }
}

impl PartialEq for WordBoundaries {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// MayTruncateAt
// ─────────────────────────────────────────────────────────────────────────────

/// Caller supplied predicate deciding whether a text unit may be cut at a
/// character index: `(unit_text, char_index) -> bool`.
#[derive(Clone)]
pub struct MayTruncateAt(Arc<dyn Fn(&str, usize) -> bool + Send + Sync>);

impl MayTruncateAt {
    pub fn new(predicate: impl Fn(&str, usize) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(predicate))
    }

    pub fn accepts(&self, text: &str, index: usize) -> bool {
        (self.0)(text, index)
    }
}

impl fmt::Debug for MayTruncateAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MayTruncateAt(..)")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// CutPolicy
// ─────────────────────────────────────────────────────────────────────────────

/// Boundary set and predicate combined.
#[derive(Debug, Clone, Default)]
pub struct CutPolicy {
    boundaries: WordBoundaries,
    predicate: Option<MayTruncateAt>,
}

impl CutPolicy {
    pub fn new(boundaries: WordBoundaries, predicate: Option<MayTruncateAt>) -> Self {
        Self {
            boundaries,
            predicate,
        }
    }

    /// True when text may be cut at any character
    pub fn is_unrestricted(&self) -> bool {
        self.boundaries.is_any() && self.predicate.is_none()
    }

    /// Whether `text` may be cut at char index `index`.
    ///
    /// Both the boundary set and the predicate must accept. Indices past the
    /// end of the text are never boundary characters.
    pub fn accepts(&self, text: &str, index: usize) -> bool {
        if !self.boundaries.is_any() {
            match text.chars().nth(index) {
                Some(ch) if self.boundaries.contains(ch) => {}
                _ => return false,
            }
        }

        match &self.predicate {
            Some(predicate) => predicate.accepts(text, index),
            None => true,
        }
    }

    /// Largest index in `1..cut` at which `text` may be cut.
    ///
    /// Decodes `text` once, so one scan is linear in `cut`.
    pub fn last_cut_before(&self, text: &str, cut: usize) -> Option<usize> {
        let chars: Vec<char> = text.chars().take(cut).collect();
        (1..chars.len()).rev().find(|&index| {
            self.boundaries.contains(chars[index])
                && self
                    .predicate
                    .as_ref()
                    .map_or(true, |predicate| predicate.accepts(text, index))
        })
    }

    pub fn boundaries(&self) -> &WordBoundaries {
        &self.boundaries
    }
}
