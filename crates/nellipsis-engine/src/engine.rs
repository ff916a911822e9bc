//! The truncation search
//!
//! [`apply_truncation`] binary-searches the largest content length whose
//! truncation (indicator included) fits the surface, then commits that
//! truncation to the surface. Every candidate is rendered and measured once,
//! so a trigger costs O(log n) layout passes for n units of content.

use nellipsis_core::prelude::*;
use nellipsis_core::{content_length, markup, RenderNode};
use serde::Serialize;

use crate::boundary::CutPolicy;
use crate::measure::{is_overflowing, MeasureSurface};
use crate::options::{EllipsisOptions, Indicator};
use crate::search::try_numeric_binary_search;
use crate::truncate::{truncate_to, Truncation};

/// Outcome of one committed application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TruncationResult {
    /// Whether any content was dropped
    pub truncated: bool,
    /// Content length kept, indicator excluded; `None` when untruncated
    pub offset: Option<usize>,
    /// The unit at which the cut happened
    pub node: Option<RenderNode>,
    /// The committed render, indicator included
    pub content: Vec<RenderNode>,
    /// Content length of the source
    pub initial_length: usize,
}

impl TruncationResult {
    /// Result for content rendered as is
    pub fn untruncated(content: &[RenderNode]) -> Self {
        Self {
            truncated: false,
            offset: None,
            node: None,
            content: content.to_vec(),
            initial_length: content_length(content),
        }
    }

    fn from_truncation(truncation: Truncation) -> Self {
        let truncated = truncation.is_truncated();
        Self {
            truncated,
            offset: truncated.then(|| truncation.kept_length()),
            node: truncation.cut_node(),
            content: truncation.nodes(),
            initial_length: truncation.initial_length(),
        }
    }

    /// Committed render serialized as markup
    pub fn markup(&self) -> String {
        markup::serialize(&self.content)
    }
}

/// Truncate `max` units of `source` and append the indicator if anything was
/// dropped.
pub fn truncate_text(
    source: &[RenderNode],
    max: usize,
    policy: &CutPolicy,
    indicator: &Indicator,
) -> Truncation {
    let mut truncation = truncate_to(source, max, policy);
    truncation.append_indicator(indicator);
    truncation
}

/// Render the largest fitting truncation of `source` into `surface`.
///
/// Returns `Ok(None)` without touching the surface when it is not attached.
/// Inactive options render `source` untruncated. When not even the
/// indicator alone fits, an empty render is committed.
pub fn apply_truncation<S: MeasureSurface + ?Sized>(
    source: &[RenderNode],
    surface: &mut S,
    options: &EllipsisOptions,
) -> Result<Option<TruncationResult>> {
    if !surface.is_attached() {
        debug!("surface not attached, deferring truncation");
        return Ok(None);
    }

    if !options.active {
        surface.render(source);
        return Ok(Some(TruncationResult::untruncated(source)));
    }

    let initial_length = content_length(source);
    let policy = options.cut_policy();

    let best = try_numeric_binary_search(initial_length, |candidate| {
        let truncation = truncate_text(source, candidate, &policy, &options.indicator);
        surface.render(&truncation.nodes());
        let fits = !is_overflowing(surface)?;
        debug!("candidate {}/{} fits={}", candidate, initial_length, fits);
        Ok::<_, Error>(fits)
    })?;

    let result = match best {
        Some(max) => {
            let truncation = truncate_text(source, max, &policy, &options.indicator);
            surface.render(&truncation.nodes());
            TruncationResult::from_truncation(truncation)
        }
        None => {
            warn!(
                "Indicator {:?} does not fit the surface, rendering nothing",
                options.indicator.signature()
            );
            surface.render(&[]);
            TruncationResult {
                truncated: initial_length > 0,
                offset: (initial_length > 0).then_some(0),
                node: None,
                content: Vec::new(),
                initial_length,
            }
        }
    };

    info!(
        "truncation applied: truncated={} offset={:?} of {}",
        result.truncated, result.offset, initial_length
    );

    Ok(Some(result))
}
