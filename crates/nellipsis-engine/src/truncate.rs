//! Truncating a render forest to a candidate length
//!
//! [`truncate_to`] realizes one candidate of the search: it rebuilds a
//! working tree from the source, walks the flattened units backwards to the
//! unit that straddles the cut, snaps the cut to a permitted boundary and
//! removes everything after it.

use nellipsis_core::prelude::*;
use nellipsis_core::{
    flatten, total_length, unit_at_offset, NodeId, RenderNode, WorkingNode, WorkingTree,
};

use crate::boundary::CutPolicy;
use crate::options::Indicator;

/// A pruned working copy of the source forest.
#[derive(Debug, Clone)]
pub struct Truncation {
    tree: WorkingTree,
    /// Unit at which the cut happened
    cut: Option<NodeId>,
    kept_length: usize,
    initial_length: usize,
}

impl Truncation {
    /// Whether any content was dropped
    pub fn is_truncated(&self) -> bool {
        self.kept_length != self.initial_length
    }

    /// Content length left after pruning, indicator excluded
    pub fn kept_length(&self) -> usize {
        self.kept_length
    }

    /// Content length of the source forest
    pub fn initial_length(&self) -> usize {
        self.initial_length
    }

    /// Append `indicator` if content was dropped.
    ///
    /// Text indicators are glued onto the text unit where the cut happened;
    /// when the cut landed on an element they become a new trailing text
    /// unit. Tree indicators are appended after the kept content.
    pub fn append_indicator(&mut self, indicator: &Indicator) {
        if !self.is_truncated() {
            return;
        }

        let root = self.tree.root();
        match indicator {
            Indicator::Text(text) => match self.cut {
                Some(id) if matches!(self.tree.node(id), WorkingNode::Text(_)) => {
                    self.tree.push_text(id, text);
                }
                _ => self.tree.append_nodes(root, &[RenderNode::text(text.clone())]),
            },
            Indicator::Tree(nodes) => self.tree.append_nodes(root, nodes),
        }
    }

    /// The unit at which the cut happened, if content was dropped
    pub fn cut_node(&self) -> Option<RenderNode> {
        if !self.is_truncated() {
            return None;
        }
        self.cut.and_then(|id| self.tree.to_node(id))
    }

    /// Materialize the pruned forest
    pub fn nodes(&self) -> Vec<RenderNode> {
        self.tree.to_nodes()
    }
}

/// Prune a fresh copy of `source` to at most `max` content units.
///
/// The walk starts at the unit straddling `max` and moves backwards.
/// Text is cut at exactly `max` when `policy` is unrestricted. Otherwise the
/// cut moves backwards to the nearest accepted index above zero, dropping
/// the boundary character itself. A unit without such an index contributes
/// nothing and the walk continues into the previous unit, except for the
/// first unit, which is then kept empty.
pub fn truncate_to(source: &[RenderNode], max: usize, policy: &CutPolicy) -> Truncation {
    let mut tree = WorkingTree::from_nodes(source);
    let units = flatten(&tree);
    let initial_length = total_length(&units);

    let straddling = unit_at_offset(&units, max).map_or(0, |index| index + 1);
    let mut found = None;
    for (index, unit) in units[..straddling].iter().enumerate().rev() {
        let offset = unit.start_offset;
        if unit.is_text() {
            let cut = max - offset;
            if policy.is_unrestricted() {
                tree.truncate_text(unit.id, cut);
            } else if cut != unit.length {
                let text = tree.text(unit.id).unwrap_or_default();
                let keep = match cut {
                    0 => Some(0),
                    _ => policy.last_cut_before(text, cut),
                };
                match keep {
                    Some(keep) => tree.truncate_text(unit.id, keep),
                    None if offset > 0 => continue,
                    None => tree.truncate_text(unit.id, 0),
                }
            }
        }

        found = Some(index);
        break;
    }

    let first_removed = found.map_or(0, |index| index + 1);
    for unit in &units[first_removed..] {
        match tree.parent(unit.id) {
            Some(parent)
                if parent != tree.root()
                    && tree.child_count(parent) == 1
                    && tree.has_text(unit.id) =>
            {
                tree.remove(parent)
            }
            _ => tree.remove(unit.id),
        }
    }

    let kept_length = total_length(&flatten(&tree));
    trace!(
        "truncate_to({}) kept {} of {} units",
        max,
        kept_length,
        initial_length
    );

    Truncation {
        tree,
        cut: found.map(|index| units[index].id),
        kept_length,
        initial_length,
    }
}
