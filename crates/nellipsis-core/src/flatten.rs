//! Flattening / length model
//!
//! Linearizes a working tree into addressable units: every element is a unit
//! of length 1, every text run a unit of its character length. Comments are
//! skipped. The sum of all unit lengths is the content length used by the
//! truncation search.

use indextree::NodeId;

use crate::arena::{WorkingNode, WorkingTree};
use crate::node::RenderNode;

/// Kind of a flattened unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Text,
    Element,
}

/// One addressable unit of a flattened tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatUnit {
    /// Node in the working tree this unit refers to
    pub id: NodeId,
    pub kind: UnitKind,
    /// Content offset at which this unit starts
    pub start_offset: usize,
    /// Character count for text, 1 for elements
    pub length: usize,
}

impl FlatUnit {
    /// Offset just past this unit
    pub fn end_offset(&self) -> usize {
        self.start_offset + self.length
    }

    pub fn is_text(&self) -> bool {
        self.kind == UnitKind::Text
    }
}

/// Flatten a working tree, depth-first pre-order.
pub fn flatten(tree: &WorkingTree) -> Vec<FlatUnit> {
    let mut units = Vec::new();
    let mut offset = 0;
    for id in tree.descendants() {
        let (kind, length) = match tree.node(id) {
            WorkingNode::Text(data) => (UnitKind::Text, data.chars().count()),
            WorkingNode::Element { .. } => (UnitKind::Element, 1),
            WorkingNode::Root | WorkingNode::Comment(_) => continue,
        };
        units.push(FlatUnit {
            id,
            kind,
            start_offset: offset,
            length,
        });
        offset += length;
    }
    units
}

/// Flatten a render forest by way of a fresh working tree
pub fn flatten_nodes(nodes: &[RenderNode]) -> (WorkingTree, Vec<FlatUnit>) {
    let tree = WorkingTree::from_nodes(nodes);
    let units = flatten(&tree);
    (tree, units)
}

/// Total length of a flattened sequence
pub fn total_length(units: &[FlatUnit]) -> usize {
    units.iter().map(|unit| unit.length).sum()
}

/// Index of the unit that straddles `offset`, searching from the end.
///
/// This is the last unit whose start offset is `<= offset`; `None` for an
/// empty sequence.
pub fn unit_at_offset(units: &[FlatUnit], offset: usize) -> Option<usize> {
    units.iter().rposition(|unit| unit.start_offset <= offset)
}
