//! Disposable working copy of a render forest
//!
//! Every truncation attempt rebuilds a [`WorkingTree`] from the immutable
//! source forest, prunes it, and materializes the result with
//! [`WorkingTree::to_nodes`]. Nothing is ever patched back into the source,
//! so there is no undo step between attempts.

use indextree::{Arena, NodeId};

use crate::node::{ElementUnit, RenderNode, TextUnit};

/// Payload of an arena node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkingNode {
    /// Synthetic container holding the top-level forest
    Root,
    Text(String),
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },
    Comment(String),
}

/// Arena-backed mutable copy of a render forest.
#[derive(Debug, Clone)]
pub struct WorkingTree {
    arena: Arena<WorkingNode>,
    root: NodeId,
}

impl WorkingTree {
    /// Build a working tree from a source forest
    pub fn from_nodes(nodes: &[RenderNode]) -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(WorkingNode::Root);
        let mut tree = Self { arena, root };
        tree.append_nodes(root, nodes);
        tree
    }

    /// The synthetic root
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Payload of a node
    pub fn node(&self, id: NodeId) -> &WorkingNode {
        self.arena[id].get()
    }

    /// Parent of a node; `None` for the root and for removed nodes
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena[id].parent()
    }

    /// Children of a node in order
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.children(&self.arena)
    }

    /// Number of children of a node
    pub fn child_count(&self, id: NodeId) -> usize {
        id.children(&self.arena).count()
    }

    /// All nodes still attached below the root, depth-first pre-order,
    /// excluding the root itself
    pub fn descendants(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.root.descendants(&self.arena).skip(1)
    }

    /// Whether the node is still reachable from the root
    pub fn is_attached(&self, id: NodeId) -> bool {
        id == self.root || id.ancestors(&self.arena).any(|ancestor| ancestor == self.root)
    }

    /// Character data of a text node
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.arena[id].get() {
            WorkingNode::Text(data) => Some(data),
            _ => None,
        }
    }

    /// Whether the node or any node below it holds non-empty text
    pub fn has_text(&self, id: NodeId) -> bool {
        id.descendants(&self.arena)
            .any(|node| matches!(self.arena[node].get(), WorkingNode::Text(data) if !data.is_empty()))
    }

    /// Keep only the first `chars` characters of a text node.
    ///
    /// Does nothing for non-text nodes or when the text is already shorter.
    pub fn truncate_text(&mut self, id: NodeId, chars: usize) {
        if let WorkingNode::Text(data) = self.arena[id].get_mut() {
            if let Some((byte_index, _)) = data.char_indices().nth(chars) {
                data.truncate(byte_index);
            }
        }
    }

    /// Append characters to a text node
    pub fn push_text(&mut self, id: NodeId, suffix: &str) {
        if let WorkingNode::Text(data) = self.arena[id].get_mut() {
            data.push_str(suffix);
        }
    }

    /// Detach a node (and its subtree) from the tree
    pub fn remove(&mut self, id: NodeId) {
        id.detach(&mut self.arena);
    }

    /// Append copies of `nodes` as the last children of `parent`
    pub fn append_nodes(&mut self, parent: NodeId, nodes: &[RenderNode]) {
        for node in nodes {
            let (payload, children) = match node {
                RenderNode::Text(unit) => (WorkingNode::Text(unit.data.clone()), &[][..]),
                RenderNode::Comment { data } => (WorkingNode::Comment(data.clone()), &[][..]),
                RenderNode::Element(element) => (
                    WorkingNode::Element {
                        tag: element.tag.clone(),
                        attributes: element.attributes.clone(),
                    },
                    element.children.as_slice(),
                ),
            };
            let id = self.arena.new_node(payload);
            parent.append(id, &mut self.arena);
            self.append_nodes(id, children);
        }
    }

    /// Materialize the attached part of the tree as a render forest
    pub fn to_nodes(&self) -> Vec<RenderNode> {
        self.materialize_children(self.root)
    }

    /// Materialize a single attached node and its subtree
    pub fn to_node(&self, id: NodeId) -> Option<RenderNode> {
        match self.arena[id].get() {
            WorkingNode::Root => None,
            WorkingNode::Text(data) => Some(RenderNode::Text(TextUnit { data: data.clone() })),
            WorkingNode::Comment(data) => Some(RenderNode::comment(data.clone())),
            WorkingNode::Element { tag, attributes } => Some(RenderNode::Element(ElementUnit {
                tag: tag.clone(),
                attributes: attributes.clone(),
                children: self.materialize_children(id),
            })),
        }
    }

    fn materialize_children(&self, id: NodeId) -> Vec<RenderNode> {
        id.children(&self.arena)
            .filter_map(|child| self.to_node(child))
            .collect()
    }
}
