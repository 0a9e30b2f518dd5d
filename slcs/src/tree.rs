use std::fmt;

use crate::arena::{Arena, ArenaId};
use crate::{Op, Pos};

/// Deepest node the builder accepts. Translation and rendering recurse once
/// per level, so this bounds their stack use.
pub const MAX_DEPTH: usize = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl ArenaId for NodeId {
    fn from_slot(slot: usize) -> Self {
        NodeId(slot)
    }

    fn slot(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    Op(Op),
    Prop(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Op(op) => fmt::Display::fmt(op, f),
            Value::Prop(prop) => f.write_str(prop),
        }
    }
}

/// A position in the syntax tree.
///
/// Unary operators only have a right child, binary operators have both and
/// propositions have none. A node without value and with only a left child is
/// a group introduced by a pair of parentheses.
#[derive(Clone, Debug, Default)]
pub struct Node {
    value: Option<Value>,
    left: Option<NodeId>,
    right: Option<NodeId>,
    // Only used to climb back up while building and to describe positions.
    parent: Option<NodeId>,
    depth: usize,
    pos: Option<Pos>,
}

impl Node {
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn op(&self) -> Option<Op> {
        match self.value {
            Some(Value::Op(op)) => Some(op),
            _ => None,
        }
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Distance from the root, which is at depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Where the token that gave this node its value (or opened its group) is.
    pub fn pos(&self) -> Option<Pos> {
        self.pos
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// The syntax tree of one formula, rooted at the implicit group around the
/// whole source.
pub struct SyntaxTree {
    nodes: Arena<NodeId, Node>,
}

impl SyntaxTree {
    pub(crate) fn new() -> Self {
        let mut nodes = Arena::default();
        nodes.alloc(Node::default());
        Self { nodes }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter()
    }

    /// The parent of `id`, the root being its own parent.
    pub(crate) fn parent_of(&self, id: NodeId) -> NodeId {
        self.nodes[id].parent().unwrap_or(self.root())
    }

    pub(crate) fn insert_left(&mut self, id: NodeId) -> NodeId {
        let left = self.alloc_child(id);
        self.nodes[id].left = Some(left);
        left
    }

    pub(crate) fn insert_right(&mut self, id: NodeId) -> NodeId {
        let right = self.alloc_child(id);
        self.nodes[id].right = Some(right);
        right
    }

    fn alloc_child(&mut self, parent: NodeId) -> NodeId {
        let depth = self.nodes[parent].depth + 1;
        self.nodes.alloc(Node { parent: Some(parent), depth, ..Node::default() })
    }

    pub(crate) fn set_pos(&mut self, id: NodeId, pos: Pos) {
        self.nodes[id].pos = Some(pos);
    }

    pub(crate) fn set_value(&mut self, id: NodeId, value: Value, pos: Pos) {
        let node = &mut self.nodes[id];
        debug_assert!(node.value.is_none(), "node {id:?} already has a value");
        node.value = Some(value);
        node.pos = Some(pos);
    }

    /// Describes where `id` is, e.g. `root/left/right`.
    pub fn path(&self, id: NodeId) -> String {
        let mut steps = Vec::new();
        let mut cur = id;
        while let Some(parent) = self.nodes[cur].parent() {
            steps.push(if self.nodes[parent].left == Some(cur) { "left" } else { "right" });
            cur = parent;
        }

        let mut path = String::from("root");
        for step in steps.iter().rev() {
            path.push('/');
            path.push_str(step);
        }
        path
    }

    fn fmt_node(&self, id: NodeId, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = &self.nodes[id];
        if node.is_leaf() {
            return match &node.value {
                Some(value) => fmt::Display::fmt(value, f),
                None => Ok(()),
            };
        }

        if let Some(value) = &node.value {
            fmt::Display::fmt(value, f)?;
        }
        f.write_str("[")?;
        if let Some(left) = node.left {
            self.fmt_node(left, f)?;
        }
        f.write_str(", ")?;
        if let Some(right) = node.right {
            self.fmt_node(right, f)?;
        }
        f.write_str("]")
    }
}

/// Renders the tree as `value[left, right]`, with leaves as their payload.
impl fmt::Display for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(self.root(), f)
    }
}
