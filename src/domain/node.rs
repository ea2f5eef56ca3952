//! Board nodes and their payload.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::address::Address;
use crate::domain::siblings::SiblingList;

/// Payload carried by every node: display text plus presentation hints.
///
/// Payload content never influences tree structure or addressing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeData {
    /// Display text
    pub text: String,
    /// Terminal color name, e.g. "cyan"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Collapsed in rendered views
    #[serde(default, skip_serializing_if = "is_false")]
    pub folded: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl NodeData {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
            folded: false,
        }
    }

    pub fn with_color(text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: Some(color.into()),
            folded: false,
        }
    }
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Node in the board tree.
///
/// A `Leaf` has never been given children; a `Branch` owns a children
/// list, which may be empty. The two states are distinct and both
/// survive persistence round-trips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(NodeData),
    Branch {
        data: NodeData,
        children: SiblingList,
    },
}

impl Node {
    pub fn leaf(data: NodeData) -> Self {
        Node::Leaf(data)
    }

    pub fn branch(data: NodeData, children: SiblingList) -> Self {
        Node::Branch { data, children }
    }

    pub fn data(&self) -> &NodeData {
        match self {
            Node::Leaf(data) => data,
            Node::Branch { data, .. } => data,
        }
    }

    pub fn data_mut(&mut self) -> &mut NodeData {
        match self {
            Node::Leaf(data) => data,
            Node::Branch { data, .. } => data,
        }
    }

    /// Children list, or `None` for a leaf.
    pub fn children(&self) -> Option<&SiblingList> {
        match self {
            Node::Leaf(_) => None,
            Node::Branch { children, .. } => Some(children),
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut SiblingList> {
        match self {
            Node::Leaf(_) => None,
            Node::Branch { children, .. } => Some(children),
        }
    }

    /// Children list, promoting a leaf to a branch with an empty list.
    /// The list is created the first time a node is given children.
    pub fn ensure_children(&mut self) -> &mut SiblingList {
        if let Node::Leaf(data) = self {
            *self = Node::Branch {
                data: std::mem::take(data),
                children: SiblingList::new(),
            };
        }
        match self {
            Node::Branch { children, .. } => children,
            Node::Leaf(_) => unreachable!(),
        }
    }

    pub fn child_count(&self) -> usize {
        self.children().map_or(0, SiblingList::len)
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_size(&self) -> usize {
        1 + self
            .children()
            .map(|c| c.iter().map(Node::subtree_size).sum::<usize>())
            .unwrap_or(0)
    }

    /// Follows `address` downward through children lists. Pure traversal:
    /// an out-of-range index or a descent past a leaf is `None`, with no
    /// way to tell the two apart.
    pub fn descend(&self, address: &Address) -> Option<&Node> {
        address
            .iter()
            .try_fold(self, |node, index| node.children()?.get(index))
    }

    pub fn descend_mut(&mut self, address: &Address) -> Option<&mut Node> {
        address
            .iter()
            .try_fold(self, |node, index| node.children_mut()?.get_mut(index))
    }
}
