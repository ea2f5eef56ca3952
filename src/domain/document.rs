//! The board document: one owned tree, edited through addresses.

use std::cmp::Ordering;

use tracing::instrument;

use crate::domain::address::Address;
use crate::domain::node::{Node, NodeData};

/// Result of a structural edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    /// The addressed position does not resolve; the document is unchanged.
    NotFound,
}

impl EditOutcome {
    pub fn applied(self) -> bool {
        matches!(self, EditOutcome::Applied)
    }
}

/// Terminal outcome of a move. Anything but `Moved` leaves the document
/// structurally unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// Source and destination name the same position.
    SamePosition,
    /// The destination is the source or one of its descendants.
    IntoOwnSubtree,
    /// Source or destination does not resolve.
    NotFound,
}

impl MoveOutcome {
    pub fn applied(self) -> bool {
        matches!(self, MoveOutcome::Moved)
    }
}

/// A single board: the root node and the edit operations on it.
///
/// The root starts as a leaf and grows children on the first append. The
/// document is exclusively owned by one caller; renderers and stores read
/// it only between edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Node,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            root: Node::leaf(NodeData::default()),
        }
    }

    pub fn from_root(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Node at `address`, or `None`. The empty address is the root.
    #[instrument(level = "trace", skip(self))]
    pub fn resolve(&self, address: &Address) -> Option<&Node> {
        self.root.descend(address)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn resolve_mut(&mut self, address: &Address) -> Option<&mut Node> {
        self.root.descend_mut(address)
    }

    /// Appends `node` as the last child of the node at `parent`,
    /// promoting a leaf parent to a branch.
    #[instrument(level = "trace", skip(self, node))]
    pub fn append_child(&mut self, parent: &Address, node: Node) -> EditOutcome {
        match self.root.descend_mut(parent) {
            Some(target) => {
                target.ensure_children().push(node);
                EditOutcome::Applied
            }
            None => EditOutcome::NotFound,
        }
    }

    /// Inserts `node` so that it ends up at `address`; later siblings
    /// shift right, and an index past the end appends. The empty address
    /// names no insertable position.
    #[instrument(level = "trace", skip(self, node))]
    pub fn insert_node(&mut self, address: &Address, node: Node) -> EditOutcome {
        match self.try_insert(address, node) {
            Ok(()) => EditOutcome::Applied,
            Err(_) => EditOutcome::NotFound,
        }
    }

    /// Detaches and returns the subtree at `address`; `None` (and no
    /// change) if the address does not resolve to a removable node.
    #[instrument(level = "trace", skip(self))]
    pub fn remove_node(&mut self, address: &Address) -> Option<Node> {
        let (parent, index) = address.split_last()?;
        self.root.descend_mut(&parent)?.children_mut()?.remove(index)
    }

    /// Relocates the subtree at `source` so that it ends up at
    /// `destination`.
    ///
    /// Ordering of the two half-edits follows the depth-major comparison
    /// on the addresses. When the source sorts first, the removal lands
    /// first and the destination is read against the shrunk tree; when
    /// the destination sorts first, the insertion is sequenced ahead of
    /// the removal, which under single ownership is realized by detaching
    /// the subtree and compensating the destination for the shift the
    /// detachment caused.
    #[instrument(level = "debug", skip(self))]
    pub fn move_node(&mut self, source: &Address, destination: &Address) -> MoveOutcome {
        if source == destination {
            return MoveOutcome::SamePosition;
        }
        if source.contains(destination) {
            return MoveOutcome::IntoOwnSubtree;
        }

        let landing = if source.depth_major_cmp(destination) == Ordering::Less {
            destination.clone()
        } else {
            destination.adjusted_for_removal(source)
        };

        let Some(node) = self.remove_node(source) else {
            return MoveOutcome::NotFound;
        };
        match self.try_insert(&landing, node) {
            Ok(()) => MoveOutcome::Moved,
            Err(node) => {
                // Destination never resolved; put the subtree back where it
                // came from. The source's ancestors were untouched by the
                // removal, so this cannot fail.
                let _ = self.try_insert(source, node);
                MoveOutcome::NotFound
            }
        }
    }

    /// Depth-first traversal of every node, with its address.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            stack: vec![(Address::root(), &self.root)],
        }
    }

    /// Total number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.root.subtree_size()
    }

    pub fn depth(&self) -> usize {
        depth_of(&self.root)
    }

    fn try_insert(&mut self, address: &Address, node: Node) -> Result<(), Node> {
        let Some((parent, index)) = address.split_last() else {
            return Err(node);
        };
        match self.root.descend_mut(&parent) {
            Some(target) => {
                target.ensure_children().insert(index, node);
                Ok(())
            }
            None => Err(node),
        }
    }
}

fn depth_of(node: &Node) -> usize {
    1 + node
        .children()
        .map(|c| c.iter().map(depth_of).max().unwrap_or(0))
        .unwrap_or(0)
}

pub struct Nodes<'a> {
    stack: Vec<(Address, &'a Node)>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = (Address, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (address, node) = self.stack.pop()?;
        if let Some(children) = node.children() {
            // Push children in reverse order for left-to-right traversal
            let mut entries: Vec<(Address, &Node)> = children
                .iter()
                .enumerate()
                .map(|(index, child)| (address.child(index), child))
                .collect();
            entries.reverse();
            self.stack.extend(entries);
        }
        Some((address, node))
    }
}
