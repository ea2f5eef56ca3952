//! treedo: outline and kanban boards as addressable trees.
//!
//! A board is a single tree of nodes; every node is reachable through an
//! [`Address`] of sibling positions, and all edits (insert, remove,
//! append, move) are expressed in addresses. The [`domain`] module holds
//! the tree model and the move-safety rules, [`application`] persists
//! boards as JSON, and [`cli`] is the terminal front end.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{Address, Document, EditOutcome, MoveOutcome, Node, NodeData, SiblingList};
