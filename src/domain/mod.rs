//! Domain layer: the board tree and its addressing
//!
//! This layer is independent of external concerns (no I/O, no CLI, no
//! config loading).

pub mod address;
pub mod document;
pub mod node;
pub mod siblings;

pub use address::{Address, AddressParseError};
pub use document::{Document, EditOutcome, MoveOutcome};
pub use node::{Node, NodeData};
pub use siblings::SiblingList;
