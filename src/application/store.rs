//! Board persistence: JSON on disk, replaced atomically on save.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, instrument};

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::{Document, Node, NodeData};

/// On-disk shape of one node.
///
/// `children` is absent for a leaf and present (possibly empty) for a
/// branch, so the two states are distinguishable after a reload:
/// `None` means "never had children", not "empty list".
#[derive(Debug, Serialize, Deserialize)]
struct StoredNode {
    #[serde(flatten)]
    data: NodeData,
    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<Vec<StoredNode>>,
}

impl From<&Node> for StoredNode {
    fn from(node: &Node) -> Self {
        match node {
            Node::Leaf(data) => StoredNode {
                data: data.clone(),
                children: None,
            },
            Node::Branch { data, children } => StoredNode {
                data: data.clone(),
                children: Some(children.iter().map(StoredNode::from).collect()),
            },
        }
    }
}

impl From<StoredNode> for Node {
    fn from(stored: StoredNode) -> Self {
        match stored.children {
            None => Node::leaf(stored.data),
            Some(children) => Node::branch(
                stored.data,
                children.into_iter().map(Node::from).collect(),
            ),
        }
    }
}

/// Reads and parses the board at `path`.
#[instrument(level = "debug")]
pub fn load(path: &Path) -> ApplicationResult<Document> {
    let content = fs::read_to_string(path).map_err(|e| ApplicationError::ReadDocument {
        path: path.to_path_buf(),
        source: e,
    })?;
    let stored: StoredNode =
        serde_json::from_str(&content).map_err(|e| ApplicationError::MalformedDocument {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    debug!("loaded board from {}", path.display());
    Ok(Document::from_root(stored.into()))
}

/// Serializes `document` and atomically replaces the file at `path`.
///
/// The JSON is written to a temp file in the destination directory and
/// persisted over the target, so a crash mid-save never truncates an
/// existing board.
#[instrument(level = "debug", skip(document))]
pub fn save(path: &Path, document: &Document) -> ApplicationResult<()> {
    let stored = StoredNode::from(document.root());
    let json = serde_json::to_string_pretty(&stored).map_err(|e| {
        ApplicationError::WriteDocument {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let write_err = |message: String| ApplicationError::WriteDocument {
        path: path.to_path_buf(),
        message,
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| write_err(e.to_string()))?;
    tmp.write_all(json.as_bytes())
        .and_then(|_| tmp.write_all(b"\n"))
        .map_err(|e| write_err(e.to_string()))?;
    tmp.persist(path).map_err(|e| write_err(e.to_string()))?;
    debug!("saved board to {}", path.display());
    Ok(())
}
