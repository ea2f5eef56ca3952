//! Board rendering: document state in, printable tree description out.

use colored::{Color, Colorize};
use termtree::Tree;

use crate::domain::{Address, Document, Node};

/// Builds the display tree for a whole board. Pure: reads the document,
/// renders nothing itself.
///
/// The root payload is never shown; the tree starts at its children,
/// labeled with `title` (typically the board file name).
pub fn render(document: &Document, title: &str, show_addresses: bool) -> Tree<String> {
    let leaves: Vec<Tree<String>> = document
        .root()
        .children()
        .map(|children| {
            children
                .iter()
                .enumerate()
                .map(|(index, child)| node_tree(child, &Address::root().child(index), show_addresses))
                .collect()
        })
        .unwrap_or_default();
    Tree::new(title.bold().to_string()).with_leaves(leaves)
}

fn node_tree(node: &Node, address: &Address, show_addresses: bool) -> Tree<String> {
    let label = label_for(node, address, show_addresses);
    match node.children() {
        None => Tree::new(label),
        Some(_) if node.data().folded => {
            let hidden = node.subtree_size() - 1;
            Tree::new(format!("{} {}", label, format!("[+{hidden}]").dimmed()))
        }
        Some(children) => {
            let leaves: Vec<Tree<String>> = children
                .iter()
                .enumerate()
                .map(|(index, child)| node_tree(child, &address.child(index), show_addresses))
                .collect();
            Tree::new(label).with_leaves(leaves)
        }
    }
}

fn label_for(node: &Node, address: &Address, show_addresses: bool) -> String {
    let data = node.data();
    let mut label = match data.color.as_deref() {
        Some(name) => data.text.color(Color::from(name)).to_string(),
        None => data.text.clone(),
    };
    if show_addresses {
        label.push(' ');
        label.push_str(&address.to_string().dimmed().to_string());
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NodeData;

    #[test]
    fn given_board_when_rendering_then_tree_lists_nodes_with_addresses() {
        let mut document = Document::new();
        document.append_child(&Address::root(), Node::leaf(NodeData::new("Backlog")));
        document.append_child(&Address::from([0]), Node::leaf(NodeData::new("first card")));

        let rendered = render(&document, "board.json", true).to_string();

        assert!(rendered.contains("board.json"));
        assert!(rendered.contains("Backlog"));
        assert!(rendered.contains("first card"));
        assert!(rendered.contains("0/0"));
    }

    #[test]
    fn given_folded_branch_when_rendering_then_children_are_hidden() {
        let mut document = Document::new();
        document.append_child(&Address::root(), Node::leaf(NodeData::new("Later")));
        document.append_child(&Address::from([0]), Node::leaf(NodeData::new("hidden card")));
        document
            .resolve_mut(&Address::from([0]))
            .expect("node exists")
            .data_mut()
            .folded = true;

        let rendered = render(&document, "board.json", false).to_string();

        assert!(rendered.contains("Later"));
        assert!(rendered.contains("[+1]"));
        assert!(!rendered.contains("hidden card"));
    }
}
