//! Tests for subtree relocation and its safety rules

use rstest::rstest;

use treedo::domain::{Address, Document, MoveOutcome, Node, NodeData};
use treedo::util::testing::init_test_setup;

fn leaf(text: &str) -> Node {
    Node::leaf(NodeData::new(text))
}

fn child_texts(document: &Document, parent: &Address) -> Vec<String> {
    document
        .resolve(parent)
        .and_then(Node::children)
        .map(|children| children.iter().map(|n| n.data().text.clone()).collect())
        .unwrap_or_default()
}

/// Root children [c0, c1]; c0 holds [l0, l1]; c1 holds [m0].
fn nested_board() -> Document {
    let mut document = Document::new();
    document.append_child(&Address::root(), leaf("c0"));
    document.append_child(&Address::root(), leaf("c1"));
    document.append_child(&Address::from([0]), leaf("l0"));
    document.append_child(&Address::from([0]), leaf("l1"));
    document.append_child(&Address::from([1]), leaf("m0"));
    document
}

/// Root children [a, b, c], all leaves.
fn flat_board() -> Document {
    let mut document = Document::new();
    for text in ["a", "b", "c"] {
        document.append_child(&Address::root(), leaf(text));
    }
    document
}

// ============================================================
// Rejected and no-op moves
// ============================================================

#[test]
fn given_identical_addresses_when_moving_then_same_position_and_unchanged() {
    init_test_setup();
    let mut document = nested_board();
    let before = document.clone();

    let outcome = document.move_node(&Address::from([0, 1]), &Address::from([0, 1]));

    assert_eq!(outcome, MoveOutcome::SamePosition);
    assert_eq!(document, before);
}

#[test]
fn given_destination_inside_source_when_moving_then_rejected_and_unchanged() {
    let mut document = nested_board();
    let before = document.clone();

    let outcome = document.move_node(&Address::from([0]), &Address::from([0, 1]));

    assert_eq!(outcome, MoveOutcome::IntoOwnSubtree);
    assert_eq!(document, before);
}

#[test]
fn given_root_source_when_moving_then_rejected() {
    let mut document = nested_board();
    let before = document.clone();

    let outcome = document.move_node(&Address::root(), &Address::from([1]));

    assert_eq!(outcome, MoveOutcome::IntoOwnSubtree);
    assert_eq!(document, before);
}

#[test]
fn given_missing_source_when_moving_then_not_found_and_unchanged() {
    let mut document = nested_board();
    let before = document.clone();

    let outcome = document.move_node(&Address::from([4]), &Address::from([0]));

    assert_eq!(outcome, MoveOutcome::NotFound);
    assert_eq!(document, before);
}

#[test]
fn given_missing_destination_when_moving_then_source_is_restored() {
    let mut document = nested_board();
    let before = document.clone();

    let outcome = document.move_node(&Address::from([0]), &Address::from([7, 0]));

    assert_eq!(outcome, MoveOutcome::NotFound);
    assert_eq!(document, before);
}

// ============================================================
// Sibling reorders
// ============================================================

#[test]
fn given_first_sibling_when_moving_to_last_index_then_lands_at_tail() {
    let mut document = flat_board();

    let outcome = document.move_node(&Address::from([0]), &Address::from([2]));

    assert_eq!(outcome, MoveOutcome::Moved);
    assert_eq!(child_texts(&document, &Address::root()), vec!["b", "c", "a"]);
}

#[test]
fn given_last_sibling_when_moving_to_front_then_lands_first() {
    let mut document = flat_board();

    let outcome = document.move_node(&Address::from([2]), &Address::from([0]));

    assert_eq!(outcome, MoveOutcome::Moved);
    assert_eq!(child_texts(&document, &Address::root()), vec!["c", "a", "b"]);
}

#[test]
fn given_middle_sibling_when_moving_to_front_then_others_shift_right() {
    let mut document = flat_board();

    let outcome = document.move_node(&Address::from([1]), &Address::from([0]));

    assert_eq!(outcome, MoveOutcome::Moved);
    assert_eq!(child_texts(&document, &Address::root()), vec!["b", "a", "c"]);
}

// ============================================================
// Moves across depths
// ============================================================

#[test]
fn given_column_when_moving_into_following_sibling_then_becomes_its_first_child() {
    let mut document = nested_board();

    let outcome = document.move_node(&Address::from([0]), &Address::from([1, 0]));

    assert_eq!(outcome, MoveOutcome::Moved);
    assert_eq!(child_texts(&document, &Address::root()), vec!["c1"]);
    assert_eq!(child_texts(&document, &Address::from([0])), vec!["c0", "m0"]);
    // The subtree moved intact.
    assert_eq!(
        child_texts(&document, &Address::from([0, 0])),
        vec!["l0", "l1"]
    );
}

#[test]
fn given_nested_card_when_moving_up_to_parent_level_then_slots_before_old_parent() {
    let mut document = nested_board();

    let outcome = document.move_node(&Address::from([1, 0]), &Address::from([1]));

    assert_eq!(outcome, MoveOutcome::Moved);
    assert_eq!(
        child_texts(&document, &Address::root()),
        vec!["c0", "m0", "c1"]
    );
    let emptied = document.resolve(&Address::from([2])).unwrap();
    assert_eq!(emptied.child_count(), 0);
}

#[test]
fn given_card_when_moving_into_earlier_column_then_earlier_path_is_kept() {
    let mut document = nested_board();

    let outcome = document.move_node(&Address::from([1, 0]), &Address::from([0, 1]));

    assert_eq!(outcome, MoveOutcome::Moved);
    assert_eq!(
        child_texts(&document, &Address::from([0])),
        vec!["l0", "m0", "l1"]
    );
    assert!(child_texts(&document, &Address::from([1])).is_empty());
}

#[test]
fn given_move_when_payload_carries_presentation_then_it_travels_along() {
    let mut document = Document::new();
    document.append_child(&Address::root(), leaf("col"));
    document.append_child(
        &Address::root(),
        Node::leaf(NodeData::with_color("hot", "red")),
    );
    document
        .resolve_mut(&Address::from([1]))
        .unwrap()
        .data_mut()
        .folded = true;

    document.move_node(&Address::from([1]), &Address::from([0, 0]));

    let moved = document.resolve(&Address::from([0, 0])).unwrap();
    assert_eq!(moved.data().color.as_deref(), Some("red"));
    assert!(moved.data().folded);
}

// ============================================================
// Conservation
// ============================================================

#[rstest]
#[case(&[0], &[2])]
#[case(&[2], &[0])]
#[case(&[0], &[1, 0])]
#[case(&[1, 0], &[1])]
#[case(&[1, 0], &[0, 1])]
#[case(&[0, 1], &[1, 1])]
#[case(&[1], &[0, 0])]
fn given_valid_move_when_applied_then_node_count_is_preserved(
    #[case] source: &[usize],
    #[case] destination: &[usize],
) {
    let mut document = nested_board();
    let count_before = document.node_count();

    let outcome = document.move_node(
        &Address::from(source.to_vec()),
        &Address::from(destination.to_vec()),
    );

    assert_eq!(outcome, MoveOutcome::Moved);
    assert_eq!(document.node_count(), count_before);
}

#[rstest]
#[case(&[0], &[0])]
#[case(&[0], &[0, 0])]
#[case(&[9], &[0])]
#[case(&[0], &[9, 9])]
fn given_absorbed_outcome_when_moving_then_document_is_deeply_unchanged(
    #[case] source: &[usize],
    #[case] destination: &[usize],
) {
    let mut document = nested_board();
    let before = document.clone();

    let outcome = document.move_node(
        &Address::from(source.to_vec()),
        &Address::from(destination.to_vec()),
    );

    assert!(!outcome.applied());
    assert_eq!(document, before);
}
