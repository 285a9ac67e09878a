//! Property tests for forest invariants under random edit sequences.

use std::collections::HashSet;

use builder_core::{palette, BuilderStore, ElementKind, MoveTarget};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Edit {
    Add { kind: usize, parent: Option<usize> },
    Duplicate(usize),
    Delete(usize),
    Move { node: usize, target: Option<usize>, index: usize },
    Undo,
    Redo,
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        4 => (0..ElementKind::ALL.len(), proptest::option::of(any::<usize>()))
            .prop_map(|(kind, parent)| Edit::Add { kind, parent }),
        1 => any::<usize>().prop_map(Edit::Duplicate),
        1 => any::<usize>().prop_map(Edit::Delete),
        2 => (any::<usize>(), proptest::option::of(any::<usize>()), 0..5usize)
            .prop_map(|(node, target, index)| Edit::Move { node, target, index }),
        1 => Just(Edit::Undo),
        1 => Just(Edit::Redo),
    ]
}

fn current_ids(store: &BuilderStore) -> Vec<String> {
    store
        .current_page()
        .map(|page| page.elements().iter().map(|n| n.id.to_string()).collect())
        .unwrap_or_default()
}

fn pick(ids: &[String], n: usize) -> Option<&str> {
    if ids.is_empty() {
        None
    } else {
        Some(ids[n % ids.len()].as_str())
    }
}

fn run(store: &mut BuilderStore, edit: &Edit) {
    let ids = current_ids(store);
    match edit {
        Edit::Add { kind, parent } => {
            let parent = parent.and_then(|n| pick(&ids, n));
            store
                .add_element(palette::new_element(ElementKind::ALL[*kind]), parent)
                .expect("adding under an existing parent succeeds");
        }
        Edit::Duplicate(n) => {
            if let Some(id) = pick(&ids, *n) {
                store.duplicate_element(id).expect("duplicate existing");
            }
        }
        Edit::Delete(n) => {
            if let Some(id) = pick(&ids, *n) {
                store.delete_element(id).expect("delete existing");
            }
        }
        Edit::Move { node, target, index } => {
            if let Some(id) = pick(&ids, *node) {
                let target = match target.and_then(|n| pick(&ids, n)) {
                    Some(target) => MoveTarget::from(target),
                    None => MoveTarget::Root,
                };
                // Moves into the node's own subtree are rejected; that is
                // covered by the invariant check below.
                let _ = store.move_element(id, &target, *index);
            }
        }
        Edit::Undo => {
            store.undo();
        }
        Edit::Redo => {
            store.redo();
        }
    }
}

fn assert_forest_invariants(store: &BuilderStore) {
    let mut all_ids = HashSet::new();
    for page in store.pages() {
        let forest = page.elements();
        let visited: Vec<_> = forest.iter().collect();
        assert_eq!(visited.len(), forest.len(), "every node reachable once");

        for node in &visited {
            assert!(all_ids.insert(node.id.clone()), "id {} reused", node.id);
            let siblings = forest
                .children_of(node.parent.as_ref().map(|p| p.as_str()))
                .expect("parent exists");
            assert_eq!(
                siblings.iter().filter(|s| **s == node.id).count(),
                1,
                "{} listed once under its parent",
                node.id
            );
            for child in &node.children {
                let child_node = forest.get(child.as_str()).expect("child exists");
                assert_eq!(child_node.parent.as_ref(), Some(&node.id));
            }
        }
        for root in forest.roots() {
            assert!(forest.get(root.as_str()).expect("root").parent.is_none());
        }
    }
    if let Some(selected) = store.selected_element_id() {
        assert!(store.element(selected.as_str()).is_some());
    }
}

proptest! {
    #[test]
    fn adds_always_produce_unique_ids(
        adds in proptest::collection::vec(
            (0..ElementKind::ALL.len(), proptest::option::of(any::<usize>())),
            1..40,
        )
    ) {
        let mut store = BuilderStore::new();
        for (kind, parent) in &adds {
            run(&mut store, &Edit::Add { kind: *kind, parent: *parent });
        }
        let ids = current_ids(&store);
        let unique: HashSet<_> = ids.iter().collect();
        prop_assert_eq!(ids.len(), adds.len());
        prop_assert_eq!(unique.len(), adds.len());
    }

    #[test]
    fn random_edits_keep_a_strict_forest(
        edits in proptest::collection::vec(edit_strategy(), 1..60)
    ) {
        let mut store = BuilderStore::new();
        for edit in &edits {
            run(&mut store, edit);
            assert_forest_invariants(&store);
        }
    }
}
