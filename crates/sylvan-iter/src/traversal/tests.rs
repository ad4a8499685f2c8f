use proptest::prelude::*;
use rstest::{fixture, rstest};

use super::*;
use crate::tests::support::{FakeNode, FakeTree};

/// ```text
/// root
/// ├── a
/// │   ├── a1
/// │   └── "("      (anonymous)
/// ├── ","          (anonymous)
/// │   └── x
/// └── b
///     └── b1
/// ```
#[fixture]
fn sample() -> FakeTree {
    let mut tree = FakeTree::new("root", true);
    let a = tree.add(0, "a", true);
    tree.add(a, "a1", true);
    tree.add(a, "(", false);
    let comma = tree.add(0, ",", false);
    tree.add(comma, "x", true);
    let b = tree.add(0, "b", true);
    tree.add(b, "b1", true);
    tree
}

fn labels<'t>(tree: &'t FakeTree, nodes: impl Iterator<Item = FakeNode<'t>>) -> Vec<&'t str> {
    nodes.map(|node| tree.label(node.id())).collect()
}

#[rstest]
#[case(TraversalMode::DepthFirst, false, &["root", "a", "a1", "(", ",", "x", "b", "b1"])]
#[case(TraversalMode::BreadthFirst, false, &["root", "a", ",", "b", "a1", "(", "x", "b1"])]
#[case(TraversalMode::DepthFirst, true, &["root", "a", "a1", "b", "b1"])]
#[case(TraversalMode::BreadthFirst, true, &["root", "a", "b", "a1", "b1"])]
fn visits_sample_tree_in_order(
    sample: FakeTree,
    #[case] mode: TraversalMode,
    #[case] named_only: bool,
    #[case] expected: &[&str],
) {
    let visited = labels(&sample, TreeIter::new(sample.root(), mode, named_only));
    assert_eq!(visited, expected);
}

#[rstest]
#[case(TraversalMode::DepthFirst)]
#[case(TraversalMode::BreadthFirst)]
fn childless_root_yields_only_itself(#[case] mode: TraversalMode) {
    let tree = FakeTree::new("leaf", true);
    let mut iter = TreeIter::new(tree.root(), mode, false);

    assert_eq!(iter.next(), Some(tree.root()));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next(), None);
}

#[test]
fn unnamed_root_is_still_visited_when_named_only() {
    let mut tree = FakeTree::new("ERROR", false);
    tree.add(0, "identifier", true);
    tree.add(0, ";", false);

    let visited = labels(&tree, TreeIter::new(tree.root(), TraversalMode::DepthFirst, true));
    assert_eq!(visited, ["ERROR", "identifier"]);
}

#[rstest]
fn unresolvable_child_slots_are_skipped(mut sample: FakeTree) {
    sample.overstate_children(0, 2);

    let visited = labels(&sample, TreeIter::new(sample.root(), TraversalMode::BreadthFirst, false));
    assert_eq!(visited, ["root", "a", ",", "b", "a1", "(", "x", "b1"]);
}

#[rstest]
#[case(TraversalMode::DepthFirst)]
#[case(TraversalMode::BreadthFirst)]
fn stopping_after_first_item_reads_no_children(sample: FakeTree, #[case] mode: TraversalMode) {
    let first: Vec<_> = TreeIter::new(sample.root(), mode, false).take(1).collect();

    assert_eq!(first, [sample.root()]);
    assert_eq!(sample.child_reads(), 0);
}

#[rstest]
fn stopping_early_expands_only_yielded_predecessors(sample: FakeTree) {
    // Pre-order: root(3 children), a(2 children), a1 <- stop here.
    let taken = labels(
        &sample,
        TreeIter::new(sample.root(), TraversalMode::DepthFirst, false).take(3),
    );

    assert_eq!(taken, ["root", "a", "a1"]);
    assert_eq!(sample.child_reads(), 5);
}

#[rstest]
fn new_iterator_restarts_from_scratch(sample: FakeTree) {
    let mut first = TreeIter::new(sample.root(), TraversalMode::DepthFirst, false);
    first.by_ref().take(4).for_each(drop);

    let fresh = labels(&sample, TreeIter::new(sample.root(), TraversalMode::DepthFirst, false));
    let rest = labels(&sample, first);
    assert_eq!(fresh, ["root", "a", "a1", "(", ",", "x", "b", "b1"]);
    assert_eq!(rest, [",", "x", "b", "b1"]);
}

#[rstest]
fn size_hint_tracks_queued_nodes(sample: FakeTree) {
    let mut iter = TreeIter::new(sample.root(), TraversalMode::BreadthFirst, false);
    assert_eq!(iter.size_hint(), (1, None));

    iter.next();
    assert_eq!(iter.size_hint(), (0, None));

    iter.next();
    assert_eq!(iter.size_hint(), (2, None));

    iter.by_ref().for_each(drop);
    assert_eq!(iter.size_hint(), (0, Some(0)));
}

#[test]
fn reports_its_settings() {
    let tree = FakeTree::new("root", true);
    let iter = TreeIter::new(tree.root(), TraversalMode::BreadthFirst, true);

    assert_eq!(iter.mode(), TraversalMode::BreadthFirst);
    assert!(iter.named_only());
}

#[rstest]
#[case("dfs", TraversalMode::DepthFirst)]
#[case("Depth-First", TraversalMode::DepthFirst)]
#[case(" depth_first ", TraversalMode::DepthFirst)]
#[case("BFS", TraversalMode::BreadthFirst)]
#[case("breadthfirst", TraversalMode::BreadthFirst)]
fn mode_names_parse(#[case] input: &str, #[case] expected: TraversalMode) {
    assert_eq!(input.parse::<TraversalMode>().ok(), Some(expected));
}

#[rstest]
#[case("inorder")]
#[case("")]
#[case("post-order")]
fn unknown_mode_names_are_rejected(#[case] input: &str) {
    let err = input
        .parse::<TraversalMode>()
        .expect_err("mode should be rejected");
    assert!(matches!(err, IterError::UnsupportedMode { mode } if mode == input.trim()));
}

#[test]
fn mode_display_round_trips() {
    for mode in [TraversalMode::DepthFirst, TraversalMode::BreadthFirst] {
        assert_eq!(mode.to_string().parse::<TraversalMode>().ok(), Some(mode));
    }
}

fn arbitrary_tree() -> impl Strategy<Value = FakeTree> {
    prop::collection::vec((any::<usize>(), any::<bool>()), 0..48)
        .prop_map(|seeds| FakeTree::from_parent_seeds(&seeds))
}

fn ids<'t>(iter: impl Iterator<Item = FakeNode<'t>>) -> Vec<usize> {
    iter.map(FakeNode::id).collect()
}

proptest! {
    #[test]
    fn depth_first_is_recursive_preorder(tree in arbitrary_tree()) {
        let visited = ids(TreeIter::new(tree.root(), TraversalMode::DepthFirst, false));
        prop_assert_eq!(visited, tree.preorder());
    }

    #[test]
    fn depth_first_visits_parents_before_descendants(tree in arbitrary_tree()) {
        let visited = ids(TreeIter::new(tree.root(), TraversalMode::DepthFirst, false));
        let mut position = vec![usize::MAX; tree.len()];
        for (at, id) in visited.iter().enumerate() {
            position[*id] = at;
        }
        for id in 1..tree.len() {
            let parent = tree.parent(id).unwrap_or(0);
            prop_assert!(position[parent] < position[id]);
        }
    }

    #[test]
    fn breadth_first_never_returns_to_a_shallower_level(tree in arbitrary_tree()) {
        let visited = ids(TreeIter::new(tree.root(), TraversalMode::BreadthFirst, false));
        prop_assert_eq!(visited.len(), tree.len());
        let depths: Vec<usize> = visited.iter().map(|id| tree.depth(*id)).collect();
        prop_assert!(depths.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn named_only_is_an_order_preserving_subsequence(
        tree in arbitrary_tree(),
        breadth_first in any::<bool>(),
    ) {
        let mode = if breadth_first {
            TraversalMode::BreadthFirst
        } else {
            TraversalMode::DepthFirst
        };
        let all = ids(TreeIter::new(tree.root(), mode, false));
        let named = ids(TreeIter::new(tree.root(), mode, true));

        let expected: Vec<usize> = all
            .into_iter()
            .filter(|id| tree.reachable_through_named(*id))
            .collect();
        prop_assert_eq!(named, expected);
    }

    #[test]
    fn taking_k_items_expands_only_the_first_k_minus_one(
        tree in arbitrary_tree(),
        k in 1usize..16,
    ) {
        let full: Vec<FakeNode<'_>> =
            TreeIter::new(tree.root(), TraversalMode::DepthFirst, false).collect();
        let expected_reads: usize = full
            .iter()
            .take(k.saturating_sub(1))
            .map(|node| node.child_count())
            .sum();

        tree.reset_child_reads();
        let taken = TreeIter::new(tree.root(), TraversalMode::DepthFirst, false)
            .take(k)
            .count();

        prop_assert_eq!(taken, k.min(tree.len()));
        prop_assert_eq!(tree.child_reads(), expected_reads);
    }
}
