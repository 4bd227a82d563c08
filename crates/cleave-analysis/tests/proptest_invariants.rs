use std::collections::BTreeSet;

use proptest::prelude::*;

use cleave_analysis::community::partition_girvan_newman;
use cleave_analysis::metrics::{
    approximate_betweenness, approximate_betweenness_parallel, bottom_up,
};
use cleave_analysis::predict::{PredictedEdge, evaluate, jaccard, path_score};
use cleave_analysis::traversal::explore;

use generators::*;

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    // Traversal
    #[test]
    fn parents_are_neighbors_one_level_closer(
        (g, root) in arb_graph_and_node(12, 30),
        depth in 0usize..6,
    ) {
        let tree = explore(&g, &root, depth).expect("root drawn from graph");
        for (node, parents) in tree.parent_map() {
            let d = tree.distance(node).expect("reached");
            let neighbors = g.sorted_neighbors(node).expect("in graph");
            for p in parents {
                prop_assert_eq!(tree.distance(p), Some(d - 1));
                prop_assert!(neighbors.contains(&p));
            }
        }
    }

    #[test]
    fn depth_bound_is_respected((g, root) in arb_graph_and_node(12, 30), depth in 0usize..6) {
        let tree = explore(&g, &root, depth).expect("root drawn from graph");
        prop_assert!(tree.distances().values().all(|&d| d <= depth));
        prop_assert_eq!(tree.distance(&root), Some(0));
    }

    // Betweenness
    #[test]
    fn credit_into_root_equals_reached_count((g, root) in arb_graph_and_node(12, 30), depth in 1usize..6) {
        let tree = explore(&g, &root, depth).expect("root drawn from graph");
        let credit = bottom_up(&tree);
        let into_root: f64 = credit.iter().filter(|(k, _)| k.touches(&root)).map(|(_, v)| v).sum();
        #[allow(clippy::cast_precision_loss)]
        let others = (tree.len() - 1) as f64;
        prop_assert!((into_root - others).abs() < 1e-9, "{} vs {}", into_root, others);
    }

    #[test]
    fn aggregate_is_half_the_per_source_sum(g in arb_graph(10, 25), depth in 1usize..5) {
        let total: f64 = approximate_betweenness(&g, depth).values().sum();
        let per_source: f64 = g
            .nodes()
            .map(|s| bottom_up(&explore(&g, s, depth).expect("in graph")).values().sum::<f64>())
            .sum();
        prop_assert!((total - per_source / 2.0).abs() < 1e-6);
    }

    #[test]
    fn parallel_agrees_with_sequential(g in arb_graph(12, 30), depth in 1usize..5) {
        let seq = approximate_betweenness(&g, depth);
        let par = approximate_betweenness_parallel(&g, depth);
        prop_assert_eq!(seq.keys().collect::<Vec<_>>(), par.keys().collect::<Vec<_>>());
        for (k, v) in &seq {
            prop_assert!((par[k] - v).abs() < 1e-9);
        }
    }

    // Partition
    #[test]
    fn partition_covers_every_node_once(g in arb_graph(12, 30), depth in 1usize..5) {
        let before = g.edges();
        let p = partition_girvan_newman(&g, depth);

        let mut seen: BTreeSet<String> = BTreeSet::new();
        for component in &p.components {
            for node in component {
                prop_assert!(seen.insert(node.clone()), "{} in two components", node);
            }
        }
        let all: BTreeSet<String> = g.nodes().map(str::to_string).collect();
        prop_assert_eq!(seen, all);
        prop_assert_eq!(g.edges(), before);
    }

    #[test]
    fn partition_is_deterministic(g in arb_graph(12, 30), depth in 1usize..5) {
        prop_assert_eq!(partition_girvan_newman(&g, depth), partition_girvan_newman(&g, depth));
    }

    // Link prediction
    #[test]
    fn path_score_is_stable_and_sorted((g, root) in arb_graph_and_node(12, 30), k in 1usize..5) {
        let a = path_score(&g, &root, k, 0.5).expect("valid input");
        let b = path_score(&g, &root, k, 0.5).expect("valid input");
        prop_assert_eq!(&a, &b);
        prop_assert!(a.len() <= k);
        let sorted = a.windows(2).all(|w| {
            w[0].score > w[1].score || (w[0].score == w[1].score && w[0].edge.target < w[1].edge.target)
        });
        prop_assert!(sorted);
    }

    #[test]
    fn jaccard_scores_lie_in_unit_interval((g, root) in arb_graph_and_node(12, 30)) {
        if let Ok(ranked) = jaccard(&g, &root, 1) {
            prop_assert!(ranked.iter().all(|s| (0.0..=1.0).contains(&s.score)));
            prop_assert!(ranked.iter().all(|s| !g.contains_edge(&root, &s.edge.target)));
        }
    }

    #[test]
    fn evaluate_stays_in_unit_interval(
        g in arb_graph(10, 20),
        raw in prop::collection::vec((0u8..12, 0u8..12), 1..10),
    ) {
        let predicted: Vec<PredictedEdge> = raw
            .into_iter()
            .map(|(a, b)| PredictedEdge::new(node_name(a), node_name(b)))
            .collect();
        let acc = evaluate(&predicted, &g).expect("non-empty");
        prop_assert!((0.0..=1.0).contains(&acc));
    }

    #[test]
    fn real_edges_evaluate_to_one(g in arb_graph(10, 20)) {
        let predicted: Vec<PredictedEdge> = g
            .edges()
            .into_iter()
            .map(|k| PredictedEdge::new(k.first(), k.second()))
            .collect();
        prop_assume!(!predicted.is_empty());
        prop_assert!((evaluate(&predicted, &g).expect("non-empty") - 1.0).abs() < f64::EPSILON);
    }
}
