//! Approximate edge betweenness via depth-bounded Brandes accumulation.
//!
//! # Overview
//!
//! Edge betweenness measures how many shortest paths cross an edge. Edges
//! between communities carry most of the traffic, so removing the highest
//! scoring edge first is the basis of the divisive partitioner.
//!
//! # Algorithm
//!
//! 1. For each source node `s`, build a bounded shortest-path tree with
//!    [`explore`](crate::traversal::bfs::explore).
//! 2. Walk the tree bottom-up (farthest nodes first). Every reached node
//!    starts with a label of 1. For each parent `p` of a node `v`, the edge
//!    `(v, p)` receives `label[v] / (paths[p] * |parents[v]|)` and `p`'s
//!    label grows by `label[v] / |parents[v]|`.
//! 3. Sum the per-source credits and halve the totals, since every
//!    undirected edge is credited once from each endpoint's side.
//!
//! Complexity: O(V * E) for the full loop, less when `max_depth` cuts the
//! trees short.
//!
//! # Output
//!
//! Returns an [`EdgeBetweenness`] keyed by canonical [`EdgeKey`]. Edges that
//! no tree ever reached are absent; callers treat absence as zero.
//!
//! # Reproducibility
//!
//! Scores are plain `f64` sums. The sequential version adds sources in
//! node-insertion order. The parallel version splits the sources into a
//! fixed number of contiguous chunks, sums each chunk in order and then
//! combines chunks in order, so its output does not depend on thread count
//! or scheduling. The two versions may differ from each other in the last
//! bits on large graphs because the summation trees differ.

use std::collections::BTreeMap;

use petgraph::graph::{EdgeIndex, NodeIndex};
use rayon::prelude::*;
use tracing::{debug, instrument};

use cleave_core::{EdgeKey, SocialGraph};

use crate::traversal::bfs::{ShortestPathTree, explore_from};

/// Per-edge credit from a single source.
pub type EdgeCredit = BTreeMap<EdgeKey, f64>;

/// Aggregated, halved betweenness over all sources.
pub type EdgeBetweenness = BTreeMap<EdgeKey, f64>;

/// Number of source chunks the parallel engine splits the node list into.
const PARALLEL_CHUNKS: usize = 32;

// ---------------------------------------------------------------------------
// Single-source credit pass
// ---------------------------------------------------------------------------

/// Distribute credit over the edges of one shortest-path tree.
///
/// Each `(v, p)` pair is visited exactly once, so a key is written at most
/// once per call; the map still accumulates to keep the merge rule uniform
/// with [`approximate_betweenness`].
#[must_use]
pub fn bottom_up(tree: &ShortestPathTree<'_>) -> EdgeCredit {
    let mut out = EdgeCredit::new();
    for (v, p, credit) in collect_credit(tree) {
        *out.entry(EdgeKey::new(tree.name(v), tree.name(p)))
            .or_insert(0.0) += credit;
    }
    out
}

/// Index-level credit pass: calls `emit(v, p, edge, credit)` once per tree edge.
#[allow(clippy::cast_precision_loss)]
fn credit_pass(
    tree: &ShortestPathTree<'_>,
    mut emit: impl FnMut(NodeIndex, NodeIndex, EdgeIndex, f64),
) {
    let order = tree.order();
    let Some(&max_idx) = order.iter().max() else {
        return;
    };

    let mut label: Vec<f64> = vec![0.0; max_idx.index() + 1];
    for &v in order {
        label[v.index()] = 1.0;
    }

    let root = tree.root_index();
    for &v in order.iter().rev() {
        if v == root {
            continue;
        }
        let parents = tree.parents_at(v);
        let fan_in = parents.len() as f64;
        let lv = label[v.index()];
        for &(p, e) in parents {
            let credit = lv / (tree.num_paths_at(p) as f64 * fan_in);
            emit(v, p, e, credit);
            label[p.index()] += lv / fan_in;
        }
    }
}

fn collect_credit(tree: &ShortestPathTree<'_>) -> Vec<(NodeIndex, NodeIndex, f64)> {
    let mut out = Vec::with_capacity(tree.len());
    credit_pass(tree, |v, p, _, credit| out.push((v, p, credit)));
    out
}

// ---------------------------------------------------------------------------
// Aggregation over all sources
// ---------------------------------------------------------------------------

/// Dense per-edge accumulator indexed by `EdgeIndex`. `None` = never credited.
type Accumulator = Vec<Option<f64>>;

fn accumulate_source(
    graph: &SocialGraph,
    source: NodeIndex,
    max_depth: usize,
    acc: &mut Accumulator,
) {
    let tree = explore_from(graph, source, max_depth);
    credit_pass(&tree, |_, _, e, credit| {
        let slot = &mut acc[e.index()];
        *slot = Some(slot.map_or(credit, |sum| sum + credit));
    });
}

fn merge_into(total: &mut Accumulator, partial: Accumulator) {
    for (slot, value) in total.iter_mut().zip(partial) {
        if let Some(v) = value {
            *slot = Some(slot.map_or(v, |sum| sum + v));
        }
    }
}

fn finish(graph: &SocialGraph, acc: Accumulator) -> EdgeBetweenness {
    acc.into_iter()
        .enumerate()
        .filter_map(|(i, sum)| {
            let sum = sum?;
            let key = graph.edge_key(EdgeIndex::new(i))?;
            Some((key, sum / 2.0))
        })
        .collect()
}

/// Approximate betweenness of every edge, sequentially.
///
/// Runs a bounded BFS and a credit pass from every node, sums the credits
/// per edge and halves the totals.
#[must_use]
#[instrument(skip(graph), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn approximate_betweenness(graph: &SocialGraph, max_depth: usize) -> EdgeBetweenness {
    let mut acc: Accumulator = vec![None; graph.edge_count()];
    for source in graph.as_petgraph().node_indices() {
        accumulate_source(graph, source, max_depth, &mut acc);
    }
    let out = finish(graph, acc);
    debug!(scored = out.len(), "approximate betweenness complete");
    out
}

/// Approximate betweenness of every edge, with the per-source passes spread
/// over the rayon thread pool.
///
/// The result is deterministic for a given graph; see the module docs for
/// how it may differ from [`approximate_betweenness`] in rounding.
#[must_use]
#[instrument(skip(graph), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn approximate_betweenness_parallel(graph: &SocialGraph, max_depth: usize) -> EdgeBetweenness {
    let sources: Vec<NodeIndex> = graph.as_petgraph().node_indices().collect();
    let edge_count = graph.edge_count();
    if sources.is_empty() {
        return EdgeBetweenness::new();
    }

    let chunk_size = sources.len().div_ceil(PARALLEL_CHUNKS);
    let partials: Vec<Accumulator> = sources
        .par_chunks(chunk_size)
        .map(|chunk| {
            let mut acc: Accumulator = vec![None; edge_count];
            for &source in chunk {
                accumulate_source(graph, source, max_depth, &mut acc);
            }
            acc
        })
        .collect();

    let mut total: Accumulator = vec![None; edge_count];
    for partial in partials {
        merge_into(&mut total, partial);
    }
    let out = finish(graph, total);
    debug!(
        scored = out.len(),
        chunk_size, "parallel approximate betweenness complete"
    );
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traversal::bfs::explore;

    fn example() -> SocialGraph {
        SocialGraph::from_edges([
            ("A", "B"),
            ("A", "C"),
            ("B", "C"),
            ("B", "D"),
            ("D", "E"),
            ("D", "F"),
            ("D", "G"),
            ("E", "F"),
            ("G", "F"),
        ])
    }

    fn get(map: &BTreeMap<EdgeKey, f64>, a: &str, b: &str) -> f64 {
        map[&EdgeKey::new(a, b)]
    }

    #[test]
    fn bottom_up_from_e() {
        let g = example();
        let tree = explore(&g, "E", 5).expect("E exists");
        let credit = bottom_up(&tree);

        let expected = [
            (("A", "B"), 1.0),
            (("B", "C"), 1.0),
            (("B", "D"), 3.0),
            (("D", "E"), 4.5),
            (("D", "G"), 0.5),
            (("E", "F"), 1.5),
            (("F", "G"), 0.5),
        ];
        assert_eq!(credit.len(), expected.len());
        for ((a, b), want) in expected {
            let got = get(&credit, a, b);
            assert!(
                (got - want).abs() < 1e-10,
                "({a}, {b}): got {got}, want {want}"
            );
        }
        assert!(
            !credit.contains_key(&EdgeKey::new("A", "C")),
            "A–C is not a tree edge"
        );
    }

    #[test]
    fn bottom_up_on_root_only_tree_is_empty() {
        let g = example();
        let tree = explore(&g, "A", 0).expect("A exists");
        assert!(bottom_up(&tree).is_empty());
    }

    #[test]
    fn depth_two_betweenness() {
        let g = example();
        let bc = approximate_betweenness(&g, 2);

        let expected = [
            (("A", "B"), 2.0),
            (("A", "C"), 1.0),
            (("B", "C"), 2.0),
            (("B", "D"), 6.0),
            (("D", "E"), 2.5),
            (("D", "F"), 2.0),
            (("D", "G"), 2.5),
            (("E", "F"), 1.5),
            (("F", "G"), 1.5),
        ];
        assert_eq!(bc.len(), expected.len());
        for ((a, b), want) in expected {
            let got = get(&bc, a, b);
            assert!(
                (got - want).abs() < 1e-10,
                "({a}, {b}): got {got}, want {want}"
            );
        }
    }

    #[test]
    fn chain_middle_edge_carries_most() {
        // A-B-C-D: exact betweenness (unbounded depth) is 3, 4, 3.
        let g = SocialGraph::from_edges([("A", "B"), ("B", "C"), ("C", "D")]);
        let bc = approximate_betweenness(&g, 10);
        assert!((get(&bc, "A", "B") - 3.0).abs() < 1e-10);
        assert!((get(&bc, "B", "C") - 4.0).abs() < 1e-10);
        assert!((get(&bc, "C", "D") - 3.0).abs() < 1e-10);
    }

    #[test]
    fn empty_graph_and_depth_zero_produce_nothing() {
        assert!(approximate_betweenness(&SocialGraph::new(), 3).is_empty());
        assert!(approximate_betweenness_parallel(&SocialGraph::new(), 3).is_empty());
        assert!(approximate_betweenness(&example(), 0).is_empty());
    }

    #[test]
    fn parallel_matches_sequential_on_example() {
        let g = example();
        for depth in 1..=5 {
            let seq = approximate_betweenness(&g, depth);
            let par = approximate_betweenness_parallel(&g, depth);
            assert_eq!(seq.len(), par.len());
            for (k, v) in &seq {
                assert!((par[k] - v).abs() < 1e-9, "depth {depth} edge {k}");
            }
        }
    }

    #[test]
    fn parallel_is_deterministic() {
        let g = example();
        let a = approximate_betweenness_parallel(&g, 3);
        let b = approximate_betweenness_parallel(&g, 3);
        assert_eq!(a, b);
    }
}
