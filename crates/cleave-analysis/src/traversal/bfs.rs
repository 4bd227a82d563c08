//! Depth-bounded single-source shortest-path trees.
//!
//! # Overview
//!
//! [`explore`] runs a level-order BFS from a root and records, for every
//! node reachable within `max_depth` hops:
//!
//! - its distance from the root,
//! - its set of parents (the neighbors one level closer to the root),
//! - its path count: 1 for the root, otherwise the number of parents.
//!
//! # Algorithm
//!
//! The frontier is a FIFO queue of `(node, level)` pairs. A node's distance
//! is fixed the first time it is reached and it is enqueued exactly once.
//! When a node `u` at level `L` is dequeued, each neighbor `v` either:
//!
//! 1. has no distance yet → distance `L + 1`, parent `u`, enqueue; or
//! 2. already sits at distance `L + 1` → gains `u` as an additional parent.
//!
//! Neighbors at distance `≤ L` are ignored. As soon as a dequeued node's
//! level reaches `max_depth` the search stops, so nodes first reachable
//! beyond the bound never enter any of the output maps.
//!
//! The path count is the parent count, not the sum of the parents' path
//! counts. The betweenness credit pass and the path score both rely on it.

use std::collections::{BTreeMap, VecDeque};

use petgraph::{
    graph::{EdgeIndex, NodeIndex},
    visit::EdgeRef,
};

use cleave_core::{GraphError, SocialGraph};

// ---------------------------------------------------------------------------
// ShortestPathTree
// ---------------------------------------------------------------------------

/// Result of one bounded BFS: distances, parents and path counts for the
/// nodes reached within the depth bound.
///
/// Absence is meaningful: a node missing from the tree is unreachable
/// within the bound, never "distance zero" or "infinite".
#[derive(Debug, Clone)]
pub struct ShortestPathTree<'g> {
    graph: &'g SocialGraph,
    root: NodeIndex,
    /// Indexed by `NodeIndex::index()`; `None` = not reached.
    distance: Vec<Option<usize>>,
    /// Parent node and the edge leading to it, per reached node.
    parents: Vec<Vec<(NodeIndex, EdgeIndex)>>,
    /// Reached nodes in discovery order (non-decreasing distance).
    order: Vec<NodeIndex>,
}

/// Run a BFS from `root`, stopping after `max_depth` levels.
///
/// # Errors
///
/// Returns [`GraphError::NodeNotFound`] if `root` is not in `graph`.
pub fn explore<'g>(
    graph: &'g SocialGraph,
    root: &str,
    max_depth: usize,
) -> Result<ShortestPathTree<'g>, GraphError> {
    let root = graph.require(root)?;
    Ok(explore_from(graph, root, max_depth))
}

/// Index-based entry point used by the all-sources loops.
pub(crate) fn explore_from(
    graph: &SocialGraph,
    root: NodeIndex,
    max_depth: usize,
) -> ShortestPathTree<'_> {
    let g = graph.as_petgraph();
    let n = g.node_count();

    let mut distance: Vec<Option<usize>> = vec![None; n];
    let mut parents: Vec<Vec<(NodeIndex, EdgeIndex)>> = vec![Vec::new(); n];
    let mut order: Vec<NodeIndex> = Vec::new();
    let mut queue: VecDeque<(NodeIndex, usize)> = VecDeque::new();

    distance[root.index()] = Some(0);
    order.push(root);
    queue.push_back((root, 0));

    while let Some((u, level)) = queue.pop_front() {
        if level >= max_depth {
            break;
        }
        for edge in g.edges(u) {
            let v = if edge.source() == u {
                edge.target()
            } else {
                edge.source()
            };
            let vi = v.index();
            match distance[vi] {
                None => {
                    distance[vi] = Some(level + 1);
                    parents[vi].push((u, edge.id()));
                    order.push(v);
                    queue.push_back((v, level + 1));
                }
                Some(d) if d == level + 1 => parents[vi].push((u, edge.id())),
                Some(_) => {}
            }
        }
    }

    ShortestPathTree {
        graph,
        root,
        distance,
        parents,
        order,
    }
}

impl<'g> ShortestPathTree<'g> {
    /// The root's name.
    #[must_use]
    pub fn root(&self) -> &'g str {
        self.name(self.root)
    }

    /// Number of reached nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always `false`: the root is reached by definition.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Reached node names in discovery order.
    pub fn reached(&self) -> impl Iterator<Item = &'g str> + '_ {
        self.order.iter().map(|&idx| self.name(idx))
    }

    /// Distance from the root, or `None` if not reached.
    #[must_use]
    pub fn distance(&self, node: &str) -> Option<usize> {
        let idx = self.graph.node_index(node)?;
        self.distance_at(idx)
    }

    /// Number of shortest paths from the root, or `None` if not reached.
    #[must_use]
    pub fn num_paths(&self, node: &str) -> Option<u64> {
        let idx = self.graph.node_index(node)?;
        self.distance_at(idx)?;
        Some(self.num_paths_at(idx))
    }

    /// Sorted parent names. `None` for the root and for unreached nodes.
    #[must_use]
    pub fn parents(&self, node: &str) -> Option<Vec<&'g str>> {
        let idx = self.graph.node_index(node)?;
        let list = &self.parents[idx.index()];
        if list.is_empty() {
            return None;
        }
        let mut names: Vec<&'g str> = list.iter().map(|&(p, _)| self.name(p)).collect();
        names.sort_unstable();
        Some(names)
    }

    /// Node → distance for every reached node.
    #[must_use]
    pub fn distances(&self) -> BTreeMap<&'g str, usize> {
        self.order
            .iter()
            .filter_map(|&idx| Some((self.name(idx), self.distance_at(idx)?)))
            .collect()
    }

    /// Node → shortest-path count for every reached node.
    #[must_use]
    pub fn path_counts(&self) -> BTreeMap<&'g str, u64> {
        self.order
            .iter()
            .map(|&idx| (self.name(idx), self.num_paths_at(idx)))
            .collect()
    }

    /// Node → sorted parents for every reached node except the root.
    #[must_use]
    pub fn parent_map(&self) -> BTreeMap<&'g str, Vec<&'g str>> {
        self.order
            .iter()
            .filter(|&&idx| idx != self.root)
            .filter_map(|&idx| {
                let name = self.name(idx);
                Some((name, self.parents(name)?))
            })
            .collect()
    }

    // -- index-level accessors for the credit pass and the path score ------

    pub(crate) const fn root_index(&self) -> NodeIndex {
        self.root
    }

    pub(crate) fn order(&self) -> &[NodeIndex] {
        &self.order
    }

    pub(crate) fn distance_at(&self, idx: NodeIndex) -> Option<usize> {
        self.distance.get(idx.index()).copied().flatten()
    }

    pub(crate) fn parents_at(&self, idx: NodeIndex) -> &[(NodeIndex, EdgeIndex)] {
        &self.parents[idx.index()]
    }

    pub(crate) fn num_paths_at(&self, idx: NodeIndex) -> u64 {
        if idx == self.root {
            1
        } else {
            self.parents[idx.index()].len() as u64
        }
    }

    pub(crate) fn name(&self, idx: NodeIndex) -> &'g str {
        self.graph.node_name(idx).unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn depth_five_from_e() {
        let g = example();
        let tree = explore(&g, "E", 5).expect("E exists");

        let d: Vec<(&str, usize)> = tree.distances().into_iter().collect();
        assert_eq!(
            d,
            vec![
                ("A", 3),
                ("B", 2),
                ("C", 3),
                ("D", 1),
                ("E", 0),
                ("F", 1),
                ("G", 2)
            ]
        );

        let p: Vec<(&str, u64)> = tree.path_counts().into_iter().collect();
        assert_eq!(
            p,
            vec![
                ("A", 1),
                ("B", 1),
                ("C", 1),
                ("D", 1),
                ("E", 1),
                ("F", 1),
                ("G", 2)
            ]
        );

        let parents = tree.parent_map();
        assert_eq!(parents["A"], vec!["B"]);
        assert_eq!(parents["B"], vec!["D"]);
        assert_eq!(parents["C"], vec!["B"]);
        assert_eq!(parents["D"], vec!["E"]);
        assert_eq!(parents["F"], vec!["E"]);
        assert_eq!(parents["G"], vec!["D", "F"]);
        assert!(!parents.contains_key("E"), "root has no parent entry");
    }

    #[test]
    fn depth_two_from_e_drops_far_nodes() {
        let g = example();
        let tree = explore(&g, "E", 2).expect("E exists");

        let d: Vec<(&str, usize)> = tree.distances().into_iter().collect();
        assert_eq!(d, vec![("B", 2), ("D", 1), ("E", 0), ("F", 1), ("G", 2)]);
        assert_eq!(tree.distance("A"), None);
        assert_eq!(tree.num_paths("C"), None);
        assert_eq!(tree.parents("A"), None);
        assert_eq!(tree.num_paths("G"), Some(2));
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn depth_zero_reaches_only_root() {
        let g = example();
        let tree = explore(&g, "D", 0).expect("D exists");
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.distance("D"), Some(0));
        assert_eq!(tree.num_paths("D"), Some(1));
        assert!(tree.parent_map().is_empty());
    }

    #[test]
    fn unknown_root_is_rejected() {
        let g = example();
        let err = explore(&g, "Z", 3).unwrap_err();
        assert!(matches!(err, GraphError::NodeNotFound { .. }));
    }

    #[test]
    fn disconnected_nodes_stay_absent() {
        let mut g = example();
        g.add_node("Z");
        let tree = explore(&g, "A", 10).expect("A exists");
        assert_eq!(tree.len(), 7);
        assert_eq!(tree.distance("Z"), None);
    }

    #[test]
    fn discovery_order_is_level_order() {
        let g = example();
        let tree = explore(&g, "A", 5).expect("A exists");
        let levels: Vec<usize> = tree
            .reached()
            .map(|n| tree.distance(n).expect("reached"))
            .collect();
        assert!(levels.windows(2).all(|w| w[0] <= w[1]), "{levels:?}");
        assert_eq!(tree.root(), "A");
    }
}
