//! Undirected, unweighted, simple graph with stable node identity.
//!
//! # Overview
//!
//! [`SocialGraph`] wraps a [`petgraph`] undirected graph whose node weights
//! are the node identifiers (strings), alongside a name → [`NodeIndex`]
//! lookup table. Nodes are never removed once added, so every
//! [`NodeIndex`] handed out stays valid for the lifetime of the graph and of
//! every clone of it. Edges may be removed; analyses that need to do so
//! clone the graph first and mutate the private copy.
//!
//! ## Edge Keys
//!
//! [`EdgeKey`] is the canonical form of an undirected edge: its endpoints
//! are stored in the identifiers' total order, so `(A, B)` and `(B, A)`
//! produce the same key. The derived `Ord` compares the first endpoint and
//! then the second, which is the tie-break order used when ranking edges.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use petgraph::{
    graph::{EdgeIndex, NodeIndex, UnGraph},
    unionfind::UnionFind,
    visit::EdgeRef,
};
use serde::{Deserialize, Serialize};

use crate::error::GraphError;

// ---------------------------------------------------------------------------
// EdgeKey
// ---------------------------------------------------------------------------

/// Canonical undirected edge: endpoints ordered by identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeKey {
    first: String,
    second: String,
}

impl EdgeKey {
    /// Build the canonical key for the edge between `a` and `b`.
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }

    /// The alphabetically smaller endpoint.
    #[must_use]
    pub fn first(&self) -> &str {
        &self.first
    }

    /// The alphabetically larger endpoint.
    #[must_use]
    pub fn second(&self) -> &str {
        &self.second
    }

    /// Return `true` if `node` is one of the two endpoints.
    #[must_use]
    pub fn touches(&self, node: &str) -> bool {
        self.first == node || self.second == node
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

// ---------------------------------------------------------------------------
// SocialGraph
// ---------------------------------------------------------------------------

/// An undirected simple graph keyed by node name.
///
/// Self-loops and parallel edges are never stored: [`SocialGraph::add_edge`]
/// refuses them and reports `false`.
#[derive(Debug, Clone)]
pub struct SocialGraph {
    graph: UnGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
}

impl Default for SocialGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SocialGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: UnGraph::new_undirected(),
            node_map: HashMap::new(),
        }
    }

    /// Build a graph from an edge list. Duplicates and self-loops are
    /// dropped silently; use the loader for logged ingestion.
    pub fn from_edges<I, S>(edges: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut g = Self::new();
        for (a, b) in edges {
            g.add_edge(a.as_ref(), b.as_ref());
        }
        g
    }

    /// Add a node if it is not present yet and return its index.
    pub fn add_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.node_map.insert(name.to_string(), idx);
        idx
    }

    /// Add the undirected edge `a — b`, creating missing endpoints.
    ///
    /// Returns `false` (and changes nothing) for a self-loop or an edge that
    /// already exists.
    pub fn add_edge(&mut self, a: &str, b: &str) -> bool {
        if a == b {
            return false;
        }
        let ia = self.add_node(a);
        let ib = self.add_node(b);
        if self.graph.find_edge(ia, ib).is_some() {
            return false;
        }
        self.graph.add_edge(ia, ib, ());
        true
    }

    /// Remove the edge `a — b`. Returns `false` if it was not present.
    pub fn remove_edge(&mut self, a: &str, b: &str) -> bool {
        let (Some(ia), Some(ib)) = (self.node_index(a), self.node_index(b)) else {
            return false;
        };
        match self.graph.find_edge(ia, ib) {
            Some(e) => self.graph.remove_edge(e).is_some(),
            None => false,
        }
    }

    /// Return `true` if `name` is a node of the graph.
    #[must_use]
    pub fn contains_node(&self, name: &str) -> bool {
        self.node_map.contains_key(name)
    }

    /// Return `true` if the undirected edge `a — b` exists.
    #[must_use]
    pub fn contains_edge(&self, a: &str, b: &str) -> bool {
        match (self.node_index(a), self.node_index(b)) {
            (Some(ia), Some(ib)) => self.graph.find_edge(ia, ib).is_some(),
            _ => false,
        }
    }

    /// Look up the [`NodeIndex`] for a node name.
    #[must_use]
    pub fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.node_map.get(name).copied()
    }

    /// Look up a node index, failing with [`GraphError::NodeNotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if `name` is not in the graph.
    pub fn require(&self, name: &str) -> Result<NodeIndex, GraphError> {
        self.node_index(name)
            .ok_or_else(|| GraphError::node_not_found(name))
    }

    /// Return the name stored at `idx`.
    #[must_use]
    pub fn node_name(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(String::as_str)
    }

    /// Read-only access to the underlying petgraph graph.
    ///
    /// Mutation goes through [`SocialGraph`] so that the name table stays
    /// consistent with the node set.
    #[must_use]
    pub const fn as_petgraph(&self) -> &UnGraph<String, ()> {
        &self.graph
    }

    /// Neighbors of `name`, in adjacency order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if `name` is not in the graph.
    pub fn neighbors(&self, name: &str) -> Result<impl Iterator<Item = &str> + '_, GraphError> {
        let idx = self.require(name)?;
        Ok(self
            .graph
            .neighbors(idx)
            .map(move |n| self.graph[n].as_str()))
    }

    /// Neighbors of `name`, sorted alphabetically.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if `name` is not in the graph.
    pub fn sorted_neighbors(&self, name: &str) -> Result<Vec<&str>, GraphError> {
        let mut out: Vec<&str> = self.neighbors(name)?.collect();
        out.sort_unstable();
        Ok(out)
    }

    /// Number of edges incident to `name`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if `name` is not in the graph.
    pub fn degree(&self, name: &str) -> Result<usize, GraphError> {
        let idx = self.require(name)?;
        Ok(self.graph.neighbors(idx).count())
    }

    /// All node names in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.node_weights().map(String::as_str)
    }

    /// All node names sorted alphabetically.
    #[must_use]
    pub fn sorted_nodes(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.nodes().collect();
        out.sort_unstable();
        out
    }

    /// All edges as canonical keys, sorted.
    #[must_use]
    pub fn edges(&self) -> Vec<EdgeKey> {
        let mut out: Vec<EdgeKey> = self
            .graph
            .edge_references()
            .map(|e| EdgeKey::new(self.graph[e.source()].as_str(), self.graph[e.target()].as_str()))
            .collect();
        out.sort_unstable();
        out
    }

    /// Canonical key of the edge stored at `e`.
    #[must_use]
    pub fn edge_key(&self, e: EdgeIndex) -> Option<EdgeKey> {
        let (a, b) = self.graph.edge_endpoints(e)?;
        Some(EdgeKey::new(self.graph[a].as_str(), self.graph[b].as_str()))
    }

    /// Return the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Return `true` if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Connected components as sorted node sets, ordered by each
    /// component's smallest node.
    #[must_use]
    pub fn connected_components(&self) -> Vec<BTreeSet<String>> {
        let n = self.graph.node_count();
        let mut uf = UnionFind::<usize>::new(n);
        for e in self.graph.edge_references() {
            uf.union(e.source().index(), e.target().index());
        }

        let mut by_root: HashMap<usize, BTreeSet<String>> = HashMap::new();
        for (i, root) in uf.into_labeling().into_iter().enumerate() {
            by_root
                .entry(root)
                .or_default()
                .insert(self.graph[NodeIndex::new(i)].clone());
        }

        let mut components: Vec<BTreeSet<String>> = by_root.into_values().collect();
        components.sort_by(|a, b| a.first().cmp(&b.first()));
        components
    }

    /// Number of connected components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        petgraph::algo::connected_components(&self.graph)
    }

    /// Induced subgraph on the nodes whose degree in `self` is at least
    /// `min_degree`.
    #[must_use]
    pub fn filter_min_degree(&self, min_degree: usize) -> Self {
        let keep: Vec<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|&idx| self.graph.neighbors(idx).count() >= min_degree)
            .collect();

        let mut sub = Self::new();
        for &idx in &keep {
            sub.add_node(&self.graph[idx]);
        }
        for e in self.graph.edge_references() {
            let (a, b) = (&self.graph[e.source()], &self.graph[e.target()]);
            if sub.contains_node(a) && sub.contains_node(b) {
                sub.add_edge(a, b);
            }
        }
        sub
    }

    /// BLAKE3 hash of the sorted canonical edge list, `blake3:<hex>`.
    ///
    /// Isolated nodes do not contribute; the hash changes only when edges
    /// change.
    #[must_use]
    pub fn content_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for key in self.edges() {
            hasher.update(key.first().as_bytes());
            hasher.update(b"\x00");
            hasher.update(key.second().as_bytes());
            hasher.update(b"\x00");
        }
        format!("blake3:{}", hasher.finalize())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
