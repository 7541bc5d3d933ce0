//! Directed Graph Adapter
//!
//! Graph algorithms work on integer vertex ids, not on named nodes and
//! vertices. The adapter builds that integer view of a [`Graph`] once and
//! keeps enough bookkeeping to map results back to nodes and edges.
//!
//! # Construction
//!
//! 1. Every node referenced by an edge endpoint, a graph input or a graph
//!    output gets a vertex id equal to its first-seen position. Edges are
//!    visited first, in graph order, so ids are stable across runs.
//! 2. Each named edge becomes a `(from, to)` pair. Edges with an endpoint
//!    that is not a node of the graph are skipped.
//! 3. Graph input and output nodes are recorded, deduplicated.
//! 4. Named edges are indexed by `(source node, destination node)` so the
//!    original edges behind any integer edge can be recovered.
//!
//! # Cached structures
//!
//! The unique vertex list, the unique edge list and the forward and
//! transposed adjacency trees are computed on first use and kept for the
//! lifetime of the adapter. The adapter is immutable once built.

use std::cell::OnceCell;

use indexmap::{IndexMap, IndexSet};
use smallvec::SmallVec;

use super::edge::Edge;
use super::model::Graph;
use super::node::NodeId;

/// A directed edge between two adapter vertex ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DirectedEdge {
    /// Source vertex id.
    pub from: usize,
    /// Destination vertex id.
    pub to: usize,
}

/// Adjacency lists indexed by vertex id.
#[derive(Debug, Clone, Default)]
pub struct DirectedTree {
    children: Vec<SmallVec<[usize; 4]>>,
}

impl DirectedTree {
    fn from_edges(vertex_count: usize, edges: impl Iterator<Item = DirectedEdge>) -> Self {
        let mut children = vec![SmallVec::new(); vertex_count];
        for edge in edges {
            children[edge.from].push(edge.to);
        }
        Self { children }
    }

    /// Vertices directly reachable from `vertex`.
    pub fn children(&self, vertex: usize) -> &[usize] {
        self.children.get(vertex).map(|c| c.as_slice()).unwrap_or(&[])
    }

    /// Number of vertices in the tree.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the tree has no vertices.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// Integer-indexed view of a [`Graph`].
pub struct DirectedGraphAdapter<'g> {
    nodes: IndexSet<NodeId>,
    edges: Vec<DirectedEdge>,
    input_vertices: Vec<usize>,
    output_vertices: Vec<usize>,
    data_edges: IndexMap<(NodeId, NodeId), SmallVec<[&'g Edge; 2]>>,

    unique_vertices: OnceCell<Vec<usize>>,
    unique_edges: OnceCell<Vec<DirectedEdge>>,
    tree: OnceCell<DirectedTree>,
    transpose_tree: OnceCell<DirectedTree>,
}

impl<'g> DirectedGraphAdapter<'g> {
    /// Build the integer view of `graph`.
    pub fn new(graph: &'g Graph) -> Self {
        let mut nodes = IndexSet::new();
        let mut edges = Vec::with_capacity(graph.edges().len());
        let mut data_edges: IndexMap<(NodeId, NodeId), SmallVec<[&'g Edge; 2]>> = IndexMap::new();

        let intern = |nodes: &mut IndexSet<NodeId>, node: NodeId| -> Option<usize> {
            graph.node(node)?;
            Some(nodes.insert_full(node).0)
        };

        for edge in graph.edges() {
            let from = intern(&mut nodes, edge.from.node);
            let to = intern(&mut nodes, edge.to.node);
            let (Some(from), Some(to)) = (from, to) else {
                continue;
            };
            edges.push(DirectedEdge { from, to });
            data_edges
                .entry((edge.from.node, edge.to.node))
                .or_default()
                .push(edge);
        }

        let mut input_vertices = IndexSet::new();
        for boundary in graph.input_destinations().values() {
            if let Some(id) = intern(&mut nodes, boundary.node_vertex.node) {
                input_vertices.insert(id);
            }
        }

        let mut output_vertices = IndexSet::new();
        for boundary in graph.output_sources().values() {
            if let Some(id) = intern(&mut nodes, boundary.node_vertex.node) {
                output_vertices.insert(id);
            }
        }

        Self {
            nodes,
            edges,
            input_vertices: input_vertices.into_iter().collect(),
            output_vertices: output_vertices.into_iter().collect(),
            data_edges,
            unique_vertices: OnceCell::new(),
            unique_edges: OnceCell::new(),
            tree: OnceCell::new(),
            transpose_tree: OnceCell::new(),
        }
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.nodes.len()
    }

    /// The node behind a vertex id.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` was not produced by this adapter.
    pub fn node_id(&self, vertex: usize) -> NodeId {
        self.nodes[vertex]
    }

    /// The vertex id of `node`, if the node is part of this view.
    pub fn vertex_id(&self, node: NodeId) -> Option<usize> {
        self.nodes.get_index_of(&node)
    }

    /// Vertex ids of the graph's input nodes.
    pub fn input_vertices(&self) -> &[usize] {
        &self.input_vertices
    }

    /// Vertex ids of the graph's output nodes.
    pub fn output_vertices(&self) -> &[usize] {
        &self.output_vertices
    }

    /// One integer edge per valid named edge, multi-edges included.
    pub fn edges(&self) -> &[DirectedEdge] {
        &self.edges
    }

    /// Every vertex id.
    pub fn unique_vertices(&self) -> &[usize] {
        self.unique_vertices
            .get_or_init(|| (0..self.nodes.len()).collect())
    }

    /// Every distinct `(from, to)` pair, in first-seen order.
    pub fn unique_edges(&self) -> &[DirectedEdge] {
        self.unique_edges.get_or_init(|| {
            let unique: IndexSet<DirectedEdge> = self.edges.iter().copied().collect();
            unique.into_iter().collect()
        })
    }

    /// The named edges behind an integer edge.
    pub fn data_edges(&self, edge: DirectedEdge) -> &[&'g Edge] {
        let (Some(&from), Some(&to)) =
            (self.nodes.get_index(edge.from), self.nodes.get_index(edge.to))
        else {
            return &[];
        };
        self.data_edges
            .get(&(from, to))
            .map(|edges| edges.as_slice())
            .unwrap_or(&[])
    }

    /// Forward adjacency: children are downstream vertices.
    pub fn tree(&self) -> &DirectedTree {
        self.tree.get_or_init(|| {
            DirectedTree::from_edges(self.vertex_count(), self.unique_edges().iter().copied())
        })
    }

    /// Reverse adjacency: children are upstream vertices.
    pub fn transpose_tree(&self) -> &DirectedTree {
        self.transpose_tree.get_or_init(|| {
            DirectedTree::from_edges(
                self.vertex_count(),
                self.unique_edges().iter().map(|e| DirectedEdge {
                    from: e.to,
                    to: e.from,
                }),
            )
        })
    }

    /// Per-vertex count of incoming unique edges.
    pub(crate) fn in_degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.vertex_count()];
        for edge in self.unique_edges() {
            degrees[edge.to] += 1;
        }
        degrees
    }

    /// Vertex ids mapped back to nodes.
    pub(crate) fn to_nodes(&self, vertices: impl IntoIterator<Item = usize>) -> Vec<NodeId> {
        vertices.into_iter().map(|v| self.nodes[v]).collect()
    }
}
