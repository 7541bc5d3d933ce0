//! Operator Graph
//!
//! This module implements the structural side of an operator graph: nodes,
//! the edges between their vertices, and the algorithms that schedule them.
//!
//! # Overview
//!
//! - [`Graph`] owns nodes, edges and the graph's boundary vertices.
//! - [`DirectedGraphAdapter`] is an integer view of a graph that the
//!   algorithms run on.
//! - The algorithms produce execution orders, find cycles and compute which
//!   nodes are reachable from the graph boundary.
//!
//! # Design Decisions
//!
//! 1. Nodes are indexed by [`NodeId`] for O(1) lookups, and keep insertion
//!    order so results are deterministic.
//!
//! 2. Edges are kept as a flat list. Multi-edges and dangling edges are
//!    representable; the adapter decides what the algorithms see.
//!
//! 3. Every algorithm is iterative, so deep graphs cannot exhaust the call
//!    stack.

mod adapter;
mod algo;
mod edge;
mod model;
mod node;

pub use adapter::{DirectedEdge, DirectedGraphAdapter, DirectedTree};
pub use algo::{
    depth_first_topological_sort, find_reachable_nodes, find_reachable_nodes_from_input,
    find_reachable_nodes_from_output, kahn_topological_sort, tarjan_strongly_connected_components,
    StronglyConnectedComponent,
};
pub use edge::{Edge, NodeVertex};
pub use model::{BoundaryVertex, Graph};
pub use node::{Node, NodeId};
