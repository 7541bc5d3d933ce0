//! Graph Model
//!
//! A [`Graph`] is the named form of an operator graph: nodes keyed by
//! [`NodeId`], edges between node vertices, and the graph's own boundary
//! vertices mapped onto the node vertices they feed or read.
//!
//! Nodes keep their insertion order so every traversal of the same graph
//! visits nodes in the same order.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use super::edge::{Edge, NodeVertex};
use super::node::{Node, NodeId};
use crate::error::GraphError;
use crate::vertex::{Vertex, VertexInterface, VertexKind};

/// A graph boundary vertex and the node vertex behind it.
#[derive(Debug, Clone)]
pub struct BoundaryVertex {
    /// The vertex as exposed on the graph interface.
    pub vertex: Vertex,
    /// The node vertex it is wired to.
    pub node_vertex: NodeVertex,
}

/// Named nodes, edges and boundary vertices.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    name: String,
    nodes: IndexMap<NodeId, Node>,
    edges: Vec<Edge>,
    input_destinations: BTreeMap<String, BoundaryVertex>,
    output_sources: BTreeMap<String, BoundaryVertex>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Graph name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a node, returning its id.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id();
        self.nodes.insert(id, node);
        id
    }

    /// Remove a node.
    ///
    /// Edges and boundary vertices naming the node are left in place and
    /// become dangling; graph algorithms skip them.
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        self.nodes.shift_remove(&node_id)
    }

    /// Look up a node.
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All edges, including dangling ones.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Connect an output of one node to an input of another.
    ///
    /// Both vertices must exist and carry the same data type.
    pub fn add_edge(
        &mut self,
        from_node: NodeId,
        from_vertex: &str,
        to_node: NodeId,
        to_vertex: &str,
    ) -> Result<(), GraphError> {
        let source = self.node_vertex(from_node, from_vertex, VertexKind::Output)?;
        let destination = self.node_vertex(to_node, to_vertex, VertexKind::Input)?;
        if source.data_type() != destination.data_type() {
            return Err(GraphError::DataTypeMismatch {
                from: source.data_type().clone(),
                to: destination.data_type().clone(),
            });
        }
        self.edges
            .push(Edge::new(from_node, from_vertex, to_node, to_vertex));
        Ok(())
    }

    /// Append an edge without validating its endpoints.
    pub fn add_edge_unchecked(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Expose an input of `node` as the graph input `name`.
    pub fn add_input_vertex(
        &mut self,
        name: &str,
        node: NodeId,
        node_vertex: &str,
    ) -> Result<(), GraphError> {
        if self.input_destinations.contains_key(name) {
            return Err(GraphError::DuplicateVertex(name.to_string()));
        }
        let vertex = self.exposed(name, node, node_vertex, VertexKind::Input)?;
        self.input_destinations.insert(
            name.to_string(),
            BoundaryVertex {
                vertex,
                node_vertex: NodeVertex::new(node, node_vertex),
            },
        );
        Ok(())
    }

    /// Expose an output of `node` as the graph output `name`.
    pub fn add_output_vertex(
        &mut self,
        name: &str,
        node: NodeId,
        node_vertex: &str,
    ) -> Result<(), GraphError> {
        if self.output_sources.contains_key(name) {
            return Err(GraphError::DuplicateVertex(name.to_string()));
        }
        let vertex = self.exposed(name, node, node_vertex, VertexKind::Output)?;
        self.output_sources.insert(
            name.to_string(),
            BoundaryVertex {
                vertex,
                node_vertex: NodeVertex::new(node, node_vertex),
            },
        );
        Ok(())
    }

    /// Graph inputs and the node inputs they feed, in name order.
    pub fn input_destinations(&self) -> &BTreeMap<String, BoundaryVertex> {
        &self.input_destinations
    }

    /// Graph outputs and the node outputs they read, in name order.
    pub fn output_sources(&self) -> &BTreeMap<String, BoundaryVertex> {
        &self.output_sources
    }

    /// The graph's own boundary interface.
    pub fn vertex_interface(&self) -> VertexInterface {
        VertexInterface::new(
            self.input_destinations.values().map(|b| b.vertex.clone()),
            self.output_sources.values().map(|b| b.vertex.clone()),
        )
    }

    fn node_vertex(
        &self,
        node_id: NodeId,
        name: &str,
        kind: VertexKind,
    ) -> Result<&Vertex, GraphError> {
        let node = self.node(node_id).ok_or(GraphError::NodeNotFound(node_id))?;
        let collection = match kind {
            VertexKind::Input => node.interface().inputs(),
            VertexKind::Output => node.interface().outputs(),
            VertexKind::Environment => node.interface().environment(),
        };
        collection.get(name).ok_or_else(|| GraphError::VertexNotFound {
            node: node_id,
            vertex: name.to_string(),
        })
    }

    // The node's vertex, renamed to the boundary name.
    fn exposed(
        &self,
        name: &str,
        node: NodeId,
        node_vertex: &str,
        kind: VertexKind,
    ) -> Result<Vertex, GraphError> {
        let vertex = self.node_vertex(node, node_vertex, kind)?;
        let mut exposed = Vertex::new(
            kind,
            name,
            vertex.data_type().clone(),
            vertex.description(),
        );
        if let Some(default) = vertex.default_literal() {
            exposed = exposed.with_default(default.clone());
        }
        Ok(exposed)
    }
}
