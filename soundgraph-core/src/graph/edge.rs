//! Graph Edges
//!
//! An edge connects one node output to one node input. Several edges may
//! run between the same pair of nodes.

use super::node::NodeId;

/// One vertex on one node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeVertex {
    /// The node.
    pub node: NodeId,
    /// Name of the vertex on that node.
    pub vertex: String,
}

impl NodeVertex {
    /// Create a node/vertex pair.
    pub fn new(node: NodeId, vertex: impl Into<String>) -> Self {
        Self {
            node,
            vertex: vertex.into(),
        }
    }
}

/// A directed connection from a node output to a node input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    /// Source output.
    pub from: NodeVertex,
    /// Destination input.
    pub to: NodeVertex,
}

impl Edge {
    /// Create an edge from `from_node.from_vertex` to `to_node.to_vertex`.
    pub fn new(
        from_node: NodeId,
        from_vertex: impl Into<String>,
        to_node: NodeId,
        to_vertex: impl Into<String>,
    ) -> Self {
        Self {
            from: NodeVertex::new(from_node, from_vertex),
            to: NodeVertex::new(to_node, to_vertex),
        }
    }

    /// Whether the edge starts and ends on the same node.
    pub fn is_self_loop(&self) -> bool {
        self.from.node == self.to.node
    }
}
