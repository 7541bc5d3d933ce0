//! Graph Nodes
//!
//! This module defines the nodes that live in a graph. A node is an
//! identity plus the vertex interface it exposes; two nodes with equal
//! interfaces are still different nodes.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::vertex::VertexInterface;

/// Unique identifier for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

impl NodeId {
    /// Generate a new unique node ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node in a graph.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier for this node.
    id: NodeId,

    /// Instance name, for diagnostics only.
    name: String,

    /// Ports exposed by this node.
    interface: VertexInterface,
}

impl Node {
    /// Create a new node with a fresh identity.
    pub fn new(name: impl Into<String>, interface: VertexInterface) -> Self {
        Self {
            id: NodeId::new(),
            name: name.into(),
            interface,
        }
    }

    /// Get the node's ID.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Get the node's instance name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the node's vertex interface.
    pub fn interface(&self) -> &VertexInterface {
        &self.interface
    }
}
