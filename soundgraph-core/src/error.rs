//! Error Types
//!
//! Two error families exist in the core:
//!
//! - [`BindError`]: a data reference could not be attached to a vertex.
//!   These are configuration errors. The operation that produced one is a
//!   no-op, and the error is also logged at the point of detection.
//! - [`GraphError`]: a graph could not be edited, sorted, or compiled into
//!   operator graph data.

use thiserror::Error;

use crate::graph::NodeId;
use crate::vertex::DataTypeName;

/// Failure to bind a data reference to a vertex.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// No vertex with this name exists in the interface data.
    #[error("vertex '{name}' not found in vertex interface data")]
    VertexNotFound {
        /// Name that was looked up.
        name: String,
    },

    /// The reference carries a different data type than the vertex declares.
    #[error("cannot bind '{actual}' reference to vertex '{name}' of type '{expected}'")]
    DataTypeMismatch {
        /// Name of the target vertex.
        name: String,
        /// Data type declared by the vertex.
        expected: DataTypeName,
        /// Data type carried by the rejected reference.
        actual: DataTypeName,
    },

    /// The vertex exists but holds no data reference.
    #[error("vertex '{name}' is not bound")]
    Unbound {
        /// Name of the unbound vertex.
        name: String,
    },

    /// The bound reference cannot be accessed the way the caller asked
    /// (wrong Rust type, or write access to a read-only reference).
    #[error("vertex '{name}' cannot be accessed as {requested}")]
    AccessMismatch {
        /// Name of the vertex.
        name: String,
        /// What the caller asked for.
        requested: &'static str,
    },

    /// Defaults can only be synthesized for input vertices.
    #[error("vertex '{name}' is not an input vertex")]
    NotAnInput {
        /// Name of the vertex.
        name: String,
    },
}

/// Failure to edit, schedule, or compile a graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A node id does not refer to a node of the graph.
    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    /// A node does not declare the named vertex.
    #[error("node {node} has no vertex named '{vertex}'")]
    VertexNotFound {
        /// Node that was searched.
        node: NodeId,
        /// Vertex name that was looked up.
        vertex: String,
    },

    /// The two endpoints of a connection carry different data types.
    #[error("cannot connect '{from}' to '{to}': data types differ")]
    DataTypeMismatch {
        /// Data type of the source output.
        from: DataTypeName,
        /// Data type of the destination input.
        to: DataTypeName,
    },

    /// A graph boundary vertex with this name already exists.
    #[error("graph already declares a boundary vertex named '{0}'")]
    DuplicateVertex(String),

    /// The graph contains a cycle and cannot be scheduled.
    #[error("cycle detected; graph cannot be topologically sorted")]
    CycleDetected,
}
