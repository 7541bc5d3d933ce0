//! Operator Graph Data
//!
//! The compiled, executable form of a graph. Operators live in one owning
//! table keyed by [`OperatorId`]; everything else (output connections,
//! boundary maps, the execution order) refers to operators by id only.
//!
//! # Invariants
//!
//! - `operator_order` is a topological order of the dependency graph
//!   induced by the output connections.
//! - Every id named by a connection or boundary map is a key of
//!   `operator_map`.
//!
//! Both hold for data produced by
//! [`build_graph_operator_data`](super::build_graph_operator_data). Rebind
//! propagation only terminates when the operator graph is acyclic.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use smallvec::SmallVec;

use super::traits::Operator;
use crate::graph::NodeId;
use crate::vertex::{OperatorVertexData, VertexInterface};

/// Identifies an operator within its graph. Derived from the node id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperatorId(u64);

impl From<NodeId> for OperatorId {
    fn from(node: NodeId) -> Self {
        Self(node.raw())
    }
}

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "op#{}", self.0)
    }
}

/// One vertex on one operator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperatorDestination {
    /// The operator.
    pub operator_id: OperatorId,
    /// Vertex name on that operator.
    pub vertex_name: String,
}

impl OperatorDestination {
    /// Create an operator/vertex pair.
    pub fn new(operator_id: OperatorId, vertex_name: impl Into<String>) -> Self {
        Self {
            operator_id,
            vertex_name: vertex_name.into(),
        }
    }
}

/// Output vertex name to the inputs it feeds.
pub type OutputConnections = BTreeMap<String, SmallVec<[OperatorDestination; 4]>>;

/// An operator with its bindings and outgoing connections.
pub struct OperatorInfo {
    /// The live operator.
    pub operator: Box<dyn Operator>,
    /// The operator's bound vertex data.
    pub vertex_data: OperatorVertexData,
    /// Downstream inputs fed by each output.
    pub output_connections: OutputConnections,
}

impl OperatorInfo {
    /// Wrap an operator with unbound vertex data for `interface`.
    pub fn new(operator: Box<dyn Operator>, interface: &VertexInterface) -> Self {
        Self {
            operator,
            vertex_data: OperatorVertexData::new(interface),
            output_connections: OutputConnections::new(),
        }
    }
}

impl fmt::Debug for OperatorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorInfo")
            .field("vertex_data", &self.vertex_data)
            .field("output_connections", &self.output_connections)
            .finish_non_exhaustive()
    }
}

/// Operators, connections, execution order and graph boundary bindings.
#[derive(Debug)]
pub struct GraphOperatorData {
    /// Owning operator table.
    pub operator_map: HashMap<OperatorId, OperatorInfo>,
    /// Topological execution order.
    pub operator_order: Vec<OperatorId>,
    /// Graph input name to the operator input it feeds.
    pub input_vertex_map: BTreeMap<String, OperatorDestination>,
    /// Graph output name to the operator output it reads.
    pub output_vertex_map: BTreeMap<String, OperatorDestination>,
    /// The graph's own boundary bindings.
    pub vertex_data: OperatorVertexData,
}

impl GraphOperatorData {
    /// Empty graph data with unbound boundary vertices for `interface`.
    pub fn new(interface: &VertexInterface) -> Self {
        Self {
            operator_map: HashMap::new(),
            operator_order: Vec::new(),
            input_vertex_map: BTreeMap::new(),
            output_vertex_map: BTreeMap::new(),
            vertex_data: OperatorVertexData::new(interface),
        }
    }

    /// Append an operator to the execution order.
    pub fn push_operator(&mut self, id: OperatorId, info: OperatorInfo) {
        self.operator_order.push(id);
        self.operator_map.insert(id, info);
    }

    /// Record that `from.vertex_name` feeds `to.vertex_name`.
    ///
    /// Returns `false` if the source operator is unknown.
    pub fn connect(&mut self, from: &OperatorDestination, to: OperatorDestination) -> bool {
        match self.operator_map.get_mut(&from.operator_id) {
            Some(info) => {
                info.output_connections
                    .entry(from.vertex_name.clone())
                    .or_default()
                    .push(to);
                true
            }
            None => false,
        }
    }

    /// Look up an operator.
    pub fn operator(&self, id: OperatorId) -> Option<&OperatorInfo> {
        self.operator_map.get(&id)
    }

    /// Number of operators.
    pub fn operator_count(&self) -> usize {
        self.operator_map.len()
    }
}
