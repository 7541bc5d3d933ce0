//! SoundGraph Core
//!
//! This crate provides the core of the SoundGraph audio operator graph.
//! It implements:
//!
//! - Typed vertices and the live data bindings behind them
//! - The graph model and its scheduling algorithms
//! - Compilation of a graph into executable operators
//! - Live rebinding of a running graph
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `vertex`: vertex declarations, data types, data references and bindings
//! - `graph`: nodes, edges, the directed graph adapter and graph algorithms
//! - `operator`: the operator trait, graph compilation and the rebindable
//!   graph operator
//! - `error`: error types shared by the modules above
//!
//! # Example
//!
//! ```rust
//! use soundgraph_core::graph::{Graph, Node};
//! use soundgraph_core::operator::{
//!     Execute, Operator, OperatorSettings, PassthroughOperator, RebindableGraphOperator,
//! };
//! use soundgraph_core::vertex::{AnyDataReference, OperatorVertexData};
//!
//! let mut graph = Graph::new("chain");
//! let a = graph.add_node(Node::new("a", PassthroughOperator::<f32>::vertex_interface()));
//! let b = graph.add_node(Node::new("b", PassthroughOperator::<f32>::vertex_interface()));
//! graph.add_edge(a, "Out", b, "In").unwrap();
//! graph.add_input_vertex("In", a, "In").unwrap();
//! graph.add_output_vertex("Out", b, "Out").unwrap();
//!
//! let settings = OperatorSettings::default();
//! let mut operator = RebindableGraphOperator::from_graph(&graph, &settings, |_, s| {
//!     Box::new(PassthroughOperator::<f32>::new(s))
//! })
//! .unwrap();
//!
//! // Bind a new reference to the graph input; it flows to the graph output.
//! let mut vertex_data = OperatorVertexData::new(&graph.vertex_interface());
//! let input = AnyDataReference::read(0.5f32);
//! vertex_data.inputs.bind_vertex("In", input.clone()).unwrap();
//! operator.bind_inputs(&mut vertex_data.inputs);
//! operator.bind_outputs(&mut vertex_data.outputs);
//!
//! assert_eq!(vertex_data.outputs.data_reference("Out").unwrap().id(), input.id());
//! operator.execute();
//! ```

pub mod error;
pub mod graph;
pub mod operator;
pub mod vertex;
