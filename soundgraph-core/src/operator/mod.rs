//! Operators
//!
//! Operators are the runtime side of a graph: one operator per node, bound
//! to data references and driven block by block by the host.
//!
//! # Overview
//!
//! - [`Operator`] is the trait every node operator implements.
//! - [`build_graph_operator_data`] compiles a [`Graph`](crate::graph::Graph)
//!   into [`GraphOperatorData`].
//! - [`RebindableGraphOperator`] runs that data as a single operator and
//!   keeps its bindings current as the host swaps references.

mod builder;
mod graph_data;
mod passthrough;
mod rebind;
mod rebindable;
mod settings;
mod traits;

pub use builder::build_graph_operator_data;
pub use graph_data::{
    GraphOperatorData, OperatorDestination, OperatorId, OperatorInfo, OutputConnections,
};
pub use passthrough::PassthroughOperator;
pub use rebind::{rebind_graph_inputs, rebind_graph_outputs};
pub use rebindable::{OperatorStack, RebindableGraphOperator, StackChange, StackEntry};
pub use settings::OperatorSettings;
pub use traits::{
    execute_function, post_execute_function, reset_function, Execute, ExecuteFunction, Operator,
    PostExecute, PostExecuteFunction, Reset, ResetFunction, ResetParams,
};
