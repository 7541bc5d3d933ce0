//! Rebindable Graph Operator
//!
//! Runs a whole [`GraphOperatorData`] as a single operator. The graph keeps
//! three sparse stacks, one per phase, holding only the operators that take
//! part in that phase. Stacks are ordered by each operator's position in the
//! topological order.
//!
//! # Lifecycle
//!
//! - Construction collects the phase functions of every operator, in order.
//! - [`Operator::bind_inputs`] and [`Operator::bind_outputs`] rebind the
//!   graph. Every operator rebound during propagation is queried again and
//!   its stack entries are added, replaced or removed.
//! - [`Execute`], [`PostExecute`] and [`Reset`] walk their stack in order.
//!
//! The bulk `inputs()`/`outputs()` accessors are not supported and panic.
//! Because the graph is itself an [`Operator`], graphs nest: an inner graph
//! propagates a rebind through its own operators when the outer graph binds
//! it.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use tracing::{debug, error};

use super::builder::build_graph_operator_data;
use super::graph_data::{GraphOperatorData, OperatorId};
use super::rebind::{rebind_graph_inputs, rebind_graph_outputs};
use super::settings::OperatorSettings;
use super::traits::{
    execute_function, post_execute_function, reset_function, Execute, ExecuteFunction, Operator,
    PostExecute, PostExecuteFunction, Reset, ResetFunction, ResetParams,
};
use crate::error::GraphError;
use crate::graph::{Graph, Node};
use crate::vertex::{DataReferenceCollection, VertexInterfaceData};

/// One operator's entry in a phase stack.
#[derive(Clone, Copy)]
pub struct StackEntry<F> {
    order: usize,
    operator_id: OperatorId,
    function: F,
}

impl<F: Copy> StackEntry<F> {
    /// Position of the operator in the topological order.
    pub fn order(&self) -> usize {
        self.order
    }

    /// The operator.
    pub fn operator_id(&self) -> OperatorId {
        self.operator_id
    }

    /// The phase function.
    pub fn function(&self) -> F {
        self.function
    }
}

/// Phase functions sorted by topological position.
#[derive(Clone)]
pub struct OperatorStack<F> {
    entries: Vec<StackEntry<F>>,
}

impl<F> Default for OperatorStack<F> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

/// What [`OperatorStack::update`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackChange {
    /// A new entry was spliced in.
    Added,
    /// An existing entry was overwritten.
    Replaced,
    /// The entry was taken out.
    Removed,
    /// Nothing to do.
    Unchanged,
}

impl<F: Copy> OperatorStack<F> {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear the function of the operator at `order`.
    ///
    /// A new entry lands right after the closest entry with a smaller
    /// order, so the stack stays sorted.
    pub fn update(
        &mut self,
        order: usize,
        operator_id: OperatorId,
        function: Option<F>,
    ) -> StackChange {
        let position = self.entries.partition_point(|e| e.order < order);
        let existing = self
            .entries
            .get(position)
            .is_some_and(|e| e.order == order);

        match (existing, function) {
            (true, Some(function)) => {
                self.entries[position].function = function;
                StackChange::Replaced
            }
            (true, None) => {
                self.entries.remove(position);
                StackChange::Removed
            }
            (false, Some(function)) => {
                self.entries.insert(
                    position,
                    StackEntry {
                        order,
                        operator_id,
                        function,
                    },
                );
                StackChange::Added
            }
            (false, None) => StackChange::Unchanged,
        }
    }

    /// Entries in execution order.
    pub fn entries(&self) -> &[StackEntry<F>] {
        &self.entries
    }

    /// Operators in execution order.
    pub fn operator_ids(&self) -> impl Iterator<Item = OperatorId> + '_ {
        self.entries.iter().map(|e| e.operator_id)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no operator takes part in this phase.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A compiled graph run as one operator.
pub struct RebindableGraphOperator {
    graph_data: GraphOperatorData,
    order_index: HashMap<OperatorId, usize>,
    execute_stack: OperatorStack<ExecuteFunction>,
    post_execute_stack: OperatorStack<PostExecuteFunction>,
    reset_stack: OperatorStack<ResetFunction>,
}

impl RebindableGraphOperator {
    /// Wrap graph data, collecting phase functions in topological order.
    pub fn new(graph_data: GraphOperatorData) -> Self {
        let mut operator = Self {
            order_index: graph_data
                .operator_order
                .iter()
                .enumerate()
                .map(|(order, &id)| (id, order))
                .collect(),
            graph_data,
            execute_stack: OperatorStack::new(),
            post_execute_stack: OperatorStack::new(),
            reset_stack: OperatorStack::new(),
        };

        for (order, id) in operator.graph_data.operator_order.iter().enumerate() {
            let Some(info) = operator.graph_data.operator_map.get(id) else {
                error!(operator = %id, "ordered operator missing from operator map");
                continue;
            };
            let op = info.operator.as_ref();
            operator
                .execute_stack
                .update(order, *id, op.execute_function());
            operator
                .post_execute_stack
                .update(order, *id, op.post_execute_function());
            operator.reset_stack.update(order, *id, op.reset_function());
        }
        operator
    }

    /// Compile `graph` and wrap it.
    pub fn from_graph<F>(
        graph: &Graph,
        settings: &OperatorSettings,
        factory: F,
    ) -> Result<Self, GraphError>
    where
        F: FnMut(&Node, &OperatorSettings) -> Box<dyn Operator>,
    {
        build_graph_operator_data(graph, settings, factory).map(Self::new)
    }

    /// The wrapped graph data.
    pub fn graph_data(&self) -> &GraphOperatorData {
        &self.graph_data
    }

    /// Operators run by [`Execute::execute`].
    pub fn execute_stack(&self) -> &OperatorStack<ExecuteFunction> {
        &self.execute_stack
    }

    /// Operators run by [`PostExecute::post_execute`].
    pub fn post_execute_stack(&self) -> &OperatorStack<PostExecuteFunction> {
        &self.post_execute_stack
    }

    /// Operators run by [`Reset::reset`].
    pub fn reset_stack(&self) -> &OperatorStack<ResetFunction> {
        &self.reset_stack
    }
}

impl fmt::Debug for RebindableGraphOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RebindableGraphOperator")
            .field("graph_data", &self.graph_data)
            .field("execute", &self.execute_stack.len())
            .field("post_execute", &self.post_execute_stack.len())
            .field("reset", &self.reset_stack.len())
            .finish()
    }
}

impl Operator for RebindableGraphOperator {
    fn bind_inputs(&mut self, inputs: &mut VertexInterfaceData) {
        let Self {
            graph_data,
            order_index,
            execute_stack,
            post_execute_stack,
            reset_stack,
        } = self;
        rebind_graph_inputs(inputs, graph_data, &mut |id, operator| {
            let Some(&order) = order_index.get(&id) else {
                return;
            };
            let changes = [
                execute_stack.update(order, id, operator.execute_function()),
                post_execute_stack.update(order, id, operator.post_execute_function()),
                reset_stack.update(order, id, operator.reset_function()),
            ];
            if changes
                .iter()
                .any(|c| matches!(c, StackChange::Added | StackChange::Removed))
            {
                debug!(operator = %id, ?changes, "operator stacks changed");
            }
        });
    }

    fn bind_outputs(&mut self, outputs: &mut VertexInterfaceData) {
        rebind_graph_outputs(outputs, &mut self.graph_data);
    }

    fn execute_function(&self) -> Option<ExecuteFunction> {
        (!self.execute_stack.is_empty()).then(execute_function::<Self>)
    }

    fn post_execute_function(&self) -> Option<PostExecuteFunction> {
        (!self.post_execute_stack.is_empty()).then(post_execute_function::<Self>)
    }

    fn reset_function(&self) -> Option<ResetFunction> {
        (!self.reset_stack.is_empty()).then(reset_function::<Self>)
    }

    fn inputs(&self) -> DataReferenceCollection {
        panic!("RebindableGraphOperator does not support bulk input access; bind vertices instead")
    }

    fn outputs(&self) -> DataReferenceCollection {
        panic!("RebindableGraphOperator does not support bulk output access; bind vertices instead")
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Execute for RebindableGraphOperator {
    fn execute(&mut self) {
        for entry in &self.execute_stack.entries {
            if let Some(info) = self.graph_data.operator_map.get_mut(&entry.operator_id) {
                (entry.function)(info.operator.as_mut());
            }
        }
    }
}

impl PostExecute for RebindableGraphOperator {
    fn post_execute(&mut self) {
        for entry in &self.post_execute_stack.entries {
            if let Some(info) = self.graph_data.operator_map.get_mut(&entry.operator_id) {
                (entry.function)(info.operator.as_mut());
            }
        }
    }
}

impl Reset for RebindableGraphOperator {
    fn reset(&mut self, params: &ResetParams) {
        for entry in &self.reset_stack.entries {
            if let Some(info) = self.graph_data.operator_map.get_mut(&entry.operator_id) {
                (entry.function)(info.operator.as_mut(), params);
            }
        }
    }
}
