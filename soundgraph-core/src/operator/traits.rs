//! Operator Traits
//!
//! An operator is the runtime instance of one graph node. Every operator
//! binds its vertices; the execute, post-execute and reset phases are
//! optional. An operator that does not take part in a phase returns `None`
//! from the matching `*_function` method, and the owning graph leaves it out of that
//! phase entirely.
//!
//! Phase functions are plain function pointers over `&mut dyn Operator`.
//! [`execute_function`], [`post_execute_function`] and [`reset_function`]
//! build them for any operator implementing [`Execute`], [`PostExecute`] or
//! [`Reset`].

use std::any::Any;

use super::settings::OperatorSettings;
use crate::vertex::{DataReferenceCollection, VertexInterfaceData};

/// Parameters passed to a reset.
#[derive(Debug, Clone, Default)]
pub struct ResetParams {
    /// Settings to reset with.
    pub settings: OperatorSettings,
}

/// Runs one block of processing.
pub type ExecuteFunction = fn(&mut dyn Operator);

/// Runs after every operator of the graph has executed.
pub type PostExecuteFunction = fn(&mut dyn Operator);

/// Returns the operator to its initial state.
pub type ResetFunction = fn(&mut dyn Operator, &ResetParams);

/// Runtime instance of a graph node.
pub trait Operator: Any + Send {
    /// Attach to the input bindings.
    ///
    /// Implementations read the references they need and may write back
    /// references for inputs that were unbound, such as defaults.
    fn bind_inputs(&mut self, inputs: &mut VertexInterfaceData);

    /// Publish the operator's output references into `outputs`.
    fn bind_outputs(&mut self, outputs: &mut VertexInterfaceData);

    /// Execute phase entry point, if the operator executes.
    fn execute_function(&self) -> Option<ExecuteFunction> {
        None
    }

    /// Post-execute phase entry point, if any.
    fn post_execute_function(&self) -> Option<PostExecuteFunction> {
        None
    }

    /// Reset phase entry point, if any.
    fn reset_function(&self) -> Option<ResetFunction> {
        None
    }

    /// Bulk input references (legacy interface).
    fn inputs(&self) -> DataReferenceCollection {
        DataReferenceCollection::new()
    }

    /// Bulk output references (legacy interface).
    fn outputs(&self) -> DataReferenceCollection {
        DataReferenceCollection::new()
    }

    /// Downcasting support for phase functions.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Operators with an execute phase.
pub trait Execute {
    /// Process one block.
    fn execute(&mut self);
}

/// Operators with a post-execute phase.
pub trait PostExecute {
    /// Finish the block, e.g. clear per-block trigger state.
    fn post_execute(&mut self);
}

/// Operators with a reset phase.
pub trait Reset {
    /// Return to the initial state.
    fn reset(&mut self, params: &ResetParams);
}

/// Execute function dispatching to `O::execute`.
pub fn execute_function<O: Operator + Execute>() -> ExecuteFunction {
    fn call<O: Operator + Execute>(operator: &mut dyn Operator) {
        if let Some(operator) = operator.as_any_mut().downcast_mut::<O>() {
            operator.execute();
        }
    }
    call::<O>
}

/// Post-execute function dispatching to `O::post_execute`.
pub fn post_execute_function<O: Operator + PostExecute>() -> PostExecuteFunction {
    fn call<O: Operator + PostExecute>(operator: &mut dyn Operator) {
        if let Some(operator) = operator.as_any_mut().downcast_mut::<O>() {
            operator.post_execute();
        }
    }
    call::<O>
}

/// Reset function dispatching to `O::reset`.
pub fn reset_function<O: Operator + Reset>() -> ResetFunction {
    fn call<O: Operator + Reset>(operator: &mut dyn Operator, params: &ResetParams) {
        if let Some(operator) = operator.as_any_mut().downcast_mut::<O>() {
            operator.reset(params);
        }
    }
    call::<O>
}
