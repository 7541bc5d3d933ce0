//! Rebind Propagation
//!
//! When a host swaps a reference on a graph input, every operator that
//! depends on that input has to be bound again. Propagation is driven by a
//! work stack rather than recursion:
//!
//! 1. Pop an (operator, input vertex, reference) entry.
//! 2. Snapshot the operator's outputs, bind the input, and let the operator
//!    rebind itself.
//! 3. Report the operator to the caller.
//! 4. For every output whose binding changed, push each downstream input it
//!    feeds.
//!
//! Only bindings that actually changed are followed, so binding the same
//! reference twice does no work the second time.
//!
//! # Termination
//!
//! Propagation terminates when the operator graph is acyclic. Graph data
//! produced by [`build_graph_operator_data`](super::build_graph_operator_data)
//! is, since the build rejects cycles. Hand-assembled graph data must uphold
//! the same precondition; it is not checked here.

use tracing::{debug, error, trace};

use super::graph_data::{GraphOperatorData, OperatorId, OperatorInfo};
use super::traits::Operator;
use crate::vertex::{AnyDataReference, VertexInterfaceData};

/// Bind `inputs` onto the graph and propagate every changed reference.
///
/// `on_rebound` is called once for every operator rebound along the way.
/// On return `inputs` holds the references the graph ended up with,
/// including defaults created for inputs the caller left unbound.
pub fn rebind_graph_inputs(
    inputs: &mut VertexInterfaceData,
    graph_data: &mut GraphOperatorData,
    on_rebound: &mut dyn FnMut(OperatorId, &dyn Operator),
) {
    let before = graph_data.vertex_data.inputs.snapshot();
    graph_data.vertex_data.inputs.bind_from(inputs);
    let changed = graph_data.vertex_data.inputs.changed_since(&before);

    let mut stack: Vec<(OperatorId, String, AnyDataReference)> = Vec::new();
    for name in changed {
        let Some(reference) = graph_data.vertex_data.inputs.data_reference(&name) else {
            continue;
        };
        let Some(destination) = graph_data.input_vertex_map.get(&name) else {
            error!(vertex = %name, "graph input is not connected to any operator");
            continue;
        };
        stack.push((
            destination.operator_id,
            destination.vertex_name.clone(),
            reference.clone(),
        ));
    }

    if !stack.is_empty() {
        debug!(inputs = stack.len(), "propagating graph input rebind");
        propagate(graph_data, stack, on_rebound);
    }

    sync_graph_outputs(graph_data);
    inputs.bind_from(&graph_data.vertex_data.inputs);
}

/// Refresh the graph outputs and publish them into `outputs`.
pub fn rebind_graph_outputs(outputs: &mut VertexInterfaceData, graph_data: &mut GraphOperatorData) {
    sync_graph_outputs(graph_data);
    outputs.bind_from(&graph_data.vertex_data.outputs);
}

fn propagate(
    graph_data: &mut GraphOperatorData,
    mut stack: Vec<(OperatorId, String, AnyDataReference)>,
    on_rebound: &mut dyn FnMut(OperatorId, &dyn Operator),
) {
    while let Some((id, vertex, reference)) = stack.pop() {
        let Some(info) = graph_data.operator_map.get_mut(&id) else {
            error!(operator = %id, "rebind target missing from operator map");
            continue;
        };
        let OperatorInfo {
            operator,
            vertex_data,
            output_connections,
        } = info;

        let before = vertex_data.outputs.snapshot();
        if vertex_data.inputs.bind_vertex(&vertex, reference).is_err() {
            continue;
        }
        operator.bind_inputs(&mut vertex_data.inputs);
        operator.bind_outputs(&mut vertex_data.outputs);
        on_rebound(id, &**operator);

        for output in vertex_data.outputs.changed_since(&before) {
            let Some(reference) = vertex_data.outputs.data_reference(&output) else {
                trace!(operator = %id, vertex = %output, "output unbound during rebind");
                continue;
            };
            let Some(destinations) = output_connections.get(&output) else {
                continue;
            };
            for destination in destinations {
                trace!(
                    from = %id,
                    to = %destination.operator_id,
                    vertex = %destination.vertex_name,
                    "queue downstream rebind"
                );
                stack.push((
                    destination.operator_id,
                    destination.vertex_name.clone(),
                    reference.clone(),
                ));
            }
        }
    }
}

/// Copy each boundary operator's current output reference onto the graph
/// outputs.
pub(crate) fn sync_graph_outputs(graph_data: &mut GraphOperatorData) {
    let GraphOperatorData {
        operator_map,
        output_vertex_map,
        vertex_data,
        ..
    } = graph_data;

    for (name, source) in output_vertex_map.iter() {
        let Some(info) = operator_map.get(&source.operator_id) else {
            error!(
                operator = %source.operator_id,
                vertex = %name,
                "graph output source missing from operator map"
            );
            continue;
        };
        match info.vertex_data.outputs.data_reference(&source.vertex_name) {
            Some(reference) => {
                let _ = vertex_data.outputs.bind_vertex(name, reference.clone());
            }
            None if vertex_data.outputs.is_vertex_bound(name) => {
                error!(
                    vertex = %name,
                    operator = %source.operator_id,
                    "exposed graph output lost its operator binding"
                );
            }
            None => {}
        }
    }
}
