//! Operator Graph Builder
//!
//! Compiles a [`Graph`] into [`GraphOperatorData`]: one operator per node,
//! created in topological order, with output connections, boundary maps and
//! an initial binding already in place.
//!
//! # Steps
//!
//! 1. Sort the graph with Kahn's algorithm. A cycle aborts the build.
//! 2. Create operators through the caller's factory. Nodes with no edges
//!    and no boundary vertices are appended after the sorted ones.
//! 3. Record an output connection for every edge whose endpoints exist.
//! 4. Record the boundary maps.
//! 5. Bind every operator in order, pushing each output reference into the
//!    inputs it feeds before the downstream operator binds.
//! 6. Copy the references the boundary operators ended up with onto the
//!    graph's own input and output data.

use std::collections::HashSet;

use tracing::debug;

use super::graph_data::{GraphOperatorData, OperatorDestination, OperatorId, OperatorInfo};
use super::rebind::sync_graph_outputs;
use super::settings::OperatorSettings;
use super::traits::Operator;
use crate::error::GraphError;
use crate::graph::{kahn_topological_sort, DirectedGraphAdapter, Graph, Node, NodeId};
use crate::vertex::AnyDataReference;

/// Build operator graph data for `graph`.
///
/// `factory` creates the operator for a node. The returned operator must
/// implement the node's vertex interface.
pub fn build_graph_operator_data<F>(
    graph: &Graph,
    settings: &OperatorSettings,
    mut factory: F,
) -> Result<GraphOperatorData, GraphError>
where
    F: FnMut(&Node, &OperatorSettings) -> Box<dyn Operator>,
{
    let adapter = DirectedGraphAdapter::new(graph);
    let mut order = kahn_topological_sort(&adapter)?;

    let sorted: HashSet<NodeId> = order.iter().copied().collect();
    order.extend(graph.nodes().map(Node::id).filter(|id| !sorted.contains(id)));

    let mut data = GraphOperatorData::new(&graph.vertex_interface());
    for node_id in &order {
        let Some(node) = graph.node(*node_id) else {
            continue;
        };
        let operator = factory(node, settings);
        data.push_operator(
            OperatorId::from(*node_id),
            OperatorInfo::new(operator, node.interface()),
        );
    }

    for edge in graph.edges() {
        let to = OperatorDestination::new(edge.to.node.into(), edge.to.vertex.clone());
        if !data.operator_map.contains_key(&to.operator_id) {
            continue;
        }
        let from = OperatorDestination::new(edge.from.node.into(), edge.from.vertex.clone());
        data.connect(&from, to);
    }

    for (name, boundary) in graph.input_destinations() {
        let node_vertex = &boundary.node_vertex;
        if graph.node(node_vertex.node).is_some() {
            data.input_vertex_map.insert(
                name.clone(),
                OperatorDestination::new(node_vertex.node.into(), node_vertex.vertex.clone()),
            );
        }
    }
    for (name, boundary) in graph.output_sources() {
        let node_vertex = &boundary.node_vertex;
        if graph.node(node_vertex.node).is_some() {
            data.output_vertex_map.insert(
                name.clone(),
                OperatorDestination::new(node_vertex.node.into(), node_vertex.vertex.clone()),
            );
        }
    }

    bind_all(&mut data);
    debug!(
        graph = graph.name(),
        operators = data.operator_count(),
        "built operator graph data"
    );
    Ok(data)
}

fn bind_all(data: &mut GraphOperatorData) {
    for position in 0..data.operator_order.len() {
        let id = data.operator_order[position];
        let mut pushes: Vec<(OperatorDestination, AnyDataReference)> = Vec::new();

        if let Some(info) = data.operator_map.get_mut(&id) {
            info.operator.bind_inputs(&mut info.vertex_data.inputs);
            info.operator.bind_outputs(&mut info.vertex_data.outputs);

            for (output, destinations) in &info.output_connections {
                if let Some(reference) = info.vertex_data.outputs.data_reference(output) {
                    pushes.extend(destinations.iter().map(|d| (d.clone(), reference.clone())));
                }
            }
        }

        for (destination, reference) in pushes {
            if let Some(info) = data.operator_map.get_mut(&destination.operator_id) {
                // Rejections are logged by bind_vertex.
                if let Err(err) = info
                    .vertex_data
                    .inputs
                    .bind_vertex(&destination.vertex_name, reference)
                {
                    debug!(operator = %destination.operator_id, %err, "edge left unbound");
                }
            }
        }
    }

    let GraphOperatorData {
        operator_map,
        input_vertex_map,
        vertex_data,
        ..
    } = data;
    for (name, destination) in input_vertex_map.iter() {
        let reference = operator_map
            .get(&destination.operator_id)
            .and_then(|info| info.vertex_data.inputs.data_reference(&destination.vertex_name));
        if let Some(reference) = reference {
            // Mismatches are logged by bind_vertex.
            let _ = vertex_data.inputs.bind_vertex(name, reference.clone());
        }
    }

    sync_graph_outputs(data);
}
