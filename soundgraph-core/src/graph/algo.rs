//! Graph Algorithms
//!
//! Scheduling and structural queries over a [`DirectedGraphAdapter`]:
//!
//! - Topological sorts, depth-first and Kahn's. Both return an order in
//!   which every node comes after the nodes feeding it, and both fail with
//!   [`GraphError::CycleDetected`] on the same graphs. They need not agree
//!   on the order itself.
//! - Tarjan's strongly connected components, optionally restricted to real
//!   cycles.
//! - Reachability downstream of the graph inputs, upstream of the graph
//!   outputs, and the union of the two.
//!
//! Each algorithm takes a pre-built adapter so several queries can share one
//! adapter. [`Graph`] carries convenience methods of the same names that
//! build a fresh adapter per call.
//!
//! All traversals use explicit stacks or queues; none recurse, so deep
//! graphs cannot overflow the call stack.

use std::collections::{HashSet, VecDeque};

use super::adapter::{DirectedGraphAdapter, DirectedTree};
use super::edge::Edge;
use super::model::Graph;
use super::node::NodeId;
use crate::error::GraphError;

/// A strongly connected component.
#[derive(Debug, Clone)]
pub struct StronglyConnectedComponent<'g> {
    /// Member nodes, in adapter vertex order.
    pub nodes: Vec<NodeId>,
    /// Every named edge with both endpoints in the component.
    pub edges: Vec<&'g Edge>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Depth-first topological sort.
///
/// Vertices are finished in post-order; the reversed post-order is the
/// result. Meeting a vertex that is still on the DFS path means a cycle.
pub fn depth_first_topological_sort(
    adapter: &DirectedGraphAdapter<'_>,
) -> Result<Vec<NodeId>, GraphError> {
    let tree = adapter.tree();
    let mut marks = vec![Mark::Unvisited; adapter.vertex_count()];
    let mut finished = Vec::with_capacity(adapter.vertex_count());

    for &root in adapter.unique_vertices() {
        if marks[root] != Mark::Unvisited {
            continue;
        }
        marks[root] = Mark::InProgress;
        let mut stack = vec![(root, 0usize)];

        while let Some(frame) = stack.last_mut() {
            let (vertex, next_child) = *frame;
            match tree.children(vertex).get(next_child) {
                Some(&child) => {
                    frame.1 += 1;
                    match marks[child] {
                        Mark::Unvisited => {
                            marks[child] = Mark::InProgress;
                            stack.push((child, 0));
                        }
                        Mark::InProgress => return Err(GraphError::CycleDetected),
                        Mark::Done => {}
                    }
                }
                None => {
                    marks[vertex] = Mark::Done;
                    finished.push(vertex);
                    stack.pop();
                }
            }
        }
    }

    finished.reverse();
    Ok(adapter.to_nodes(finished))
}

/// Kahn's topological sort.
///
/// Repeatedly removes vertices with no remaining incoming edges. Vertices
/// left over when the queue runs dry sit on or behind a cycle.
pub fn kahn_topological_sort(
    adapter: &DirectedGraphAdapter<'_>,
) -> Result<Vec<NodeId>, GraphError> {
    let tree = adapter.tree();
    let mut in_degree = adapter.in_degrees();
    let mut queue: VecDeque<usize> = adapter
        .unique_vertices()
        .iter()
        .copied()
        .filter(|&v| in_degree[v] == 0)
        .collect();
    let mut order = Vec::with_capacity(adapter.vertex_count());

    while let Some(vertex) = queue.pop_front() {
        order.push(vertex);
        for &child in tree.children(vertex) {
            in_degree[child] -= 1;
            if in_degree[child] == 0 {
                queue.push_back(child);
            }
        }
    }

    if order.len() != adapter.vertex_count() {
        return Err(GraphError::CycleDetected);
    }
    Ok(adapter.to_nodes(order))
}

/// Tarjan's strongly connected components.
///
/// With `exclude_single_vertex` set, single-node components are reported
/// only when the node has a self-loop, so a DAG without self-loops yields
/// no components.
pub fn tarjan_strongly_connected_components<'g>(
    adapter: &DirectedGraphAdapter<'g>,
    exclude_single_vertex: bool,
) -> Vec<StronglyConnectedComponent<'g>> {
    let tree = adapter.tree();
    let count = adapter.vertex_count();
    let mut index: Vec<Option<usize>> = vec![None; count];
    let mut lowlink = vec![0usize; count];
    let mut on_stack = vec![false; count];
    let mut stack = Vec::new();
    let mut next_index = 0;
    let mut components = Vec::new();

    for &root in adapter.unique_vertices() {
        if index[root].is_some() {
            continue;
        }

        index[root] = Some(next_index);
        lowlink[root] = next_index;
        next_index += 1;
        stack.push(root);
        on_stack[root] = true;
        let mut calls = vec![(root, 0usize)];

        while let Some(frame) = calls.last_mut() {
            let (vertex, next_child) = *frame;
            if let Some(&child) = tree.children(vertex).get(next_child) {
                frame.1 += 1;
                match index[child] {
                    None => {
                        index[child] = Some(next_index);
                        lowlink[child] = next_index;
                        next_index += 1;
                        stack.push(child);
                        on_stack[child] = true;
                        calls.push((child, 0));
                    }
                    Some(child_index) if on_stack[child] => {
                        lowlink[vertex] = lowlink[vertex].min(child_index);
                    }
                    Some(_) => {}
                }
                continue;
            }

            calls.pop();
            if let Some(&(parent, _)) = calls.last() {
                lowlink[parent] = lowlink[parent].min(lowlink[vertex]);
            }

            if Some(lowlink[vertex]) == index[vertex] {
                let mut members = Vec::new();
                while let Some(member) = stack.pop() {
                    on_stack[member] = false;
                    members.push(member);
                    if member == vertex {
                        break;
                    }
                }

                let trivial = members.len() == 1 && !has_self_loop(tree, vertex);
                if !(exclude_single_vertex && trivial) {
                    components.push(component(adapter, members));
                }
            }
        }
    }

    components
}

fn has_self_loop(tree: &DirectedTree, vertex: usize) -> bool {
    tree.children(vertex).contains(&vertex)
}

fn component<'g>(
    adapter: &DirectedGraphAdapter<'g>,
    mut members: Vec<usize>,
) -> StronglyConnectedComponent<'g> {
    members.sort_unstable();
    let edges = adapter
        .unique_edges()
        .iter()
        .filter(|e| members.binary_search(&e.from).is_ok() && members.binary_search(&e.to).is_ok())
        .flat_map(|e| adapter.data_edges(*e).iter().copied())
        .collect();
    StronglyConnectedComponent {
        nodes: adapter.to_nodes(members),
        edges,
    }
}

/// Nodes downstream of any graph input, inputs included.
pub fn find_reachable_nodes_from_input(adapter: &DirectedGraphAdapter<'_>) -> HashSet<NodeId> {
    reachable(adapter, adapter.tree(), adapter.input_vertices())
}

/// Nodes upstream of any graph output, outputs included.
pub fn find_reachable_nodes_from_output(adapter: &DirectedGraphAdapter<'_>) -> HashSet<NodeId> {
    reachable(adapter, adapter.transpose_tree(), adapter.output_vertices())
}

/// Union of [`find_reachable_nodes_from_input`] and
/// [`find_reachable_nodes_from_output`].
///
/// A node qualifies by satisfying either side. This is deliberately broad
/// and is not a dead-code criterion.
pub fn find_reachable_nodes(adapter: &DirectedGraphAdapter<'_>) -> HashSet<NodeId> {
    let mut nodes = find_reachable_nodes_from_input(adapter);
    nodes.extend(find_reachable_nodes_from_output(adapter));
    nodes
}

fn reachable(
    adapter: &DirectedGraphAdapter<'_>,
    tree: &DirectedTree,
    starts: &[usize],
) -> HashSet<NodeId> {
    let mut visited = vec![false; adapter.vertex_count()];
    let mut queue: VecDeque<usize> = starts.iter().copied().collect();
    let mut nodes = HashSet::new();

    while let Some(vertex) = queue.pop_front() {
        if visited[vertex] {
            continue;
        }
        visited[vertex] = true;
        nodes.insert(adapter.node_id(vertex));
        queue.extend(tree.children(vertex).iter().copied().filter(|&c| !visited[c]));
    }

    nodes
}

impl Graph {
    /// Depth-first topological sort of this graph.
    pub fn depth_first_topological_sort(&self) -> Result<Vec<NodeId>, GraphError> {
        depth_first_topological_sort(&DirectedGraphAdapter::new(self))
    }

    /// Kahn's topological sort of this graph.
    pub fn kahn_topological_sort(&self) -> Result<Vec<NodeId>, GraphError> {
        kahn_topological_sort(&DirectedGraphAdapter::new(self))
    }

    /// Strongly connected components of this graph.
    pub fn tarjan_strongly_connected_components(
        &self,
        exclude_single_vertex: bool,
    ) -> Vec<StronglyConnectedComponent<'_>> {
        let adapter = DirectedGraphAdapter::new(self);
        tarjan_strongly_connected_components(&adapter, exclude_single_vertex)
    }

    /// Nodes downstream of any graph input.
    pub fn find_reachable_nodes_from_input(&self) -> HashSet<NodeId> {
        find_reachable_nodes_from_input(&DirectedGraphAdapter::new(self))
    }

    /// Nodes upstream of any graph output.
    pub fn find_reachable_nodes_from_output(&self) -> HashSet<NodeId> {
        find_reachable_nodes_from_output(&DirectedGraphAdapter::new(self))
    }

    /// Nodes reachable from an input or able to reach an output.
    pub fn find_reachable_nodes(&self) -> HashSet<NodeId> {
        find_reachable_nodes(&DirectedGraphAdapter::new(self))
    }
}
