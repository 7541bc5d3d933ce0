//! Integration Tests for Rebinding
//!
//! These tests verify that graph compilation, rebind propagation and the
//! rebindable graph operator's phase stacks work together correctly.

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use soundgraph_core::graph::{Edge, Graph, Node, NodeId};
use soundgraph_core::operator::{
    build_graph_operator_data, execute_function, post_execute_function, rebind_graph_inputs,
    reset_function, Execute, ExecuteFunction, GraphOperatorData, Operator, OperatorDestination,
    OperatorId, OperatorInfo, OperatorSettings, PassthroughOperator, PostExecute,
    PostExecuteFunction, RebindableGraphOperator, Reset, ResetFunction, ResetParams,
};
use soundgraph_core::vertex::{
    AnyDataReference, DataReadReference, DataType, DataWriteReference, Literal, OperatorVertexData,
    Vertex, VertexInterface, VertexInterfaceData,
};

type Log = Arc<Mutex<Vec<String>>>;

/// Counts events at one level on the current thread.
struct LevelCounter {
    level: Level,
    count: Arc<AtomicUsize>,
}

impl<S: Subscriber> Layer<S> for LevelCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == self.level {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Run `f` and return how many events it logged at `level`.
fn count_events(level: Level, f: impl FnOnce()) -> usize {
    let count = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(LevelCounter {
        level,
        count: Arc::clone(&count),
    });
    tracing::subscriber::with_default(subscriber, f);
    count.load(Ordering::SeqCst)
}

fn count_warnings(f: impl FnOnce()) -> usize {
    count_events(Level::WARN, f)
}

fn count_errors(f: impl FnOnce()) -> usize {
    count_events(Level::ERROR, f)
}

/// Adds one to its input every block and logs each phase it runs.
///
/// A gated stage has an extra `Enabled` input and only executes while the
/// value bound there was true at bind time.
struct Stage {
    name: String,
    gated: bool,
    enabled: bool,
    log: Log,
    settings: OperatorSettings,
    input: Option<DataReadReference<f32>>,
    output: DataWriteReference<f32>,
}

impl Stage {
    fn new(name: &str, gated: bool, log: Log, settings: &OperatorSettings) -> Self {
        Self {
            name: name.to_string(),
            gated,
            enabled: false,
            log,
            settings: settings.clone(),
            input: None,
            output: DataWriteReference::new(0.0),
        }
    }

    fn interface(gated: bool) -> VertexInterface {
        let mut inputs = vec![Vertex::input::<f32>("In", "signal in")];
        if gated {
            inputs.push(
                Vertex::input::<bool>("Enabled", "run while true").with_default(Literal::Bool(false)),
            );
        }
        VertexInterface::new(inputs, [Vertex::output::<f32>("Out", "signal out")])
    }

    fn record(&self, phase: &str) {
        self.log.lock().push(format!("{phase}:{}", self.name));
    }
}

fn bind_default<T: DataType>(
    inputs: &mut VertexInterfaceData,
    name: &str,
    settings: &OperatorSettings,
) -> DataReadReference<T> {
    let reference = inputs
        .get_or_create_default_data_read_reference::<T>(name, settings)
        .unwrap();
    if !inputs.is_vertex_bound(name) {
        inputs.bind_vertex(name, reference.clone().into()).unwrap();
    }
    reference
}

impl Operator for Stage {
    fn bind_inputs(&mut self, inputs: &mut VertexInterfaceData) {
        self.input = Some(bind_default::<f32>(inputs, "In", &self.settings));
        if self.gated {
            self.enabled = *bind_default::<bool>(inputs, "Enabled", &self.settings).read();
        }
    }

    fn bind_outputs(&mut self, outputs: &mut VertexInterfaceData) {
        outputs
            .bind_vertex("Out", self.output.clone().into())
            .unwrap();
    }

    fn execute_function(&self) -> Option<ExecuteFunction> {
        (!self.gated || self.enabled).then(execute_function::<Self>)
    }

    fn post_execute_function(&self) -> Option<PostExecuteFunction> {
        Some(post_execute_function::<Self>())
    }

    fn reset_function(&self) -> Option<ResetFunction> {
        Some(reset_function::<Self>())
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Execute for Stage {
    fn execute(&mut self) {
        let value = self.input.as_ref().map_or(0.0, |input| *input.read());
        *self.output.write() = value + 1.0;
        self.record("execute");
    }
}

impl PostExecute for Stage {
    fn post_execute(&mut self) {
        self.record("post");
    }
}

impl Reset for Stage {
    fn reset(&mut self, _params: &ResetParams) {
        *self.output.write() = 0.0;
        self.record("reset");
    }
}

/// Forwards its input on the first bind and withdraws its output on every
/// later one.
struct Withdrawing {
    settings: OperatorSettings,
    input: Option<AnyDataReference>,
    published: bool,
}

impl Withdrawing {
    fn new(settings: &OperatorSettings) -> Self {
        Self {
            settings: settings.clone(),
            input: None,
            published: false,
        }
    }
}

impl Operator for Withdrawing {
    fn bind_inputs(&mut self, inputs: &mut VertexInterfaceData) {
        self.input = Some(bind_default::<f32>(inputs, "In", &self.settings).into());
    }

    fn bind_outputs(&mut self, outputs: &mut VertexInterfaceData) {
        if self.published {
            outputs.unbind_vertex("Out");
        } else if let Some(input) = &self.input {
            outputs.bind_vertex("Out", input.clone()).unwrap();
            self.published = true;
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn passthrough(_node: &Node, settings: &OperatorSettings) -> Box<dyn Operator> {
    Box::new(PassthroughOperator::<f32>::new(settings))
}

/// A -> B -> C passthrough chain exposing A.In and C.Out.
fn passthrough_chain() -> (Graph, [NodeId; 3]) {
    let mut graph = Graph::new("chain");
    let mut add = |name: &str| {
        graph.add_node(Node::new(name, PassthroughOperator::<f32>::vertex_interface()))
    };
    let ids = [add("A"), add("B"), add("C")];
    graph.add_edge(ids[0], "Out", ids[1], "In").unwrap();
    graph.add_edge(ids[1], "Out", ids[2], "In").unwrap();
    graph.add_input_vertex("In", ids[0], "In").unwrap();
    graph.add_output_vertex("Out", ids[2], "Out").unwrap();
    (graph, ids)
}

/// first -> gate -> last stages, with the gate's `Enabled` exposed.
fn stage_chain(log: &Log) -> (Graph, RebindableGraphOperator, [NodeId; 3]) {
    let mut graph = Graph::new("stages");
    let first = graph.add_node(Node::new("first", Stage::interface(false)));
    let gate = graph.add_node(Node::new("gate", Stage::interface(true)));
    let last = graph.add_node(Node::new("last", Stage::interface(false)));
    graph.add_edge(first, "Out", gate, "In").unwrap();
    graph.add_edge(gate, "Out", last, "In").unwrap();
    graph.add_input_vertex("Enabled", gate, "Enabled").unwrap();
    graph.add_output_vertex("Out", last, "Out").unwrap();

    let operator =
        RebindableGraphOperator::from_graph(&graph, &OperatorSettings::default(), |node, s| {
            Box::new(Stage::new(node.name(), node.name() == "gate", Arc::clone(log), s))
        })
        .unwrap();
    (graph, operator, [first, gate, last])
}

fn enable(operator: &mut RebindableGraphOperator, graph: &Graph, value: bool) {
    let mut data = OperatorVertexData::new(&graph.vertex_interface());
    data.inputs
        .bind_vertex("Enabled", AnyDataReference::read(value))
        .unwrap();
    operator.bind_inputs(&mut data.inputs);
    operator.bind_outputs(&mut data.outputs);
}

fn ids(nodes: &[NodeId]) -> Vec<OperatorId> {
    nodes.iter().map(|&n| n.into()).collect()
}

/// Every vertex along the chain and the graph output end up on the
/// reference bound to the graph input.
#[test]
fn passthrough_chain_forwards_bound_reference() {
    let (graph, nodes) = passthrough_chain();
    let mut operator =
        RebindableGraphOperator::from_graph(&graph, &OperatorSettings::default(), passthrough)
            .unwrap();

    let mut data = OperatorVertexData::new(&graph.vertex_interface());
    let r1 = DataWriteReference::new(0.75f32);
    data.inputs.bind_vertex("In", r1.clone().into()).unwrap();
    operator.bind_inputs(&mut data.inputs);
    operator.bind_outputs(&mut data.outputs);

    for node in nodes {
        let info = operator.graph_data().operator(node.into()).unwrap();
        assert_eq!(info.vertex_data.inputs.data_reference("In").unwrap().id(), r1.id());
        assert_eq!(info.vertex_data.outputs.data_reference("Out").unwrap().id(), r1.id());
    }
    assert_eq!(data.outputs.data_reference("Out").unwrap().id(), r1.id());

    let out = data.outputs.data_read_reference::<f32>("Out");
    *r1.write() = 0.25;
    assert_eq!(*out.read(), 0.25);
}

/// The callback fires once per rebound operator, and not at all when the
/// same reference is bound again.
#[test]
fn rebind_is_minimal_and_idempotent() {
    let (graph, nodes) = passthrough_chain();
    let mut graph_data =
        build_graph_operator_data(&graph, &OperatorSettings::default(), passthrough).unwrap();

    let mut inputs = OperatorVertexData::new(&graph.vertex_interface()).inputs;
    inputs
        .bind_vertex("In", AnyDataReference::read(1.0f32))
        .unwrap();

    let mut rebound = Vec::new();
    rebind_graph_inputs(&mut inputs, &mut graph_data, &mut |id, _| rebound.push(id));
    assert_eq!(rebound, ids(&nodes));

    rebound.clear();
    rebind_graph_inputs(&mut inputs, &mut graph_data, &mut |id, _| rebound.push(id));
    assert!(rebound.is_empty());
}

/// Unbound graph inputs come back holding the default the graph created.
#[test]
fn unbound_inputs_receive_defaults() {
    let (graph, _) = passthrough_chain();
    let mut operator =
        RebindableGraphOperator::from_graph(&graph, &OperatorSettings::default(), passthrough)
            .unwrap();

    let mut data = OperatorVertexData::new(&graph.vertex_interface());
    operator.bind_inputs(&mut data.inputs);
    operator.bind_outputs(&mut data.outputs);

    let input = data.inputs.data_reference("In").unwrap().id();
    assert_eq!(data.outputs.data_reference("Out").unwrap().id(), input);
}

/// Binding an unknown vertex logs one warning and changes nothing.
#[test]
fn unknown_vertex_warns_once() {
    let mut data = OperatorVertexData::new(&PassthroughOperator::<f32>::vertex_interface());
    let before = data.inputs.snapshot();

    let warnings = count_warnings(|| {
        let result = data
            .inputs
            .bind_vertex("Nonexistent", AnyDataReference::read(1.0f32));
        assert!(result.is_err());
    });

    assert_eq!(warnings, 1);
    assert!(data.inputs.changed_since(&before).is_empty());
}

/// Binding a reference of the wrong data type logs one warning and leaves
/// the vertex as it was.
#[test]
fn data_type_mismatch_warns_once() {
    let mut data = OperatorVertexData::new(&PassthroughOperator::<f32>::vertex_interface());

    let warnings = count_warnings(|| {
        let _ = data.inputs.bind_vertex("In", AnyDataReference::read(true));
    });
    assert_eq!(warnings, 1);
    assert!(!data.inputs.is_vertex_bound("In"));

    let bound = AnyDataReference::read(0.5f32);
    data.inputs.bind_vertex("In", bound.clone()).unwrap();
    let warnings = count_warnings(|| {
        let _ = data.inputs.bind_vertex("In", AnyDataReference::read(3i32));
    });
    assert_eq!(warnings, 1);
    assert_eq!(data.inputs.data_reference("In").unwrap().id(), bound.id());
}

/// An unchecked edge between mismatched types logs a single warning while
/// the graph is built, and the downstream input falls back to its default.
#[test]
fn rejected_edge_warns_once() {
    let mut graph = Graph::new("mismatch");
    let wide = graph.add_node(Node::new("wide", PassthroughOperator::<f32>::vertex_interface()));
    let narrow = graph.add_node(Node::new(
        "narrow",
        PassthroughOperator::<i32>::vertex_interface(),
    ));
    graph.add_edge_unchecked(Edge::new(wide, "Out", narrow, "In"));

    let mut data = None;
    let warnings = count_warnings(|| {
        data = Some(
            build_graph_operator_data(&graph, &OperatorSettings::default(), |node, s| {
                if node.name() == "narrow" {
                    Box::new(PassthroughOperator::<i32>::new(s))
                } else {
                    passthrough(node, s)
                }
            })
            .unwrap(),
        );
    });
    assert_eq!(warnings, 1);

    let data = data.unwrap();
    let info = data.operator(narrow.into()).unwrap();
    assert_eq!(
        info.vertex_data.inputs.data_reference("In").unwrap().data_type().as_str(),
        "Int32"
    );
}

/// A graph input whose node was removed before the build logs one error;
/// the other graph inputs still propagate.
#[test]
fn unwired_graph_input_logs_error() {
    let mut graph = Graph::new("unwired");
    let kept = graph.add_node(Node::new("kept", PassthroughOperator::<f32>::vertex_interface()));
    let removed = graph.add_node(Node::new(
        "removed",
        PassthroughOperator::<f32>::vertex_interface(),
    ));
    graph.add_input_vertex("Kept", kept, "In").unwrap();
    graph.add_input_vertex("Removed", removed, "In").unwrap();
    graph.remove_node(removed);

    let mut graph_data =
        build_graph_operator_data(&graph, &OperatorSettings::default(), passthrough).unwrap();
    assert!(!graph_data.input_vertex_map.contains_key("Removed"));

    let mut inputs = OperatorVertexData::new(&graph.vertex_interface()).inputs;
    let source = AnyDataReference::read(4.0f32);
    inputs.bind_vertex("Kept", source.clone()).unwrap();
    inputs
        .bind_vertex("Removed", AnyDataReference::read(5.0f32))
        .unwrap();

    let mut rebound = Vec::new();
    let errors = count_errors(|| {
        rebind_graph_inputs(&mut inputs, &mut graph_data, &mut |id, _| rebound.push(id));
    });

    assert_eq!(errors, 1);
    assert_eq!(rebound, ids(&[kept]));
    let info = graph_data.operator(kept.into()).unwrap();
    assert_eq!(info.vertex_data.inputs.data_reference("In").unwrap().id(), source.id());
}

/// An operator that drops an exposed output during a rebind logs one
/// error, and the graph output keeps the reference it had.
#[test]
fn withdrawn_graph_output_keeps_previous_reference() {
    let mut graph = Graph::new("withdrawing");
    let node = graph.add_node(Node::new("node", PassthroughOperator::<f32>::vertex_interface()));
    graph.add_input_vertex("In", node, "In").unwrap();
    graph.add_output_vertex("Out", node, "Out").unwrap();

    let mut graph_data = build_graph_operator_data(&graph, &OperatorSettings::default(), |_, s| {
        Box::new(Withdrawing::new(s))
    })
    .unwrap();
    let published = graph_data.vertex_data.outputs.data_reference("Out").unwrap().id();

    let mut inputs = OperatorVertexData::new(&graph.vertex_interface()).inputs;
    inputs
        .bind_vertex("In", AnyDataReference::read(1.5f32))
        .unwrap();
    let errors = count_errors(|| {
        rebind_graph_inputs(&mut inputs, &mut graph_data, &mut |_, _| {});
    });

    assert_eq!(errors, 1);
    let info = graph_data.operator(node.into()).unwrap();
    assert!(!info.vertex_data.outputs.is_vertex_bound("Out"));
    assert_eq!(
        graph_data.vertex_data.outputs.data_reference("Out").unwrap().id(),
        published
    );
}

/// A connection to an operator that is not in the table logs one error and
/// the remaining rebinds still run.
#[test]
fn missing_rebind_target_logs_error() {
    let settings = OperatorSettings::default();
    let node_interface = PassthroughOperator::<f32>::vertex_interface();
    let head = OperatorId::from(NodeId::new());
    let tail = OperatorId::from(NodeId::new());
    let missing = OperatorId::from(NodeId::new());

    let mut graph_data =
        GraphOperatorData::new(&VertexInterface::new([Vertex::input::<f32>("In", "")], []));
    for id in [head, tail] {
        graph_data.push_operator(
            id,
            OperatorInfo::new(
                Box::new(PassthroughOperator::<f32>::new(&settings)),
                &node_interface,
            ),
        );
    }
    let out = OperatorDestination::new(head, "Out");
    assert!(graph_data.connect(&out, OperatorDestination::new(tail, "In")));
    assert!(graph_data.connect(&out, OperatorDestination::new(missing, "In")));
    graph_data
        .input_vertex_map
        .insert("In".to_string(), OperatorDestination::new(head, "In"));

    let mut inputs = graph_data.vertex_data.inputs.clone();
    let source = AnyDataReference::read(7.0f32);
    inputs.bind_vertex("In", source.clone()).unwrap();

    let mut rebound = Vec::new();
    let errors = count_errors(|| {
        rebind_graph_inputs(&mut inputs, &mut graph_data, &mut |id, _| rebound.push(id));
    });

    assert_eq!(errors, 1);
    assert_eq!(rebound, vec![head, tail]);
    let info = graph_data.operator(tail).unwrap();
    assert_eq!(info.vertex_data.inputs.data_reference("In").unwrap().id(), source.id());
}

/// An ordered id with no operator behind it logs one error and keeps its
/// slot out of every stack.
#[test]
fn ordered_operator_missing_logs_error() {
    let log = Log::default();
    let settings = OperatorSettings::default();
    let missing = OperatorId::from(NodeId::new());
    let present = OperatorId::from(NodeId::new());

    let mut graph_data = GraphOperatorData::new(&VertexInterface::default());
    graph_data.push_operator(
        present,
        OperatorInfo::new(
            Box::new(Stage::new("present", false, Arc::clone(&log), &settings)),
            &Stage::interface(false),
        ),
    );
    graph_data.operator_order.insert(0, missing);

    let mut operator = None;
    let errors = count_errors(|| operator = Some(RebindableGraphOperator::new(graph_data)));
    assert_eq!(errors, 1);

    let operator = operator.unwrap();
    let execute: Vec<OperatorId> = operator.execute_stack().operator_ids().collect();
    assert_eq!(execute, vec![present]);
    assert_eq!(operator.execute_stack().entries()[0].order(), 1);
    assert_eq!(operator.reset_stack().len(), 1);
}

/// Phase stacks only hold the operators that take part, in topological
/// order.
#[test]
fn stacks_are_sparse_and_ordered() {
    let log = Log::default();
    let (_, operator, [first, gate, last]) = stage_chain(&log);

    let execute: Vec<OperatorId> = operator.execute_stack().operator_ids().collect();
    assert_eq!(execute, ids(&[first, last]));

    let reset: Vec<OperatorId> = operator.reset_stack().operator_ids().collect();
    assert_eq!(reset, ids(&[first, gate, last]));
}

/// Enabling an operator splices it into the execute stack between its
/// neighbours; disabling it takes it out again.
#[test]
fn rebinding_splices_execute_stack() {
    let log = Log::default();
    let (graph, mut operator, [first, gate, last]) = stage_chain(&log);

    enable(&mut operator, &graph, true);
    let execute: Vec<OperatorId> = operator.execute_stack().operator_ids().collect();
    assert_eq!(execute, ids(&[first, gate, last]));

    operator.execute();
    assert_eq!(
        *log.lock(),
        vec!["execute:first", "execute:gate", "execute:last"]
    );

    enable(&mut operator, &graph, false);
    let execute: Vec<OperatorId> = operator.execute_stack().operator_ids().collect();
    assert_eq!(execute, ids(&[first, last]));
    assert_eq!(operator.post_execute_stack().len(), 3);
}

/// Execute, post-execute and reset each walk their stack in order, and
/// data written upstream is visible downstream within the block.
#[test]
fn phases_run_in_topological_order() {
    let log = Log::default();
    let (graph, mut operator, _) = stage_chain(&log);
    enable(&mut operator, &graph, true);

    let mut data = OperatorVertexData::new(&graph.vertex_interface());
    operator.bind_inputs(&mut data.inputs);
    operator.bind_outputs(&mut data.outputs);
    let out = data.outputs.data_read_reference::<f32>("Out");

    operator.execute();
    operator.post_execute();
    assert_eq!(*out.read(), 3.0);

    operator.reset(&ResetParams::default());
    assert_eq!(*out.read(), 0.0);

    assert_eq!(
        *log.lock(),
        vec![
            "execute:first",
            "execute:gate",
            "execute:last",
            "post:first",
            "post:gate",
            "post:last",
            "reset:first",
            "reset:gate",
            "reset:last",
        ]
    );
}

/// A graph operator nested in another graph forwards rebinds through its
/// own operators.
#[test]
fn nested_graph_propagates_rebind() {
    let (inner_graph, _) = passthrough_chain();

    let mut outer = Graph::new("outer");
    let head = outer.add_node(Node::new("head", PassthroughOperator::<f32>::vertex_interface()));
    let inner = outer.add_node(Node::new("inner", inner_graph.vertex_interface()));
    let tail = outer.add_node(Node::new("tail", PassthroughOperator::<f32>::vertex_interface()));
    outer.add_edge(head, "Out", inner, "In").unwrap();
    outer.add_edge(inner, "Out", tail, "In").unwrap();
    outer.add_input_vertex("In", head, "In").unwrap();
    outer.add_output_vertex("Out", tail, "Out").unwrap();

    let settings = OperatorSettings::default();
    let mut operator = RebindableGraphOperator::from_graph(&outer, &settings, |node, s| {
        if node.name() == "inner" {
            Box::new(RebindableGraphOperator::from_graph(&inner_graph, s, passthrough).unwrap())
        } else {
            passthrough(node, s)
        }
    })
    .unwrap();

    let mut data = OperatorVertexData::new(&outer.vertex_interface());
    let r1 = AnyDataReference::read(2.0f32);
    data.inputs.bind_vertex("In", r1.clone()).unwrap();
    operator.bind_inputs(&mut data.inputs);
    operator.bind_outputs(&mut data.outputs);

    assert_eq!(data.outputs.data_reference("Out").unwrap().id(), r1.id());
    assert!(operator.execute_function().is_none());
}

/// A nested graph with executing operators joins the outer execute stack.
#[test]
fn nested_graph_executes_inner_operators() {
    let log = Log::default();
    let mut inner_graph = Graph::new("inner");
    let stage = inner_graph.add_node(Node::new("inner-stage", Stage::interface(false)));
    inner_graph.add_input_vertex("In", stage, "In").unwrap();
    inner_graph.add_output_vertex("Out", stage, "Out").unwrap();

    let mut outer = Graph::new("outer");
    let first = outer.add_node(Node::new("outer-stage", Stage::interface(false)));
    let inner = outer.add_node(Node::new("inner", inner_graph.vertex_interface()));
    outer.add_edge(first, "Out", inner, "In").unwrap();
    outer.add_output_vertex("Out", inner, "Out").unwrap();

    let settings = OperatorSettings::default();
    let mut operator = RebindableGraphOperator::from_graph(&outer, &settings, |node, s| {
        let log = Arc::clone(&log);
        if node.name() == "inner" {
            Box::new(
                RebindableGraphOperator::from_graph(&inner_graph, s, move |node, s| {
                    Box::new(Stage::new(node.name(), false, Arc::clone(&log), s))
                })
                .unwrap(),
            )
        } else {
            Box::new(Stage::new(node.name(), false, log, s))
        }
    })
    .unwrap();

    assert_eq!(operator.execute_stack().len(), 2);
    operator.execute();
    assert_eq!(
        *log.lock(),
        vec!["execute:outer-stage", "execute:inner-stage"]
    );

    let mut data = OperatorVertexData::new(&outer.vertex_interface());
    operator.bind_outputs(&mut data.outputs);
    assert_eq!(*data.outputs.data_read_reference::<f32>("Out").read(), 2.0);
}

/// Bulk input access is not part of the graph operator's contract.
#[test]
#[should_panic(expected = "does not support bulk input access")]
fn bulk_inputs_panic() {
    let (graph, _) = passthrough_chain();
    let operator =
        RebindableGraphOperator::from_graph(&graph, &OperatorSettings::default(), passthrough)
            .unwrap();
    let _ = operator.inputs();
}
