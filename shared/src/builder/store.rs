//! Per-session editing state of a builder page.
//!
//! One store instance backs one builder page. It owns the loaded document,
//! the graph derived from it and the dialog currently open, and funnels every
//! edit through the adapters and the mutation engine.

use std::fmt;

use tracing::{debug, info, warn};

use super::graph::{self, BranchHandle, EdgeChange, FlowEdge, FlowGraph, FlowNode, NodeChange, NodeData};
use super::{funnel, workflow};
use crate::{ActionType, BuilderError, Funnel, FunnelStep, FunnelStepType, Workflow, WorkflowAction};

/// A document the builder can edit as a graph.
pub trait BuilderDocument: Clone + PartialEq + fmt::Debug {
    /// Payload carried by one editable node.
    type Step: Clone + PartialEq + fmt::Debug;
    /// What the "add" dialog lets the user pick.
    type StepKind: Copy + fmt::Debug;

    const ENTITY: &'static str;

    fn id(&self) -> &str;
    fn to_graph(&self) -> FlowGraph;
    fn from_graph(&self, graph: &FlowGraph) -> Self;

    fn insert(graph: &FlowGraph, parent_node_id: &str, source_handle: Option<BranchHandle>, kind: Self::StepKind)
    -> FlowGraph;
    fn remove(graph: &FlowGraph, node_id: &str) -> FlowGraph;

    fn step_payload(node: &FlowNode) -> Option<Self::Step>;
    /// Writes `step` into `node`. Returns false when the node cannot carry it.
    fn apply_payload(node: &mut FlowNode, step: Self::Step) -> bool;
}

impl BuilderDocument for Workflow {
    type Step = WorkflowAction;
    type StepKind = ActionType;

    const ENTITY: &'static str = "workflow";

    fn id(&self) -> &str {
        &self.id
    }

    fn to_graph(&self) -> FlowGraph {
        workflow::workflow_to_graph(self)
    }

    fn from_graph(&self, graph: &FlowGraph) -> Self {
        workflow::graph_to_workflow(self, graph)
    }

    fn insert(graph: &FlowGraph, parent_node_id: &str, source_handle: Option<BranchHandle>, kind: ActionType) -> FlowGraph {
        workflow::insert_action(graph, parent_node_id, source_handle, WorkflowAction::draft(kind))
    }

    fn remove(graph: &FlowGraph, node_id: &str) -> FlowGraph {
        workflow::remove_action(graph, node_id)
    }

    fn step_payload(node: &FlowNode) -> Option<WorkflowAction> {
        node.as_action().cloned()
    }

    fn apply_payload(node: &mut FlowNode, action: WorkflowAction) -> bool {
        // The action type decides the node's place in the tree, so it is fixed once inserted.
        match node.as_action() {
            Some(current) if current.action_type == action.action_type => {
                node.data = NodeData::Action(action.without_branches());
                true
            }
            _ => false,
        }
    }
}

impl BuilderDocument for Funnel {
    type Step = FunnelStep;
    type StepKind = FunnelStepType;

    const ENTITY: &'static str = "funnel";

    fn id(&self) -> &str {
        &self.id
    }

    fn to_graph(&self) -> FlowGraph {
        funnel::funnel_to_graph(self)
    }

    fn from_graph(&self, graph: &FlowGraph) -> Self {
        funnel::graph_to_funnel(self, graph)
    }

    fn insert(graph: &FlowGraph, parent_node_id: &str, _: Option<BranchHandle>, kind: FunnelStepType) -> FlowGraph {
        funnel::insert_step(graph, parent_node_id, FunnelStep::draft(kind))
    }

    fn remove(graph: &FlowGraph, node_id: &str) -> FlowGraph {
        funnel::remove_step(graph, node_id)
    }

    fn step_payload(node: &FlowNode) -> Option<FunnelStep> {
        node.as_step().cloned()
    }

    fn apply_payload(node: &mut FlowNode, mut step: FunnelStep) -> bool {
        if node.as_step().is_none() {
            return false;
        }
        // Node id and step id are the same thing for funnels.
        step.id = node.id.clone();
        node.kind = step.step_type.into();
        node.data = NodeData::Step(step);
        true
    }
}

/// The one dialog a builder page can show at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogState<S> {
    None,
    AddStep {
        parent_node_id: String,
    },
    AddAction {
        parent_node_id: String,
        source_handle: Option<BranchHandle>,
    },
    EditStep {
        step: S,
        node_id: String,
    },
    DeleteStep {
        node_id: String,
    },
}

impl<S> Default for DialogState<S> {
    fn default() -> Self {
        DialogState::None
    }
}

impl<S> DialogState<S> {
    pub fn is_open(&self) -> bool {
        !matches!(self, DialogState::None)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuilderStore<D: BuilderDocument> {
    document: Option<D>,
    graph: FlowGraph,
    dialog: DialogState<D::Step>,
    saving: bool,
}

pub type WorkflowBuilder = BuilderStore<Workflow>;
pub type FunnelBuilder = BuilderStore<Funnel>;

impl<D: BuilderDocument> Default for BuilderStore<D> {
    fn default() -> Self {
        Self {
            document: None,
            graph: FlowGraph::default(),
            dialog: DialogState::None,
            saving: false,
        }
    }
}

impl<D: BuilderDocument> BuilderStore<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loaded(document: D) -> Self {
        let mut store = Self::new();
        store.load(document);
        store
    }

    /// Replaces the document and derives a fresh graph from it. Any open dialog is closed.
    pub fn load(&mut self, document: D) {
        self.graph = document.to_graph();
        info!(
            entity = D::ENTITY,
            id = %document.id(),
            nodes = self.graph.nodes.len(),
            edges = self.graph.edges.len(),
            "builder loaded"
        );
        self.document = Some(document);
        self.dialog = DialogState::None;
        self.saving = false;
    }

    pub fn document(&self) -> Option<&D> {
        self.document.as_ref()
    }

    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    pub fn nodes(&self) -> &[FlowNode] {
        &self.graph.nodes
    }

    pub fn edges(&self) -> &[FlowEdge] {
        &self.graph.edges
    }

    pub fn dialog(&self) -> &DialogState<D::Step> {
        &self.dialog
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn apply_node_changes(&mut self, changes: &[NodeChange]) {
        self.graph.nodes = graph::apply_node_changes(changes, &self.graph.nodes);
    }

    pub fn apply_edge_changes(&mut self, changes: &[EdgeChange]) {
        self.graph.edges = graph::apply_edge_changes(changes, &self.graph.edges);
    }

    pub fn open_dialog(&mut self, dialog: DialogState<D::Step>) {
        self.dialog = dialog;
    }

    /// Opens the edit dialog pre-filled with the node's current payload.
    pub fn open_edit(&mut self, node_id: &str) {
        if let Some(step) = self.graph.node(node_id).and_then(D::step_payload) {
            self.dialog = DialogState::EditStep {
                step,
                node_id: node_id.to_string(),
            };
        }
    }

    pub fn close_dialog(&mut self) {
        self.dialog = DialogState::None;
    }

    /// Replaces one node's payload. Edges and positions are left alone.
    pub fn update_step_data(&mut self, node_id: &str, step: D::Step) -> bool {
        let updated = self
            .graph
            .node_mut(node_id)
            .is_some_and(|node| D::apply_payload(node, step));
        if !updated {
            debug!(entity = D::ENTITY, node_id, "update_step_data: no editable node, ignoring");
        }
        updated
    }

    pub fn insert_step(&mut self, parent_node_id: &str, source_handle: Option<BranchHandle>, kind: D::StepKind) {
        debug!(entity = D::ENTITY, parent_node_id, ?source_handle, ?kind, "inserting step");
        self.graph = D::insert(&self.graph, parent_node_id, source_handle, kind);
    }

    pub fn delete_step(&mut self, node_id: &str) {
        debug!(entity = D::ENTITY, node_id, "deleting step");
        self.graph = D::remove(&self.graph, node_id);
    }

    /// Completes an open add dialog with the picked kind.
    pub fn submit_add(&mut self, kind: D::StepKind) {
        match std::mem::take(&mut self.dialog) {
            DialogState::AddStep { parent_node_id } => self.insert_step(&parent_node_id, None, kind),
            DialogState::AddAction {
                parent_node_id,
                source_handle,
            } => self.insert_step(&parent_node_id, source_handle, kind),
            other => self.dialog = other,
        }
    }

    /// Completes an open edit dialog. The dialog stays open if the node is gone.
    pub fn submit_edit(&mut self, step: D::Step) -> bool {
        let DialogState::EditStep { node_id, .. } = &self.dialog else {
            return false;
        };
        let node_id = node_id.clone();
        let updated = self.update_step_data(&node_id, step);
        if updated {
            self.dialog = DialogState::None;
        }
        updated
    }

    pub fn confirm_delete(&mut self) {
        match std::mem::take(&mut self.dialog) {
            DialogState::DeleteStep { node_id } => self.delete_step(&node_id),
            other => self.dialog = other,
        }
    }

    /// The document as it should be persisted, or `None` before anything is loaded.
    pub fn persistable_payload(&self) -> Option<D> {
        self.document.as_ref().map(|document| document.from_graph(&self.graph))
    }

    /// Marks a save as pending and returns what to send.
    pub fn begin_save(&mut self) -> Result<D, BuilderError> {
        if self.saving {
            return Err(BuilderError::SaveInFlight);
        }
        let payload = self
            .persistable_payload()
            .ok_or_else(|| BuilderError::NotFound(D::ENTITY.to_string()))?;
        self.saving = true;
        Ok(payload)
    }

    /// Ends the pending save. On success the server copy becomes the loaded
    /// document; the graph is kept as the user left it either way.
    pub fn finish_save(&mut self, result: Result<D, BuilderError>) -> Result<(), BuilderError> {
        self.saving = false;
        match result {
            Ok(saved) => {
                info!(entity = D::ENTITY, id = %saved.id(), "saved");
                self.document = Some(saved);
                Ok(())
            }
            Err(err) => {
                warn!(entity = D::ENTITY, error = %err, "save failed");
                Err(err)
            }
        }
    }
}
