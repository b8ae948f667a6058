//! Node/edge graph rendered by the builder canvas.
//!
//! The shapes serialize the way the canvas expects them:
//! `{id, type, position: {x, y}, data, deletable?}` for nodes and
//! `{id, source, target, sourceHandle?, label?}` for edges.

use serde::{Deserialize, Serialize};

use crate::{FunnelStep, FunnelStepType, TriggerType, WorkflowAction, WorkflowTrigger};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Renderer tag of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Trigger,
    Action,
    Placeholder,
    Page,
    Form,
    Upsell,
    ThankYou,
}

impl From<FunnelStepType> for NodeKind {
    fn from(step_type: FunnelStepType) -> Self {
        match step_type {
            FunnelStepType::Page => NodeKind::Page,
            FunnelStepType::Form => NodeKind::Form,
            FunnelStepType::Upsell => NodeKind::Upsell,
            FunnelStepType::ThankYou => NodeKind::ThankYou,
        }
    }
}

/// Named output of an `if_else` node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchHandle {
    Yes,
    No,
}

impl BranchHandle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BranchHandle::Yes => "yes",
            BranchHandle::No => "no",
        }
    }

    /// Edge label shown on the canvas.
    pub fn label(&self) -> &'static str {
        match self {
            BranchHandle::Yes => "Yes",
            BranchHandle::No => "No",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerData {
    pub label: String,
    #[serde(rename = "type")]
    pub trigger_type: TriggerType,
}

impl From<&WorkflowTrigger> for TriggerData {
    fn from(trigger: &WorkflowTrigger) -> Self {
        Self {
            label: trigger.name.clone(),
            trigger_type: trigger.trigger_type,
        }
    }
}

impl From<&TriggerData> for WorkflowTrigger {
    fn from(data: &TriggerData) -> Self {
        Self {
            trigger_type: data.trigger_type,
            name: data.label.clone(),
        }
    }
}

/// Insertion point payload: where a step added from this placeholder goes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_node_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<BranchHandle>,
}

/// Payload carried by a node. Variant order matters for deserialization:
/// the placeholder accepts any object and has to come last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeData {
    Step(FunnelStep),
    Action(WorkflowAction),
    Trigger(TriggerData),
    Placeholder(PlaceholderData),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub position: Position,
    pub data: NodeData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletable: Option<bool>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub selected: bool,
}

impl FlowNode {
    pub fn new(id: impl Into<String>, kind: NodeKind, position: Position, data: NodeData) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
            data,
            deletable: None,
            selected: false,
        }
    }

    pub fn step(step: FunnelStep, position: Position) -> Self {
        Self::new(step.id.clone(), step.step_type.into(), position, NodeData::Step(step))
    }

    pub fn action(id: impl Into<String>, action: WorkflowAction, position: Position) -> Self {
        Self::new(id, NodeKind::Action, position, NodeData::Action(action))
    }

    pub fn placeholder(id: impl Into<String>, position: Position, data: PlaceholderData) -> Self {
        Self::new(id, NodeKind::Placeholder, position, NodeData::Placeholder(data))
    }

    pub fn is_placeholder(&self) -> bool {
        self.kind == NodeKind::Placeholder
    }

    pub fn is_deletable(&self) -> bool {
        !self.is_placeholder() && self.deletable != Some(false)
    }

    pub fn as_step(&self) -> Option<&FunnelStep> {
        match &self.data {
            NodeData::Step(step) if !self.is_placeholder() => Some(step),
            _ => None,
        }
    }

    pub fn as_action(&self) -> Option<&WorkflowAction> {
        match &self.data {
            NodeData::Action(action) if self.kind == NodeKind::Action => Some(action),
            _ => None,
        }
    }

    pub fn as_trigger(&self) -> Option<&TriggerData> {
        match &self.data {
            NodeData::Trigger(trigger) => Some(trigger),
            _ => None,
        }
    }

    pub fn as_placeholder(&self) -> Option<&PlaceholderData> {
        match &self.data {
            NodeData::Placeholder(data) => Some(data),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<BranchHandle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub selected: bool,
}

impl FlowEdge {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            id: format!("{}-{}", source, target),
            source: source.to_string(),
            target: target.to_string(),
            source_handle: None,
            label: None,
            selected: false,
        }
    }

    /// Edge leaving an `if_else` node through one of its handles.
    pub fn branch(source: &str, target: &str, handle: BranchHandle) -> Self {
        Self {
            source_handle: Some(handle),
            label: Some(handle.label().to_string()),
            ..Self::new(source, target)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

impl FlowGraph {
    pub fn new(nodes: Vec<FlowNode>, edges: Vec<FlowEdge>) -> Self {
        Self { nodes, edges }
    }

    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut FlowNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn outgoing<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a FlowEdge> + 'a {
        self.edges.iter().filter(move |e| e.source == id)
    }

    pub fn incoming<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a FlowEdge> + 'a {
        self.edges.iter().filter(move |e| e.target == id)
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &FlowNode> {
        self.nodes.iter().filter(|n| n.is_placeholder())
    }
}

/// Position/selection delta emitted by the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeChange {
    Position {
        id: String,
        #[serde(default)]
        position: Option<Position>,
        #[serde(default)]
        dragging: Option<bool>,
    },
    Select {
        id: String,
        selected: bool,
    },
    Remove {
        id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EdgeChange {
    Select { id: String, selected: bool },
    Remove { id: String },
}

/// Merges canvas deltas into a node list. Changes naming unknown ids are skipped,
/// and removal of non-deletable nodes is ignored.
pub fn apply_node_changes(changes: &[NodeChange], nodes: &[FlowNode]) -> Vec<FlowNode> {
    let mut nodes = nodes.to_vec();
    for change in changes {
        match change {
            NodeChange::Position { id, position, .. } => {
                if let (Some(node), Some(position)) = (nodes.iter_mut().find(|n| &n.id == id), position) {
                    node.position = *position;
                }
            }
            NodeChange::Select { id, selected } => {
                if let Some(node) = nodes.iter_mut().find(|n| &n.id == id) {
                    node.selected = *selected;
                }
            }
            NodeChange::Remove { id } => {
                nodes.retain(|n| &n.id != id || n.deletable == Some(false));
            }
        }
    }
    nodes
}

pub fn apply_edge_changes(changes: &[EdgeChange], edges: &[FlowEdge]) -> Vec<FlowEdge> {
    let mut edges = edges.to_vec();
    for change in changes {
        match change {
            EdgeChange::Select { id, selected } => {
                if let Some(edge) = edges.iter_mut().find(|e| &e.id == id) {
                    edge.selected = *selected;
                }
            }
            EdgeChange::Remove { id } => edges.retain(|e| &e.id != id),
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ActionType;
    use serde_json::json;

    fn sample_nodes() -> Vec<FlowNode> {
        vec![
            FlowNode {
                deletable: Some(false),
                ..FlowNode::new(
                    "trigger",
                    NodeKind::Trigger,
                    Position::default(),
                    NodeData::Trigger(TriggerData::from(&WorkflowTrigger::default())),
                )
            },
            FlowNode::action(
                "action-0",
                WorkflowAction::new(ActionType::Wait, "Pause", "Wait 2 days"),
                Position::new(0.0, 200.0),
            ),
        ]
    }

    #[test]
    fn node_serializes_in_canvas_shape() {
        let node = FlowNode::placeholder(
            "final-placeholder",
            Position::new(0.0, 400.0),
            PlaceholderData {
                label: Some("Add action".to_string()),
                parent_node_id: Some("action-0".to_string()),
                source_handle: None,
            },
        );
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({
                "id": "final-placeholder",
                "type": "placeholder",
                "position": {"x": 0.0, "y": 400.0},
                "data": {"label": "Add action", "parentNodeId": "action-0"}
            })
        );
    }

    #[test]
    fn node_data_deserializes_to_the_right_variant() {
        let step: NodeData =
            serde_json::from_value(json!({"id": "s1", "type": "form", "name": "Opt-in", "path": "/opt-in"})).unwrap();
        assert!(matches!(step, NodeData::Step(_)));

        let action: NodeData =
            serde_json::from_value(json!({"type": "add_tag", "name": "Tag", "details": "vip"})).unwrap();
        assert!(matches!(action, NodeData::Action(_)));

        let trigger: NodeData =
            serde_json::from_value(json!({"label": "New contact", "type": "contact_created"})).unwrap();
        assert!(matches!(trigger, NodeData::Trigger(_)));

        let placeholder: NodeData = serde_json::from_value(json!({"parentNodeId": "s1"})).unwrap();
        assert!(matches!(placeholder, NodeData::Placeholder(_)));
    }

    #[test]
    fn branch_edge_carries_handle_and_label() {
        let edge = FlowEdge::branch("action-1", "action-1-yes-placeholder", BranchHandle::Yes);
        assert_eq!(edge.id, "action-1-action-1-yes-placeholder");
        assert_eq!(edge.source_handle, Some(BranchHandle::Yes));
        assert_eq!(edge.label.as_deref(), Some("Yes"));
    }

    #[test]
    fn position_changes_merge_into_nodes() {
        let nodes = sample_nodes();
        let changes = vec![
            NodeChange::Position {
                id: "action-0".to_string(),
                position: Some(Position::new(40.0, 260.0)),
                dragging: Some(true),
            },
            NodeChange::Position {
                id: "missing".to_string(),
                position: Some(Position::new(1.0, 1.0)),
                dragging: None,
            },
            NodeChange::Select {
                id: "trigger".to_string(),
                selected: true,
            },
        ];

        let updated = apply_node_changes(&changes, &nodes);
        assert_eq!(updated[1].position, Position::new(40.0, 260.0));
        assert!(updated[0].selected);
        assert_eq!(nodes[1].position, Position::new(0.0, 200.0));
    }

    #[test]
    fn remove_change_respects_deletable_flag() {
        let nodes = sample_nodes();
        let changes = vec![
            NodeChange::Remove { id: "trigger".to_string() },
            NodeChange::Remove { id: "action-0".to_string() },
        ];
        let updated = apply_node_changes(&changes, &nodes);
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].id, "trigger");
    }

    #[test]
    fn edge_changes_select_and_remove() {
        let edges = vec![FlowEdge::new("a", "b"), FlowEdge::new("b", "c")];
        let updated = apply_edge_changes(
            &[
                EdgeChange::Select { id: "a-b".to_string(), selected: true },
                EdgeChange::Remove { id: "b-c".to_string() },
            ],
            &edges,
        );
        assert_eq!(updated.len(), 1);
        assert!(updated[0].selected);
    }
}
