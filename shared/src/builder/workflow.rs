//! Workflow ⇄ graph adapter and the branch-aware mutation engine.
//!
//! A workflow is a tree: a sequence of actions where an `if_else` closes its
//! sequence and owns a "yes" and a "no" sequence. The graph is a pre-order
//! layout of that tree under a fixed trigger node. Structural edits reduce the
//! graph back to the tree, edit the tree and lay it out again, so the layout
//! after any insert or delete is the same one a fresh load would produce.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use super::graph::{BranchHandle, FlowEdge, FlowGraph, FlowNode, NodeData, NodeKind, PlaceholderData, Position};
use super::layout::{FINAL_PLACEHOLDER_ID, HORIZONTAL_GAP, ROW_SPACING};
use crate::{BranchPaths, Workflow, WorkflowAction, WorkflowTrigger};

pub const TRIGGER_NODE_ID: &str = "trigger";

/// Builds the canvas graph for a workflow.
pub fn workflow_to_graph(workflow: &Workflow) -> FlowGraph {
    layout_tree(&workflow.trigger, &workflow.actions)
}

/// Rebuilds `actions` by walking edges from the trigger. Action nodes the walk
/// never reaches are appended chain by chain, heads in ascending y.
pub fn graph_to_workflow(original: &Workflow, graph: &FlowGraph) -> Workflow {
    Workflow {
        actions: rebuild(graph).actions,
        ..original.clone()
    }
}

/// Inserts `action` after `parent_node_id`.
///
/// After an `if_else` the action goes at the head of the branch named by
/// `source_handle`; without a handle nothing happens. A placeholder parent
/// stands for the insertion point it represents. Inserting an `if_else` in
/// the middle of a chain moves the former downstream actions into its "yes"
/// branch, so whatever used to follow the parent now follows the new node.
pub fn insert_action(
    graph: &FlowGraph,
    parent_node_id: &str,
    source_handle: Option<BranchHandle>,
    action: WorkflowAction,
) -> FlowGraph {
    let Some(parent) = graph.node(parent_node_id) else {
        debug!(parent_node_id, "insert_action: unknown parent, ignoring");
        return graph.clone();
    };
    if let Some(data) = parent.as_placeholder() {
        return match data.parent_node_id.as_deref() {
            Some(real_parent) if real_parent != parent_node_id => {
                insert_action(graph, real_parent, data.source_handle, action)
            }
            _ => graph.clone(),
        };
    }
    let Some(trigger) = trigger_of(graph) else {
        debug!("insert_action: graph has no trigger, ignoring");
        return graph.clone();
    };

    let Rebuilt { mut actions, paths } = rebuild(graph);
    let (branches, at) = if parent_node_id == TRIGGER_NODE_ID {
        (Vec::new(), 0)
    } else {
        let Some(path) = paths.get(parent_node_id) else {
            debug!(parent_node_id, "insert_action: parent is not an action, ignoring");
            return graph.clone();
        };
        if parent.as_action().is_some_and(WorkflowAction::is_branch) {
            let Some(handle) = source_handle else {
                debug!(parent_node_id, "insert_action: branch parent needs a handle, ignoring");
                return graph.clone();
            };
            let mut branches = path.branches.clone();
            branches.push((path.index, handle));
            (branches, 0)
        } else {
            (path.branches.clone(), path.index + 1)
        }
    };

    let Some(list) = list_at(&mut actions, &branches) else {
        return graph.clone();
    };
    splice(list, at, action);
    layout_tree(&trigger, &actions)
}

/// Removes an action node. Its predecessor then feeds its successor directly.
/// Removing an `if_else` removes both of its branches with it.
pub fn remove_action(graph: &FlowGraph, node_id: &str) -> FlowGraph {
    match graph.node(node_id) {
        Some(node) if node.is_deletable() && node.as_action().is_some() => {}
        _ => {
            debug!(node_id, "remove_action: not a removable action, ignoring");
            return graph.clone();
        }
    }
    let Some(trigger) = trigger_of(graph) else {
        return graph.clone();
    };

    let Rebuilt { mut actions, paths } = rebuild(graph);
    let removed = paths
        .get(node_id)
        .and_then(|path| list_at(&mut actions, &path.branches).map(|list| list.remove(path.index)));
    if removed.is_none() {
        return graph.clone();
    }
    layout_tree(&trigger, &actions)
}

fn trigger_of(graph: &FlowGraph) -> Option<WorkflowTrigger> {
    graph
        .node(TRIGGER_NODE_ID)
        .and_then(FlowNode::as_trigger)
        .map(WorkflowTrigger::from)
}

fn branch_mut(paths: &mut BranchPaths, handle: BranchHandle) -> &mut Vec<WorkflowAction> {
    match handle {
        BranchHandle::Yes => &mut paths.yes,
        BranchHandle::No => &mut paths.no,
    }
}

/// Inserts into a sequence. A new `if_else` adopts the rest of its chain as its "yes" branch.
fn splice(list: &mut Vec<WorkflowAction>, at: usize, mut action: WorkflowAction) {
    let at = at.min(list.len());
    if action.is_branch() {
        let end = list[at..]
            .iter()
            .position(WorkflowAction::is_branch)
            .map_or(list.len(), |i| at + i + 1);
        let downstream: Vec<WorkflowAction> = list.drain(at..end).collect();
        if !downstream.is_empty() {
            let paths = action.branches.get_or_insert_with(BranchPaths::default);
            paths.yes.splice(0..0, downstream);
        }
    }
    list.insert(at, action);
}

/// Location of an action in the tree: the branch hops from the top-level
/// sequence, then the index in the sequence reached.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ActionPath {
    branches: Vec<(usize, BranchHandle)>,
    index: usize,
}

fn list_at<'a>(
    actions: &'a mut Vec<WorkflowAction>,
    branches: &[(usize, BranchHandle)],
) -> Option<&'a mut Vec<WorkflowAction>> {
    let mut list = actions;
    for (index, handle) in branches {
        let paths = list.get_mut(*index)?.branches.get_or_insert_with(BranchPaths::default);
        list = branch_mut(paths, *handle);
    }
    Some(list)
}

// ===== Layout =====

fn width(actions: &[WorkflowAction]) -> usize {
    actions
        .iter()
        .map(|action| match (&action.branches, action.is_branch()) {
            (Some(paths), true) => width(&paths.yes) + width(&paths.no),
            (None, true) => 2,
            _ => 1,
        })
        .max()
        .unwrap_or(1)
}

/// Where the next node of a sequence hangs from.
#[derive(Debug, Clone)]
struct Attach {
    source: String,
    handle: Option<BranchHandle>,
}

impl Attach {
    fn after(source: &str) -> Self {
        Self {
            source: source.to_string(),
            handle: None,
        }
    }

    fn edge_to(&self, target: &str) -> FlowEdge {
        match self.handle {
            Some(handle) => FlowEdge::branch(&self.source, target, handle),
            None => FlowEdge::new(&self.source, target),
        }
    }
}

struct SequenceEnd {
    /// y of the lowest node placed, placeholders included.
    bottom: f64,
    /// Set unless the sequence closed on an `if_else`.
    open: Option<Attach>,
}

#[derive(Default)]
struct TreeLayout {
    nodes: Vec<FlowNode>,
    edges: Vec<FlowEdge>,
    warned_detached: bool,
}

fn layout_tree(trigger: &WorkflowTrigger, actions: &[WorkflowAction]) -> FlowGraph {
    let mut layout = TreeLayout::default();
    layout.nodes.push(FlowNode {
        deletable: Some(false),
        ..FlowNode::new(
            TRIGGER_NODE_ID,
            NodeKind::Trigger,
            Position::default(),
            NodeData::Trigger(trigger.into()),
        )
    });

    let end = layout.lay_sequence(
        actions,
        &|i| format!("action-{}", i),
        0.0,
        ROW_SPACING,
        Attach::after(TRIGGER_NODE_ID),
    );
    if let Some(open) = end.open {
        layout.placeholder(FINAL_PLACEHOLDER_ID, Position::new(0.0, end.bottom + ROW_SPACING), open, "Add action");
    }

    FlowGraph::new(layout.nodes, layout.edges)
}

impl TreeLayout {
    /// Stacks `actions` downwards from `y` at column `x`. Actions found after
    /// an `if_else` cannot hang from it; they start a detached chain below the
    /// branches.
    fn lay_sequence(
        &mut self,
        actions: &[WorkflowAction],
        ids: &dyn Fn(usize) -> String,
        x: f64,
        y: f64,
        attach: Attach,
    ) -> SequenceEnd {
        let mut open = Some(attach);
        let mut bottom = y - ROW_SPACING;

        for (i, action) in actions.iter().enumerate() {
            let id = ids(i);
            let node_y = bottom + ROW_SPACING;
            match open.take() {
                Some(attach) => self.edges.push(attach.edge_to(&id)),
                None if !self.warned_detached => {
                    warn!(node_id = %id, "actions after an if_else are not connected to the flow");
                    self.warned_detached = true;
                }
                None => {}
            }
            self.nodes.push(FlowNode::action(&id, action.without_branches(), Position::new(x, node_y)));
            bottom = node_y;

            if action.is_branch() {
                bottom = self.lay_branches(&id, action.branches.as_ref(), x, node_y);
            } else {
                if action.branches.as_ref().is_some_and(|b| !b.is_empty()) {
                    warn!(node_id = %id, "branches on a non if_else action are ignored");
                }
                open = Some(Attach::after(&id));
            }
        }

        SequenceEnd { bottom, open }
    }

    fn lay_branches(&mut self, branch_id: &str, branches: Option<&BranchPaths>, x: f64, y: f64) -> f64 {
        let empty = BranchPaths::default();
        let branches = branches.unwrap_or(&empty);
        let offset = HORIZONTAL_GAP * width(&branches.yes).max(width(&branches.no)) as f64;

        let mut bottom = y;
        for (handle, list, branch_x) in [
            (BranchHandle::Yes, &branches.yes, x - offset),
            (BranchHandle::No, &branches.no, x + offset),
        ] {
            let ids = |j: usize| format!("{}-{}-{}", branch_id, handle.as_str(), j);
            let attach = Attach {
                source: branch_id.to_string(),
                handle: Some(handle),
            };
            let end = self.lay_sequence(list, &ids, branch_x, y + ROW_SPACING, attach);

            let mut branch_bottom = end.bottom;
            if let Some(open) = end.open {
                branch_bottom += ROW_SPACING;
                let label = format!("Add action for {}", handle.as_str().to_uppercase());
                self.placeholder(
                    &format!("{}-{}-placeholder", branch_id, handle.as_str()),
                    Position::new(branch_x, branch_bottom),
                    open,
                    &label,
                );
            }
            bottom = bottom.max(branch_bottom);
        }
        bottom
    }

    fn placeholder(&mut self, id: &str, position: Position, open: Attach, label: &str) {
        self.edges.push(open.edge_to(id));
        self.nodes.push(FlowNode::placeholder(
            id,
            position,
            PlaceholderData {
                label: Some(label.to_string()),
                parent_node_id: Some(open.source),
                source_handle: open.handle,
            },
        ));
    }
}

// ===== Reconstruction =====

struct Rebuilt {
    actions: Vec<WorkflowAction>,
    paths: HashMap<String, ActionPath>,
}

struct Walker<'a> {
    graph: &'a FlowGraph,
    visited: HashSet<&'a str>,
    paths: HashMap<String, ActionPath>,
}

fn rebuild(graph: &FlowGraph) -> Rebuilt {
    let mut walker = Walker {
        graph,
        visited: HashSet::new(),
        paths: HashMap::new(),
    };
    let mut actions = Vec::new();

    let first = walker.next(TRIGGER_NODE_ID, None);
    walker.walk(first, &[], &mut actions);

    let mut stray: Vec<&FlowNode> = graph
        .nodes
        .iter()
        .filter(|n| n.as_action().is_some() && !walker.visited.contains(n.id.as_str()))
        .collect();
    stray.sort_by(|a, b| a.position.y.total_cmp(&b.position.y));
    let stray_ids: HashSet<&str> = stray.iter().map(|n| n.id.as_str()).collect();
    let (heads, rest): (Vec<&FlowNode>, Vec<&FlowNode>) = stray
        .into_iter()
        .partition(|n| !graph.incoming(&n.id).any(|e| stray_ids.contains(e.source.as_str())));

    for start in heads.into_iter().chain(rest) {
        if !walker.visited.contains(start.id.as_str()) {
            walker.walk(Some(start), &[], &mut actions);
        }
    }

    Rebuilt {
        actions,
        paths: walker.paths,
    }
}

impl<'a> Walker<'a> {
    fn next(&self, source: &str, handle: Option<BranchHandle>) -> Option<&'a FlowNode> {
        let graph = self.graph;
        graph
            .edges
            .iter()
            .filter(|e| e.source == source && e.source_handle == handle)
            .find_map(|e| graph.node(&e.target))
    }

    fn walk(&mut self, first: Option<&'a FlowNode>, prefix: &[(usize, BranchHandle)], list: &mut Vec<WorkflowAction>) {
        let mut current = first;
        while let Some(node) = current {
            let Some(action) = node.as_action() else {
                break;
            };
            if !self.visited.insert(node.id.as_str()) {
                break;
            }

            let index = list.len();
            self.paths.insert(
                node.id.clone(),
                ActionPath {
                    branches: prefix.to_vec(),
                    index,
                },
            );

            let mut action = action.without_branches();
            if action.is_branch() {
                let mut paths = BranchPaths::default();
                for handle in [BranchHandle::Yes, BranchHandle::No] {
                    let mut nested = prefix.to_vec();
                    nested.push((index, handle));
                    let head = self.next(&node.id, Some(handle));
                    self.walk(head, &nested, branch_mut(&mut paths, handle));
                }
                if !paths.is_empty() {
                    action.branches = Some(paths);
                }
                list.push(action);
                break;
            }

            list.push(action);
            current = self.next(&node.id, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ActionType, Status, TriggerType};
    use chrono::{TimeZone, Utc};

    fn action(action_type: ActionType, name: &str) -> WorkflowAction {
        WorkflowAction::new(action_type, name, format!("{} details", name))
    }

    fn branch(name: &str, yes: Vec<WorkflowAction>, no: Vec<WorkflowAction>) -> WorkflowAction {
        WorkflowAction {
            branches: Some(BranchPaths { yes, no }),
            ..action(ActionType::IfElse, name)
        }
    }

    fn workflow(actions: Vec<WorkflowAction>) -> Workflow {
        Workflow {
            id: "wf-1".to_string(),
            name: "Welcome sequence".to_string(),
            trigger: WorkflowTrigger {
                trigger_type: TriggerType::FormSubmitted,
                name: "Newsletter form submitted".to_string(),
            },
            actions,
            status: Status::Active,
            created_at: Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap(),
        }
    }

    fn ids(graph: &FlowGraph) -> Vec<&str> {
        graph.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    fn edge_pairs(graph: &FlowGraph) -> Vec<(&str, &str, Option<BranchHandle>)> {
        graph
            .edges
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str(), e.source_handle))
            .collect()
    }

    #[test]
    fn linear_workflow_chains_from_trigger_to_final_placeholder() {
        let graph = workflow_to_graph(&workflow(vec![
            action(ActionType::SendEmail, "Welcome"),
            action(ActionType::Wait, "Pause"),
        ]));

        assert_eq!(ids(&graph), ["trigger", "action-0", "action-1", FINAL_PLACEHOLDER_ID]);
        assert_eq!(
            edge_pairs(&graph),
            [
                ("trigger", "action-0", None),
                ("action-0", "action-1", None),
                ("action-1", FINAL_PLACEHOLDER_ID, None),
            ]
        );
        let ys: Vec<f64> = graph.nodes.iter().map(|n| n.position.y).collect();
        assert_eq!(ys, [0.0, 200.0, 400.0, 600.0]);
        assert_eq!(graph.nodes[0].deletable, Some(false));
    }

    #[test]
    fn if_else_terminates_chain_with_two_placeholders() {
        let graph = workflow_to_graph(&workflow(vec![
            action(ActionType::SendEmail, "Welcome"),
            action(ActionType::IfElse, "Opened?"),
        ]));

        assert_eq!(
            ids(&graph),
            ["trigger", "action-0", "action-1", "action-1-yes-placeholder", "action-1-no-placeholder"]
        );
        assert_eq!(
            edge_pairs(&graph),
            [
                ("trigger", "action-0", None),
                ("action-0", "action-1", None),
                ("action-1", "action-1-yes-placeholder", Some(BranchHandle::Yes)),
                ("action-1", "action-1-no-placeholder", Some(BranchHandle::No)),
            ]
        );
        assert!(graph.node(FINAL_PLACEHOLDER_ID).is_none());

        let yes = graph.node("action-1-yes-placeholder").unwrap();
        let no = graph.node("action-1-no-placeholder").unwrap();
        assert_eq!(yes.position, Position::new(-HORIZONTAL_GAP, 600.0));
        assert_eq!(no.position, Position::new(HORIZONTAL_GAP, 600.0));
        assert_eq!(yes.as_placeholder().unwrap().source_handle, Some(BranchHandle::Yes));
        assert_eq!(graph.edges[3].label.as_deref(), Some("No"));
    }

    #[test]
    fn empty_workflow_has_placeholder_under_trigger() {
        let graph = workflow_to_graph(&workflow(vec![]));
        assert_eq!(ids(&graph), ["trigger", FINAL_PLACEHOLDER_ID]);
        assert_eq!(edge_pairs(&graph), [("trigger", FINAL_PLACEHOLDER_ID, None)]);
    }

    #[test]
    fn nested_branches_do_not_overlap() {
        let graph = workflow_to_graph(&workflow(vec![branch(
            "Outer",
            vec![branch("Inner", vec![], vec![])],
            vec![],
        )]));

        let x = |id: &str| graph.node(id).unwrap().position.x;
        assert_eq!(x("action-0-yes-0"), -300.0);
        assert_eq!(x("action-0-no-placeholder"), 300.0);
        assert_eq!(x("action-0-yes-0-yes-placeholder"), -450.0);
        assert_eq!(x("action-0-yes-0-no-placeholder"), -150.0);
    }

    #[test]
    fn forward_is_deterministic() {
        let wf = workflow(vec![
            action(ActionType::AddTag, "Tag"),
            branch("Clicked?", vec![action(ActionType::SendSms, "Text")], vec![]),
        ]);
        assert_eq!(workflow_to_graph(&wf), workflow_to_graph(&wf.clone()));
    }

    #[test]
    fn round_trip_preserves_linear_actions() {
        let original = workflow(vec![
            action(ActionType::SendEmail, "Welcome"),
            action(ActionType::Wait, "Pause"),
            action(ActionType::AddTag, "Tag"),
            action(ActionType::SendSms, "Reminder"),
        ]);
        assert_eq!(graph_to_workflow(&original, &workflow_to_graph(&original)), original);
    }

    #[test]
    fn round_trip_preserves_branch_tree() {
        let original = workflow(vec![
            action(ActionType::SendEmail, "Welcome"),
            branch(
                "Opened?",
                vec![action(ActionType::AddTag, "Engaged"), action(ActionType::Wait, "Pause")],
                vec![branch("Clicked?", vec![], vec![action(ActionType::SendSms, "Nudge")])],
            ),
        ]);
        assert_eq!(graph_to_workflow(&original, &workflow_to_graph(&original)), original);
    }

    #[test]
    fn actions_after_flat_if_else_survive_round_trip() {
        let original = workflow(vec![
            action(ActionType::IfElse, "Opened?"),
            action(ActionType::SendEmail, "Follow up"),
        ]);
        let graph = workflow_to_graph(&original);

        assert_eq!(graph.incoming("action-1").count(), 0);
        assert!(graph.node(FINAL_PLACEHOLDER_ID).is_some());
        assert!(graph.node("action-1").unwrap().position.y > graph.node("action-0-yes-placeholder").unwrap().position.y);
        assert_eq!(graph_to_workflow(&original, &graph), original);
    }

    #[test]
    fn reverse_uses_edges_not_positions() {
        let original = workflow(vec![
            action(ActionType::SendEmail, "Welcome"),
            action(ActionType::Wait, "Pause"),
        ]);
        let mut graph = workflow_to_graph(&original);
        graph.node_mut("action-1").unwrap().position.y = -300.0;
        assert_eq!(graph_to_workflow(&original, &graph).actions, original.actions);
    }

    #[test]
    fn insert_after_plain_action_keeps_chain() {
        let original = workflow(vec![
            action(ActionType::SendEmail, "Welcome"),
            action(ActionType::Wait, "Pause"),
        ]);
        let graph = insert_action(&workflow_to_graph(&original), "action-0", None, action(ActionType::AddTag, "Tag"));

        let names: Vec<String> = graph_to_workflow(&original, &graph).actions.into_iter().map(|a| a.name).collect();
        assert_eq!(names, ["Welcome", "Tag", "Pause"]);
        let into_new: Vec<&FlowEdge> = graph.incoming("action-1").collect();
        assert_eq!(into_new.len(), 1);
        assert_eq!(into_new[0].source, "action-0");
        assert!(graph.outgoing("action-1").any(|e| e.target == "action-2"));
    }

    #[test]
    fn insert_under_trigger_goes_first() {
        let original = workflow(vec![action(ActionType::SendEmail, "Welcome")]);
        let graph = insert_action(&workflow_to_graph(&original), TRIGGER_NODE_ID, None, action(ActionType::Wait, "Pause"));
        let names: Vec<String> = graph_to_workflow(&original, &graph).actions.into_iter().map(|a| a.name).collect();
        assert_eq!(names, ["Pause", "Welcome"]);
    }

    #[test]
    fn insert_on_branch_handle_fills_that_branch() {
        let original = workflow(vec![action(ActionType::IfElse, "Opened?")]);
        let graph = workflow_to_graph(&original);

        let yes = insert_action(&graph, "action-0", Some(BranchHandle::Yes), action(ActionType::AddTag, "Engaged"));
        let rebuilt = graph_to_workflow(&original, &yes);
        let paths = rebuilt.actions[0].branches.as_ref().unwrap();
        assert_eq!(paths.yes[0].name, "Engaged");
        assert!(paths.no.is_empty());
        assert!(yes.edges.iter().any(|e| e.source == "action-0"
            && e.target == "action-0-yes-0"
            && e.source_handle == Some(BranchHandle::Yes)));
        assert!(yes.node("action-0-yes-placeholder").is_some());

        let via_placeholder = insert_action(&graph, "action-0-no-placeholder", None, action(ActionType::Wait, "Later"));
        let rebuilt = graph_to_workflow(&original, &via_placeholder);
        assert_eq!(rebuilt.actions[0].branches.as_ref().unwrap().no[0].name, "Later");
    }

    #[test]
    fn insert_after_branch_without_handle_is_noop() {
        let graph = workflow_to_graph(&workflow(vec![action(ActionType::IfElse, "Opened?")]));
        assert_eq!(insert_action(&graph, "action-0", None, action(ActionType::Wait, "Pause")), graph);
    }

    #[test]
    fn inserting_if_else_mid_chain_adopts_downstream_as_yes() {
        let original = workflow(vec![
            action(ActionType::SendEmail, "Welcome"),
            action(ActionType::Wait, "Pause"),
            action(ActionType::SendSms, "Text"),
        ]);
        let graph = insert_action(&workflow_to_graph(&original), "action-0", None, action(ActionType::IfElse, "Opened?"));

        let rebuilt = graph_to_workflow(&original, &graph);
        assert_eq!(rebuilt.actions.len(), 2);
        let yes: Vec<&str> = rebuilt.actions[1].branches.as_ref().unwrap().yes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(yes, ["Pause", "Text"]);
        assert!(graph.edges.iter().any(|e| e.source == "action-1"
            && e.target == "action-1-yes-0"
            && e.source_handle == Some(BranchHandle::Yes)));
    }

    #[test]
    fn insert_with_unknown_parent_is_noop() {
        let graph = workflow_to_graph(&workflow(vec![action(ActionType::SendEmail, "Welcome")]));
        assert_eq!(insert_action(&graph, "nope", None, action(ActionType::Wait, "Pause")), graph);
    }

    #[test]
    fn remove_reconnects_predecessor_and_successor() {
        let original = workflow(vec![
            action(ActionType::SendEmail, "Welcome"),
            action(ActionType::Wait, "Pause"),
            action(ActionType::AddTag, "Tag"),
        ]);
        let graph = remove_action(&workflow_to_graph(&original), "action-1");

        assert_eq!(
            edge_pairs(&graph),
            [
                ("trigger", "action-0", None),
                ("action-0", "action-1", None),
                ("action-1", FINAL_PLACEHOLDER_ID, None),
            ]
        );
        let names: Vec<String> = graph_to_workflow(&original, &graph).actions.into_iter().map(|a| a.name).collect();
        assert_eq!(names, ["Welcome", "Tag"]);
    }

    #[test]
    fn removing_if_else_drops_its_branches() {
        let original = workflow(vec![
            action(ActionType::SendEmail, "Welcome"),
            branch("Opened?", vec![action(ActionType::AddTag, "Engaged")], vec![]),
        ]);
        let graph = remove_action(&workflow_to_graph(&original), "action-1");

        assert_eq!(ids(&graph), ["trigger", "action-0", FINAL_PLACEHOLDER_ID]);
        assert_eq!(graph_to_workflow(&original, &graph).actions.len(), 1);
    }

    #[test]
    fn remove_inside_branch_splices_branch() {
        let original = workflow(vec![branch(
            "Opened?",
            vec![action(ActionType::AddTag, "Engaged"), action(ActionType::Wait, "Pause")],
            vec![],
        )]);
        let graph = remove_action(&workflow_to_graph(&original), "action-0-yes-0");

        let rebuilt = graph_to_workflow(&original, &graph);
        assert_eq!(rebuilt.actions[0].branches.as_ref().unwrap().yes[0].name, "Pause");
        assert!(graph.edges.iter().any(|e| e.source == "action-0"
            && e.target == "action-0-yes-0"
            && e.source_handle == Some(BranchHandle::Yes)));
    }

    #[test]
    fn remove_trigger_or_placeholder_is_noop() {
        let graph = workflow_to_graph(&workflow(vec![action(ActionType::IfElse, "Opened?")]));
        assert_eq!(remove_action(&graph, TRIGGER_NODE_ID), graph);
        assert_eq!(remove_action(&graph, "action-0-yes-placeholder"), graph);
        assert_eq!(remove_action(&graph, "missing"), graph);
    }
}
