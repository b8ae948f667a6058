//! Funnel ⇄ graph adapter and the chain mutation engine.

use tracing::debug;

use super::graph::{FlowEdge, FlowGraph, FlowNode, PlaceholderData, Position};
use super::layout::{self, FINAL_PLACEHOLDER_ID, NODE_WIDTH, ROW_SPACING};
use crate::{Funnel, FunnelStep};

/// Horizontal center of the funnel column.
pub const FUNNEL_X: f64 = NODE_WIDTH / 2.0;

fn placeholder_data(parent_node_id: Option<String>) -> PlaceholderData {
    PlaceholderData {
        label: Some("Add step".to_string()),
        parent_node_id,
        source_handle: None,
    }
}

/// One node per step down a single column, chained in order, closed by a placeholder.
pub fn funnel_to_graph(funnel: &Funnel) -> FlowGraph {
    let mut nodes = Vec::with_capacity(funnel.steps.len() + 1);
    let mut edges = Vec::with_capacity(funnel.steps.len());

    for (row, step) in funnel.steps.iter().enumerate() {
        if row > 0 {
            edges.push(FlowEdge::new(&funnel.steps[row - 1].id, &step.id));
        }
        nodes.push(FlowNode::step(step.clone(), Position::new(FUNNEL_X, layout::row_y(row))));
    }

    let last_id = funnel.steps.last().map(|s| s.id.clone());
    if let Some(last_id) = &last_id {
        edges.push(FlowEdge::new(last_id, FINAL_PLACEHOLDER_ID));
    }
    nodes.push(FlowNode::placeholder(
        FINAL_PLACEHOLDER_ID,
        Position::new(FUNNEL_X, layout::row_y(funnel.steps.len())),
        placeholder_data(last_id),
    ));

    FlowGraph::new(nodes, edges)
}

/// Rebuilds `steps` from the graph, following the chain from its head.
/// Everything else is copied from `original`.
pub fn graph_to_funnel(original: &Funnel, graph: &FlowGraph) -> Funnel {
    let steps = layout::chain_order(graph, |n| n.as_step().is_some())
        .into_iter()
        .filter_map(|n| n.as_step().cloned())
        .collect();
    Funnel {
        steps,
        ..original.clone()
    }
}

/// Inserts `step` right after `parent_node_id`, taking over the edge that left the parent.
///
/// A placeholder parent stands for its own parent; the parentless placeholder
/// of an empty funnel inserts the first step. Unknown parents and duplicate
/// step ids leave the graph unchanged.
pub fn insert_step(graph: &FlowGraph, parent_node_id: &str, step: FunnelStep) -> FlowGraph {
    let Some(parent) = graph.node(parent_node_id) else {
        debug!(parent_node_id, "insert_step: unknown parent, ignoring");
        return graph.clone();
    };
    if graph.node(&step.id).is_some() {
        debug!(step_id = %step.id, "insert_step: step id already present, ignoring");
        return graph.clone();
    }

    if let Some(data) = parent.as_placeholder() {
        return match data.parent_node_id.clone() {
            Some(real_parent) if real_parent != parent_node_id => insert_step(graph, &real_parent, step),
            _ => insert_head(graph, step),
        };
    }

    let mut nodes = graph.nodes.clone();
    let mut edges = graph.edges.clone();

    let new_node = FlowNode::step(
        step,
        Position::new(parent.position.x, parent.position.y + ROW_SPACING / 2.0),
    );

    let downstream = edges
        .iter()
        .position(|e| e.source == parent_node_id)
        .map(|index| edges.remove(index).target);
    edges.push(FlowEdge::new(parent_node_id, &new_node.id));
    if let Some(target) = downstream {
        edges.push(FlowEdge::new(&new_node.id, &target));
    }

    let at = nodes
        .iter()
        .position(|n| n.id == parent_node_id)
        .map_or(nodes.len(), |i| i + 1);
    nodes.insert(at, new_node);

    layout::normalize_chain(FlowGraph::new(nodes, edges), placeholder_data(None))
}

fn insert_head(graph: &FlowGraph, step: FunnelStep) -> FlowGraph {
    let head = layout::chain_order(graph, |n| !n.is_placeholder()).first().map(|n| n.id.clone());
    let target = head
        .clone()
        .or_else(|| graph.placeholders().next().map(|p| p.id.clone()));

    let new_node = FlowNode::step(step, Position::new(FUNNEL_X, -ROW_SPACING / 2.0));
    let mut edges = graph.edges.clone();
    if let Some(target) = target {
        edges.push(FlowEdge::new(&new_node.id, &target));
    }
    let mut nodes = Vec::with_capacity(graph.nodes.len() + 1);
    nodes.push(new_node);
    nodes.extend(graph.nodes.iter().cloned());

    layout::normalize_chain(FlowGraph::new(nodes, edges), placeholder_data(None))
}

/// Removes a step and reconnects its predecessor to its successor.
///
/// Placeholders, non-deletable nodes and unknown ids leave the graph unchanged.
pub fn remove_step(graph: &FlowGraph, node_id: &str) -> FlowGraph {
    match graph.node(node_id) {
        Some(node) if node.is_deletable() => {}
        _ => {
            debug!(node_id, "remove_step: not a removable step, ignoring");
            return graph.clone();
        }
    }

    let incoming = graph.incoming(node_id).next().map(|e| e.source.clone());
    let outgoing = graph.outgoing(node_id).next().map(|e| e.target.clone());

    let mut edges: Vec<FlowEdge> = graph
        .edges
        .iter()
        .filter(|e| e.source != node_id && e.target != node_id)
        .cloned()
        .collect();
    if let (Some(source), Some(target)) = (incoming, outgoing) {
        edges.push(FlowEdge::new(&source, &target));
    }
    let nodes = graph.nodes.iter().filter(|n| n.id != node_id).cloned().collect();

    layout::normalize_chain(FlowGraph::new(nodes, edges), placeholder_data(None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FunnelStepType, Status};
    use chrono::{TimeZone, Utc};

    fn step(id: &str, step_type: FunnelStepType, path: &str) -> FunnelStep {
        FunnelStep {
            id: id.to_string(),
            step_type,
            name: format!("Step {}", id),
            path: path.to_string(),
        }
    }

    fn funnel(steps: Vec<FunnelStep>) -> Funnel {
        Funnel {
            id: "funnel-1".to_string(),
            name: "SaaS Trial".to_string(),
            domain: "trial.example.com".to_string(),
            steps,
            status: Status::Active,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn two_steps() -> Funnel {
        funnel(vec![
            step("a", FunnelStepType::Page, "/a"),
            step("b", FunnelStepType::Form, "/b"),
        ])
    }

    fn real_ids(graph: &FlowGraph) -> Vec<&str> {
        let mut real: Vec<&FlowNode> = graph.nodes.iter().filter(|n| !n.is_placeholder()).collect();
        real.sort_by(|a, b| a.position.y.total_cmp(&b.position.y));
        real.into_iter().map(|n| n.id.as_str()).collect()
    }

    fn edge_pairs(graph: &FlowGraph) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> =
            graph.edges.iter().map(|e| (e.source.as_str(), e.target.as_str())).collect();
        pairs.sort();
        pairs
    }

    fn assert_normalized(graph: &FlowGraph) {
        let mut real: Vec<&FlowNode> = graph.nodes.iter().filter(|n| !n.is_placeholder()).collect();
        real.sort_by(|a, b| a.position.y.total_cmp(&b.position.y));
        for (row, node) in real.iter().enumerate() {
            assert_eq!(node.position.y, layout::row_y(row), "node {} off the grid", node.id);
        }
        let placeholders: Vec<&FlowNode> = graph.placeholders().collect();
        assert_eq!(placeholders.len(), 1);
        let parent = placeholders[0].as_placeholder().unwrap().parent_node_id.as_deref();
        assert_eq!(parent, real.last().map(|n| n.id.as_str()));
    }

    #[test]
    fn forward_chains_steps_and_closes_with_placeholder() {
        let graph = funnel_to_graph(&two_steps());

        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.nodes[0].position, Position::new(FUNNEL_X, 0.0));
        assert_eq!(graph.nodes[1].position, Position::new(FUNNEL_X, ROW_SPACING));
        assert_eq!(graph.nodes[2].id, FINAL_PLACEHOLDER_ID);
        assert_eq!(edge_pairs(&graph), [("a", "b"), ("b", FINAL_PLACEHOLDER_ID)]);
    }

    #[test]
    fn forward_is_deterministic() {
        let funnel = two_steps();
        assert_eq!(funnel_to_graph(&funnel), funnel_to_graph(&funnel.clone()));
    }

    #[test]
    fn forward_of_empty_funnel_is_a_lone_placeholder() {
        let graph = funnel_to_graph(&funnel(vec![]));
        assert_eq!(graph.nodes.len(), 1);
        assert!(graph.nodes[0].as_placeholder().unwrap().parent_node_id.is_none());
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn reverse_round_trips_with_and_without_edges() {
        let original = funnel(vec![
            step("a", FunnelStepType::Page, "/a"),
            step("b", FunnelStepType::Form, "/b"),
            step("c", FunnelStepType::Upsell, "/c"),
            step("d", FunnelStepType::ThankYou, "/thanks"),
        ]);
        let graph = funnel_to_graph(&original);
        assert_eq!(graph_to_funnel(&original, &graph), original);

        let nodes_only = FlowGraph::new(graph.nodes.clone(), vec![]);
        assert_eq!(graph_to_funnel(&original, &nodes_only), original);
    }

    #[test]
    fn reverse_ignores_dragged_positions() {
        let original = two_steps();
        let mut graph = funnel_to_graph(&original);
        graph.node_mut("b").unwrap().position.y = -500.0;
        assert_eq!(graph_to_funnel(&original, &graph).steps, original.steps);
    }

    #[test]
    fn insert_after_head_lands_between() {
        let graph = funnel_to_graph(&two_steps());
        let updated = insert_step(&graph, "a", step("c", FunnelStepType::Upsell, "/c"));

        assert_eq!(real_ids(&updated), ["a", "c", "b"]);
        assert_eq!(
            edge_pairs(&updated),
            [("a", "c"), ("b", FINAL_PLACEHOLDER_ID), ("c", "b")]
        );
        assert_normalized(&updated);

        let into_new: Vec<&FlowEdge> = updated.incoming("c").collect();
        assert_eq!(into_new.len(), 1);
        assert_eq!(into_new[0].source, "a");
    }

    #[test]
    fn insert_after_last_moves_placeholder() {
        let graph = funnel_to_graph(&two_steps());
        let updated = insert_step(&graph, "b", step("c", FunnelStepType::ThankYou, "/thanks"));

        assert_eq!(real_ids(&updated), ["a", "b", "c"]);
        assert!(updated.outgoing("c").any(|e| e.target == FINAL_PLACEHOLDER_ID));
        assert_normalized(&updated);
        assert_eq!(
            graph_to_funnel(&two_steps(), &updated).steps.last().unwrap().id,
            "c"
        );
    }

    #[test]
    fn insert_through_placeholder_appends() {
        let graph = funnel_to_graph(&two_steps());
        let updated = insert_step(&graph, FINAL_PLACEHOLDER_ID, step("c", FunnelStepType::Page, "/c"));
        assert_eq!(real_ids(&updated), ["a", "b", "c"]);
        assert_normalized(&updated);
    }

    #[test]
    fn dragged_step_does_not_split_drawn_and_saved_order() {
        let original = funnel(vec![
            step("a", FunnelStepType::Page, "/a"),
            step("b", FunnelStepType::Form, "/b"),
            step("c", FunnelStepType::Upsell, "/c"),
        ]);
        let mut graph = funnel_to_graph(&original);
        graph.node_mut("a").unwrap().position.y = 1000.0;

        let graph = insert_step(&graph, FINAL_PLACEHOLDER_ID, step("d", FunnelStepType::Upsell, "/d"));
        let graph = insert_step(&graph, FINAL_PLACEHOLDER_ID, step("e", FunnelStepType::ThankYou, "/e"));

        let saved: Vec<String> = graph_to_funnel(&original, &graph).steps.into_iter().map(|s| s.id).collect();
        assert_eq!(real_ids(&graph), saved);
        assert_eq!(saved, ["a", "b", "c", "d", "e"]);
        assert_eq!(
            edge_pairs(&graph),
            [("a", "b"), ("b", "c"), ("c", "d"), ("d", "e"), ("e", FINAL_PLACEHOLDER_ID)]
        );
        assert_normalized(&graph);
    }

    #[test]
    fn insert_into_empty_funnel() {
        let empty = funnel(vec![]);
        let graph = funnel_to_graph(&empty);
        let updated = insert_step(&graph, FINAL_PLACEHOLDER_ID, step("a", FunnelStepType::Page, "/"));

        assert_eq!(real_ids(&updated), ["a"]);
        assert_eq!(edge_pairs(&updated), [("a", FINAL_PLACEHOLDER_ID)]);
        assert_normalized(&updated);
    }

    #[test]
    fn insert_with_unknown_parent_is_noop() {
        let graph = funnel_to_graph(&two_steps());
        assert_eq!(insert_step(&graph, "nope", step("c", FunnelStepType::Page, "/c")), graph);
        assert_eq!(insert_step(&graph, "a", step("b", FunnelStepType::Page, "/dup")), graph);
    }

    #[test]
    fn remove_reconnects_neighbours() {
        let original = funnel(vec![
            step("a", FunnelStepType::Page, "/a"),
            step("b", FunnelStepType::Form, "/b"),
            step("c", FunnelStepType::ThankYou, "/c"),
        ]);
        let updated = remove_step(&funnel_to_graph(&original), "b");

        assert!(updated.node("b").is_none());
        assert!(updated.edges.iter().all(|e| e.source != "b" && e.target != "b"));
        assert_eq!(edge_pairs(&updated), [("a", "c"), ("c", FINAL_PLACEHOLDER_ID)]);
        assert_normalized(&updated);
    }

    #[test]
    fn remove_last_step_reattaches_placeholder() {
        let updated = remove_step(&funnel_to_graph(&two_steps()), "b");
        assert_eq!(edge_pairs(&updated), [("a", FINAL_PLACEHOLDER_ID)]);
        assert_normalized(&updated);
    }

    #[test]
    fn remove_only_step_leaves_lone_placeholder() {
        let single = funnel(vec![step("a", FunnelStepType::Page, "/")]);
        let updated = remove_step(&funnel_to_graph(&single), "a");
        assert_eq!(updated.nodes.len(), 1);
        assert!(updated.edges.is_empty());
        assert_normalized(&updated);
    }

    #[test]
    fn remove_placeholder_or_unknown_is_noop() {
        let graph = funnel_to_graph(&two_steps());
        assert_eq!(remove_step(&graph, FINAL_PLACEHOLDER_ID), graph);
        assert_eq!(remove_step(&graph, "missing"), graph);
    }
}
