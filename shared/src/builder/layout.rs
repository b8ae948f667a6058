//! Layout primitives shared by the workflow and funnel builders.

use std::collections::{HashMap, HashSet};

use super::graph::{FlowEdge, FlowGraph, FlowNode, PlaceholderData, Position};

pub const NODE_WIDTH: f64 = 256.0;
pub const NODE_HEIGHT: f64 = 120.0;
pub const VERTICAL_GAP: f64 = 80.0;
pub const HORIZONTAL_GAP: f64 = 150.0;

/// Distance between two consecutive rows.
pub const ROW_SPACING: f64 = NODE_HEIGHT + VERTICAL_GAP;

pub const FINAL_PLACEHOLDER_ID: &str = "final-placeholder";

pub fn row_y(row: usize) -> f64 {
    row as f64 * ROW_SPACING
}

/// Layout normalization for single-chain graphs.
///
/// Every non-placeholder node is re-stacked at fixed spacing from y = 0 in
/// [`chain_order`], so the drawn order is the order the edges describe, and
/// exactly one trailing placeholder is re-appended below the last real node,
/// fed by a single edge from it. With no real node left the placeholder sits
/// alone at the origin row.
pub fn normalize_chain(graph: FlowGraph, default_placeholder: PlaceholderData) -> FlowGraph {
    let rank: HashMap<String, usize> = chain_order(&graph, |n| !n.is_placeholder())
        .into_iter()
        .enumerate()
        .map(|(i, n)| (n.id.clone(), i))
        .collect();

    let FlowGraph { nodes, edges } = graph;
    let (placeholders, mut real): (Vec<FlowNode>, Vec<FlowNode>) =
        nodes.into_iter().partition(|n| n.is_placeholder());

    real.sort_by_key(|n| rank.get(&n.id).copied().unwrap_or(usize::MAX));
    for (row, node) in real.iter_mut().enumerate() {
        node.position.y = row_y(row);
    }

    let placeholder_ids: HashSet<&str> = placeholders.iter().map(|n| n.id.as_str()).collect();
    let mut edges: Vec<FlowEdge> = edges
        .into_iter()
        .filter(|e| !placeholder_ids.contains(e.target.as_str()))
        .collect();

    let x = real.first().map(|n| n.position.x).unwrap_or_default();
    let mut placeholder = placeholders.into_iter().next().unwrap_or_else(|| {
        FlowNode::placeholder(FINAL_PLACEHOLDER_ID, Position::new(x, 0.0), default_placeholder.clone())
    });
    let last_id = real.last().map(|n| n.id.clone());
    placeholder.position.y = row_y(real.len());
    placeholder.data = super::graph::NodeData::Placeholder(PlaceholderData {
        parent_node_id: last_id.clone(),
        ..placeholder.as_placeholder().cloned().unwrap_or(default_placeholder)
    });
    if let Some(last_id) = last_id {
        edges.push(FlowEdge::new(&last_id, &placeholder.id));
    }

    real.push(placeholder);
    FlowGraph::new(real, edges)
}

/// Orders the member nodes of a chain-shaped graph by following edges.
///
/// Chains are walked from their heads (members with no incoming edge from
/// another member) in ascending y. Members never reached that way, such as
/// nodes on a cycle, are walked afterwards in ascending y. Without any edge
/// this is plain position order.
pub fn chain_order<'a, F>(graph: &'a FlowGraph, is_member: F) -> Vec<&'a FlowNode>
where
    F: Fn(&FlowNode) -> bool,
{
    let mut members: Vec<&FlowNode> = graph.nodes.iter().filter(|n| is_member(n)).collect();
    members.sort_by(|a, b| a.position.y.total_cmp(&b.position.y));
    let member_ids: HashSet<&str> = members.iter().map(|n| n.id.as_str()).collect();

    let has_member_parent = |id: &str| {
        graph
            .incoming(id)
            .any(|e| e.source != id && member_ids.contains(e.source.as_str()))
    };
    let (heads, rest): (Vec<&FlowNode>, Vec<&FlowNode>) =
        members.iter().copied().partition(|n| !has_member_parent(&n.id));

    let mut visited: HashSet<&str> = HashSet::new();
    let mut ordered = Vec::with_capacity(members.len());
    for start in heads.into_iter().chain(rest) {
        let mut current = Some(start);
        while let Some(node) = current {
            if !visited.insert(node.id.as_str()) {
                break;
            }
            ordered.push(node);
            current = graph
                .outgoing(&node.id)
                .filter(|e| !visited.contains(e.target.as_str()))
                .find_map(|e| members.iter().copied().find(|m| m.id == e.target));
        }
    }
    ordered
}
