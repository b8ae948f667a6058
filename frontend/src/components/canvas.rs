// Builder canvas: absolutely positioned node cards joined by SVG edges
use apexleads_shared::builder::layout::{NODE_HEIGHT, NODE_WIDTH};
use apexleads_shared::builder::{BranchHandle, EdgeChange, FlowEdge, FlowGraph, FlowNode, NodeChange, NodeData, Position};
use apexleads_shared::{ActionType, FunnelStepType};
use yew::prelude::*;

const PADDING: f64 = 48.0;

#[derive(Properties, PartialEq)]
pub struct FlowCanvasProps {
    pub graph: FlowGraph,
    pub on_nodes_change: Callback<Vec<NodeChange>>,
    pub on_edges_change: Callback<Vec<EdgeChange>>,
    /// Fired with the placeholder's node id.
    pub on_add: Callback<String>,
    pub on_edit: Callback<String>,
    pub on_delete: Callback<String>,
}

#[derive(Clone, PartialEq)]
struct Drag {
    node_id: String,
    pointer: (f64, f64),
    origin: Position,
}

/// Shift applied to every node so that branches laid out at negative x stay on screen.
fn canvas_origin(nodes: &[FlowNode]) -> (f64, f64) {
    let min_x = nodes.iter().map(|n| n.position.x).fold(0.0, f64::min);
    let min_y = nodes.iter().map(|n| n.position.y).fold(0.0, f64::min);
    (PADDING - min_x, PADDING - min_y)
}

fn canvas_size(nodes: &[FlowNode], origin: (f64, f64)) -> (f64, f64) {
    let max_x = nodes.iter().map(|n| n.position.x).fold(0.0, f64::max);
    let max_y = nodes.iter().map(|n| n.position.y).fold(0.0, f64::max);
    (
        max_x + origin.0 + NODE_WIDTH + PADDING,
        max_y + origin.1 + NODE_HEIGHT + PADDING,
    )
}

/// Start and end points of an edge: bottom of the source (left or right
/// quarter for branch handles) to the top center of the target.
fn edge_endpoints(source: &FlowNode, target: &FlowNode, handle: Option<BranchHandle>) -> ((f64, f64), (f64, f64)) {
    let anchor = match handle {
        Some(BranchHandle::Yes) => 0.25,
        Some(BranchHandle::No) => 0.75,
        None => 0.5,
    };
    (
        (source.position.x + NODE_WIDTH * anchor, source.position.y + NODE_HEIGHT),
        (target.position.x + NODE_WIDTH / 2.0, target.position.y),
    )
}

/// Clicking an edge selects it and clears every other selection.
fn select_edge(edges: &[FlowEdge], id: &str) -> Vec<EdgeChange> {
    edges
        .iter()
        .filter(|e| e.selected != (e.id == id))
        .map(|e| EdgeChange::Select {
            id: e.id.clone(),
            selected: e.id == id,
        })
        .collect()
}

fn remove_selected_edges(edges: &[FlowEdge]) -> Vec<EdgeChange> {
    edges
        .iter()
        .filter(|e| e.selected)
        .map(|e| EdgeChange::Remove { id: e.id.clone() })
        .collect()
}

fn action_accent(action_type: ActionType) -> &'static str {
    match action_type {
        ActionType::SendEmail => "border-blue-400",
        ActionType::AddTag => "border-purple-400",
        ActionType::Wait => "border-yellow-400",
        ActionType::IfElse => "border-orange-400",
        ActionType::SendSms => "border-teal-400",
    }
}

fn step_accent(step_type: FunnelStepType) -> &'static str {
    match step_type {
        FunnelStepType::Page => "border-blue-400",
        FunnelStepType::Form => "border-purple-400",
        FunnelStepType::Upsell => "border-green-400",
        FunnelStepType::ThankYou => "border-pink-400",
    }
}

#[function_component(FlowCanvas)]
pub fn flow_canvas(props: &FlowCanvasProps) -> Html {
    let drag = use_state(|| None::<Drag>);
    let nodes = &props.graph.nodes;
    let origin = canvas_origin(nodes);
    let (width, height) = canvas_size(nodes, origin);

    let onmousemove = {
        let drag = drag.clone();
        let on_nodes_change = props.on_nodes_change.clone();
        Callback::from(move |e: MouseEvent| {
            if let Some(d) = drag.as_ref() {
                let position = Position::new(
                    d.origin.x + e.client_x() as f64 - d.pointer.0,
                    d.origin.y + e.client_y() as f64 - d.pointer.1,
                );
                on_nodes_change.emit(vec![NodeChange::Position {
                    id: d.node_id.clone(),
                    position: Some(position),
                    dragging: Some(true),
                }]);
            }
        })
    };

    let end_drag = {
        let drag = drag.clone();
        let on_nodes_change = props.on_nodes_change.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(d) = drag.as_ref() {
                on_nodes_change.emit(vec![NodeChange::Position {
                    id: d.node_id.clone(),
                    position: None,
                    dragging: Some(false),
                }]);
                drag.set(None);
            }
        })
    };

    let onkeydown = {
        let edges = props.graph.edges.clone();
        let on_edges_change = props.on_edges_change.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() != "Delete" && e.key() != "Backspace" {
                return;
            }
            let changes = remove_selected_edges(&edges);
            if !changes.is_empty() {
                e.prevent_default();
                on_edges_change.emit(changes);
            }
        })
    };

    let edges = props.graph.edges.iter().filter_map(|edge| {
        let source = props.graph.node(&edge.source)?;
        let target = props.graph.node(&edge.target)?;
        let onclick = {
            let changes = select_edge(&props.graph.edges, &edge.id);
            props.on_edges_change.reform(move |_: MouseEvent| changes.clone())
        };
        Some(render_edge(edge, source, target, origin, onclick))
    });

    html! {
        <div
            class="relative w-full h-full overflow-auto bg-gray-100 dark:bg-gray-900 select-none outline-none"
            tabindex="0"
            {onkeydown}
            {onmousemove}
            onmouseup={end_drag.clone()}
            onmouseleave={end_drag}
        >
            <div class="relative mx-auto" style={format!("width: {}px; height: {}px;", width, height)}>
                <svg class="absolute inset-0 pointer-events-none" width={width.to_string()} height={height.to_string()}>
                    { for edges }
                </svg>
                { for nodes.iter().map(|node| {
                    let onmousedown = {
                        let drag = drag.clone();
                        let node_id = node.id.clone();
                        let origin = node.position;
                        Callback::from(move |e: MouseEvent| {
                            drag.set(Some(Drag {
                                node_id: node_id.clone(),
                                pointer: (e.client_x() as f64, e.client_y() as f64),
                                origin,
                            }));
                        })
                    };
                    let style = format!(
                        "left: {}px; top: {}px; width: {}px; min-height: {}px;",
                        node.position.x + origin.0,
                        node.position.y + origin.1,
                        NODE_WIDTH,
                        NODE_HEIGHT
                    );
                    html! {
                        <div key={node.id.clone()} class="absolute cursor-move" {style} {onmousedown}>
                            <NodeCard
                                node={node.clone()}
                                on_add={props.on_add.clone()}
                                on_edit={props.on_edit.clone()}
                                on_delete={props.on_delete.clone()}
                            />
                        </div>
                    }
                })}
            </div>
        </div>
    }
}

/// Edges are drawn under a wider transparent hit path, the only part of the
/// SVG layer that takes pointer events.
fn render_edge(edge: &FlowEdge, source: &FlowNode, target: &FlowNode, origin: (f64, f64), onclick: Callback<MouseEvent>) -> Html {
    let ((x1, y1), (x2, y2)) = edge_endpoints(source, target, edge.source_handle);
    let (x1, y1, x2, y2) = (x1 + origin.0, y1 + origin.1, x2 + origin.0, y2 + origin.1);
    let mid_y = (y1 + y2) / 2.0;
    let d = format!("M {} {} C {} {}, {} {}, {} {}", x1, y1, x1, mid_y, x2, mid_y, x2, y2);
    let stroke = match edge.source_handle {
        Some(BranchHandle::Yes) => "#22c55e",
        Some(BranchHandle::No) => "#ef4444",
        None => "#9ca3af",
    };
    let width = if edge.selected { "3" } else { "2" };
    let line = if edge.selected { "#6366f1" } else { stroke };

    html! {
        <g key={edge.id.clone()}>
            <path d={d.clone()} fill="none" stroke={line} stroke-width={width} />
            <path {d} {onclick} fill="none" stroke="transparent" stroke-width="12" pointer-events="stroke" class="cursor-pointer" />
            if let Some(label) = &edge.label {
                <text
                    x={((x1 + x2) / 2.0).to_string()}
                    y={mid_y.to_string()}
                    text-anchor="middle"
                    class="text-xs"
                    fill={stroke}
                >
                    { label }
                </text>
            }
        </g>
    }
}

#[derive(Properties, PartialEq)]
struct NodeCardProps {
    node: FlowNode,
    on_add: Callback<String>,
    on_edit: Callback<String>,
    on_delete: Callback<String>,
}

#[function_component(NodeCard)]
fn node_card(props: &NodeCardProps) -> Html {
    let node = &props.node;
    let id = node.id.clone();
    let stop = Callback::from(|e: MouseEvent| e.stop_propagation());

    let (accent, title, body) = match &node.data {
        NodeData::Placeholder(data) => {
            let onclick = props.on_add.reform(move |_: MouseEvent| id.clone());
            return html! {
                <button
                    {onclick}
                    onmousedown={stop}
                    class="w-full h-full flex flex-col items-center justify-center border-2 border-dashed border-gray-300 rounded-lg bg-white/60 hover:bg-white text-gray-500 py-8"
                >
                    <span class="text-2xl leading-none">{"+"}</span>
                    <span class="text-sm font-medium mt-2">{ data.label.clone().unwrap_or_else(|| "Add step".to_string()) }</span>
                </button>
            };
        }
        NodeData::Trigger(data) => ("border-green-500", "Trigger".to_string(), data.label.clone()),
        NodeData::Action(action) => (action_accent(action.action_type), action.name.clone(), action.details.clone()),
        NodeData::Step(step) => (
            step_accent(step.step_type),
            step.name.clone(),
            format!("{} · {}", step.step_type.label(), step.path),
        ),
    };

    let actions = if node.is_deletable() {
        let edit_id = id.clone();
        let on_edit = props.on_edit.reform(move |_: MouseEvent| edit_id.clone());
        let on_delete = props.on_delete.reform(move |_: MouseEvent| id.clone());
        html! {
            <div class="flex space-x-1" onmousedown={stop}>
                <button onclick={on_edit} class="text-xs px-2 py-1 rounded hover:bg-gray-100 text-gray-600">{"Edit"}</button>
                <button onclick={on_delete} class="text-xs px-2 py-1 rounded hover:bg-red-50 text-red-600">{"Delete"}</button>
            </div>
        }
    } else {
        html! {}
    };

    html! {
        <div class={classes!("bg-white", "dark:bg-gray-800", "rounded-lg", "shadow-md", "border-2", "p-4", accent)}>
            <div class="flex items-center justify-between">
                <h3 class="font-semibold text-gray-900 dark:text-white truncate">{ title }</h3>
                { actions }
            </div>
            <p class="mt-2 text-sm text-gray-500 dark:text-gray-400">{ body }</p>
        </div>
    }
}
