//! Graph-based visual builder: canvas model, workflow and funnel adapters,
//! and the editing store the builder pages drive.

pub mod funnel;
pub mod graph;
pub mod layout;
pub mod store;
pub mod workflow;

pub use funnel::{funnel_to_graph, graph_to_funnel};
pub use graph::{
    BranchHandle, EdgeChange, FlowEdge, FlowGraph, FlowNode, NodeChange, NodeData, NodeKind, PlaceholderData, Position,
    apply_edge_changes, apply_node_changes,
};
pub use layout::FINAL_PLACEHOLDER_ID;
pub use store::{BuilderDocument, BuilderStore, DialogState, FunnelBuilder, WorkflowBuilder};
pub use workflow::{TRIGGER_NODE_ID, graph_to_workflow, workflow_to_graph};
