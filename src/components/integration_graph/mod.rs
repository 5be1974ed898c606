mod component;
mod controller;
mod diagram;
mod error;
mod highlight;
mod model;
mod reach;
mod types;

pub use component::{
	DiagramRenderer, IntegrationGraph, MermaidRenderer, ThemeOptions, render_integration_graph,
};
pub use controller::InteractionController;
pub use error::GraphError;
pub use highlight::{EdgeVisual, HighlightAnimator, STAGGER_MS, Scheduler};
pub use model::GraphModel;
pub use reach::{Direction, RenderedEdge, parse_edge_id, reachable};
pub use types::{GraphLink, GraphNode, GraphPayload};
