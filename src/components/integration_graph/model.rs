use std::collections::HashMap;

use super::error::GraphError;
use super::types::{GraphLink, GraphNode, GraphPayload};

/// Node lookup table plus the link list, built once at parse time and
/// immutable until the graph view is torn down.
#[derive(Debug)]
pub struct GraphModel {
	nodes: HashMap<String, GraphNode>,
	links: Vec<GraphLink>,
}

impl GraphModel {
	/// Builds the id-keyed lookup table. Link endpoints are not checked
	/// here; an unknown id surfaces from [`GraphModel::resolve`] when a
	/// link is first resolved.
	pub fn build(payload: GraphPayload) -> Self {
		let nodes = payload
			.nodes
			.into_iter()
			.map(|n| (n.node_id.clone(), n))
			.collect();
		Self {
			nodes,
			links: payload.links,
		}
	}

	/// Parses the raw JSON payload and builds the model in one step.
	pub fn from_json(text: &str) -> Result<Self, GraphError> {
		let payload: GraphPayload =
			serde_json::from_str(text).map_err(|e| GraphError::MalformedInput(e.to_string()))?;
		Ok(Self::build(payload))
	}

	/// Resolves a link endpoint to its node.
	pub fn resolve(&self, id: &str) -> Result<&GraphNode, GraphError> {
		self.nodes.get(id).ok_or_else(|| {
			GraphError::MalformedInput(format!("link references unknown node id \"{id}\""))
		})
	}

	/// Links in payload order.
	pub fn links(&self) -> &[GraphLink] {
		&self.links
	}
}
