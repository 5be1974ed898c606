use serde::Deserialize;

/// One component in the integration graph.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	/// Unique identifier; arrives as a JSON string or integer.
	#[serde(rename = "nodeId", deserialize_with = "id_string")]
	pub node_id: String,
	/// Display label.
	pub name: String,
	/// Category label, e.g. "channel" or "service-activator".
	#[serde(rename = "componentType")]
	pub component_type: String,
}

/// A typed, directed relationship between two nodes.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphLink {
	/// Source node id.
	#[serde(deserialize_with = "id_string")]
	pub from: String,
	/// Destination node id.
	#[serde(deserialize_with = "id_string")]
	pub to: String,
	/// Relationship label, e.g. "calls" or "publishes".
	#[serde(rename = "type")]
	pub link_type: String,
}

/// The raw payload fetched from the graph endpoint.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphPayload {
	/// All nodes, in payload order.
	pub nodes: Vec<GraphNode>,
	/// All links, in payload order. Multiple links may share the same
	/// endpoint pair with different types.
	pub links: Vec<GraphLink>,
}

fn id_string<'de, D>(de: D) -> Result<String, D::Error>
where
	D: serde::Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Raw {
		Text(String),
		Num(i64),
	}
	Ok(match Raw::deserialize(de)? {
		Raw::Text(s) => s,
		Raw::Num(n) => n.to_string(),
	})
}
