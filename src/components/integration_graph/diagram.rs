//! Turns the graph model into a flowchart description for the external
//! diagram renderer.

use super::error::GraphError;
use super::model::GraphModel;

/// Strips characters that are significant to the flowchart grammar so a
/// label cannot break out of its statement. Newlines are kept: the two-line
/// node label relies on them.
fn sanitize(text: &str) -> String {
	text.replace(['[', ']', '"'], " ")
}

/// Emits one directed-edge statement per link, in link-list order. Each
/// node renders with the two-line label `"{name}\n{componentType}"` and the
/// link type becomes the edge label.
///
/// Emission order only affects the renderer's default layout; highlighting
/// re-derives adjacency from the rendered edge ids, not from text order.
pub fn flowchart_text(model: &GraphModel) -> Result<String, GraphError> {
	let mut out = String::from("flowchart TB;\n");
	for link in model.links() {
		let from = model.resolve(&link.from)?;
		let to = model.resolve(&link.to)?;
		out.push_str(&format!(
			"{}[{}\n{}] --\"{}\"--> {}[{}\n{}]\n",
			link.from,
			sanitize(&from.name),
			sanitize(&from.component_type),
			sanitize(&link.link_type),
			link.to,
			sanitize(&to.name),
			sanitize(&to.component_type),
		));
	}
	Ok(out)
}
