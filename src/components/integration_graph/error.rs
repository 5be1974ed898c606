use thiserror::Error;

/// Everything that can abort a render attempt. All variants are caught at
/// the entry point, logged to the console, and never shown in-page.
#[derive(Debug, Error)]
pub enum GraphError {
	/// Network or HTTP failure while fetching the payload.
	#[error("failed to fetch graph payload: {0}")]
	Fetch(String),
	/// Payload missing required fields or referencing unknown node ids.
	#[error("malformed graph payload: {0}")]
	MalformedInput(String),
	/// The target container element does not exist in the document.
	#[error("target container \"{0}\" not found")]
	TargetNotFound(String),
	/// The diagram renderer rejected the generated description.
	#[error("diagram render failed: {0}")]
	Render(String),
}
