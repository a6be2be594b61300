use wasm_bindgen::JsValue;

/// Failures surfaced outside the drawing core: fixture parsing, export and DOM glue.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
	#[error("invalid JSON: {0}")]
	Json(#[from] serde_json::Error),
	#[error("DOM operation failed: {0}")]
	Dom(String),
}

impl From<JsValue> for GraphError {
	fn from(value: JsValue) -> Self {
		GraphError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}
