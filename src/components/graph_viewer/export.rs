//! JSON export of the unfiltered graph.

use log::info;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use super::types::Graph;
use crate::error::GraphError;

/// Pretty JSON (two-space indent) of the full graph as supplied, unaffected by view state.
pub fn export_json(graph: &Graph) -> Result<String, GraphError> {
	Ok(serde_json::to_string_pretty(graph)?)
}

/// `"Related Documents"` becomes `"related_documents_graph.json"`.
pub fn export_file_name(title: &str) -> String {
	let mut stem = String::with_capacity(title.len());
	let mut in_space = false;
	for c in title.to_lowercase().chars() {
		if c.is_whitespace() {
			// Each whitespace run collapses to one underscore.
			if !in_space {
				stem.push('_');
			}
			in_space = true;
		} else {
			stem.push(c);
			in_space = false;
		}
	}
	format!("{stem}_graph.json")
}

/// Hands the exported JSON to the browser as a file download.
pub fn download_graph(graph: &Graph, title: &str) -> Result<(), GraphError> {
	let json = export_json(graph)?;
	let file_name = export_file_name(title);

	let parts = js_sys::Array::of1(&JsValue::from_str(&json));
	let options = BlobPropertyBag::new();
	options.set_type("application/json");
	let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
	let url = Url::create_object_url_with_blob(&blob)?;

	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| GraphError::Dom("no document".into()))?;
	let link: HtmlAnchorElement = document
		.create_element("a")?
		.dyn_into()
		.map_err(|_| GraphError::Dom("anchor element has unexpected type".into()))?;
	link.set_href(&url);
	link.set_download(&file_name);
	link.click();
	Url::revoke_object_url(&url)?;

	info!("Exported {} ({} bytes)", file_name, json.len());
	Ok(())
}
