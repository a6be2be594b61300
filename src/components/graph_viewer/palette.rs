//! Colour tables and per-viewer settings.

use std::collections::HashMap;

/// Node type drawn with its label at every zoom level.
pub const DEFAULT_ROOT_TYPE: &str = "Document";
pub const DEFAULT_HEIGHT: f64 = 500.0;

const NODE_COLORS: &[(&str, &str)] = &[
	("Document", "#2c5282"),
	("Section", "#38a169"),
	("Requirement", "#d69e2e"),
	("Control", "#805ad5"),
	("EvidenceType", "#dd6b20"),
	("Finding", "#e53e3e"),
	("Policy", "#3182ce"),
	("Standard", "#319795"),
	("RegulatoryGuideline", "#d53f8c"),
	("SupportingDoc", "#718096"),
	("Identifier", "#4299e1"),
	("URL", "#38b2ac"),
	("Email", "#38b2ac"),
];

const EDGE_COLORS: &[(&str, &str)] = &[
	("relate_to", "#4299e1"),
	("mention", "#48bb78"),
	("hyperlink_to", "#9f7aea"),
	("mention_in_context", "#ed8936"),
	("maps_to", "#f56565"),
	("has_section", "#38a169"),
	("has_requirement", "#d69e2e"),
	("requires", "#805ad5"),
	("evidenced_by", "#3182ce"),
	("violated_by", "#e53e3e"),
	("supported_by", "#319795"),
];

/// Type-to-colour lookup tables. Unknown types fall back to the neutral defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
	pub node_colors: HashMap<String, String>,
	/// Ordered so the legend lists relations in a stable order.
	pub edge_colors: Vec<(String, String)>,
	pub default_node_color: String,
	pub default_edge_color: String,
}

impl Default for Palette {
	fn default() -> Self {
		Self {
			node_colors: NODE_COLORS
				.iter()
				.map(|&(t, c)| (t.into(), c.into()))
				.collect(),
			edge_colors: EDGE_COLORS
				.iter()
				.map(|&(t, c)| (t.into(), c.into()))
				.collect(),
			default_node_color: "#4a5568".into(),
			default_edge_color: "#718096".into(),
		}
	}
}

impl Palette {
	pub fn node_color(&self, node_type: &str) -> &str {
		self.node_colors
			.get(node_type)
			.map(String::as_str)
			.unwrap_or(&self.default_node_color)
	}

	pub fn edge_color(&self, edge_type: &str) -> &str {
		self.edge_colors
			.iter()
			.find(|(t, _)| t == edge_type)
			.map(|(_, c)| c.as_str())
			.unwrap_or(&self.default_edge_color)
	}
}

/// Host-supplied settings for one viewer instance.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphViewerConfig {
	/// Canvas height in CSS pixels; the width follows the container.
	pub height: f64,
	pub root_type: String,
	pub palette: Palette,
}

impl Default for GraphViewerConfig {
	fn default() -> Self {
		Self {
			height: DEFAULT_HEIGHT,
			root_type: DEFAULT_ROOT_TYPE.into(),
			palette: Palette::default(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn known_types_resolve() {
		let palette = Palette::default();
		assert_eq!(palette.node_color("Document"), "#2c5282");
		assert_eq!(palette.edge_color("violated_by"), "#e53e3e");
	}

	#[test]
	fn unknown_types_use_neutral_defaults() {
		let palette = Palette::default();
		assert_eq!(palette.node_color("Spaceship"), "#4a5568");
		assert_eq!(palette.edge_color("orbits"), "#718096");
	}

	#[test]
	fn substituted_palette_is_honoured() {
		let mut palette = Palette::default();
		palette.node_colors.insert("Document".into(), "black".into());
		palette.default_edge_color = "pink".into();
		assert_eq!(palette.node_color("Document"), "black");
		assert_eq!(palette.edge_color("orbits"), "pink");
	}
}
