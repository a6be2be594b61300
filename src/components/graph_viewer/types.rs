//! Node/edge data model as supplied by the data provider.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::GraphError;

/// A single entity in a knowledge graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
	pub id: String,
	#[serde(rename = "type")]
	pub node_type: String,
	pub label: String,
	#[serde(default)]
	pub props: Map<String, Value>,
}

/// A directed relation between two nodes, referenced by id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
	pub from: String,
	pub to: String,
	#[serde(rename = "type")]
	pub edge_type: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
}

impl GraphEdge {
	/// Text shown for this relation: the label when present, otherwise the kind.
	pub fn display_label(&self) -> &str {
		self.label.as_deref().unwrap_or(&self.edge_type)
	}

	pub fn touches(&self, id: &str) -> bool {
		self.from == id || self.to == id
	}
}

/// Immutable node/edge snapshot handed to the viewer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
}

impl Graph {
	pub fn from_json(json: &str) -> Result<Self, GraphError> {
		Ok(serde_json::from_str(json)?)
	}

	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Distinct node types in order of first appearance.
	pub fn node_types(&self) -> Vec<String> {
		let mut types: Vec<String> = Vec::new();
		for node in &self.nodes {
			if !types.iter().any(|t| *t == node.node_type) {
				types.push(node.node_type.clone());
			}
		}
		types
	}
}
