//! Contents of the selected-node details panel.

use super::types::Graph;

/// Connections listed in the details panel.
pub const MAX_LISTED_CONNECTIONS: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
	Outgoing,
	Incoming,
}

impl Direction {
	pub fn arrow(self) -> &'static str {
		match self {
			Direction::Outgoing => "→",
			Direction::Incoming => "←",
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionLine {
	pub direction: Direction,
	pub relation: String,
	pub other: String,
}

/// What the details panel shows for the selected node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeDetails {
	pub id: String,
	pub node_type: String,
	pub label: String,
	/// Pretty-printed properties; `None` when the node has none.
	pub props: Option<String>,
	pub edge_count: usize,
	pub connections: Vec<ConnectionLine>,
}

impl NodeDetails {
	/// Built from the unfiltered graph, so hidden neighbours are still listed.
	pub fn for_node(graph: &Graph, id: &str) -> Option<Self> {
		let node = graph.node(id)?;
		let props = (!node.props.is_empty())
			.then(|| serde_json::to_string_pretty(&node.props).ok())
			.flatten();
		let touching: Vec<_> = graph.edges.iter().filter(|e| e.touches(id)).collect();
		let connections = touching
			.iter()
			.take(MAX_LISTED_CONNECTIONS)
			.map(|edge| {
				let (direction, other) = if edge.from == id {
					(Direction::Outgoing, &edge.to)
				} else {
					(Direction::Incoming, &edge.from)
				};
				ConnectionLine {
					direction,
					relation: edge.display_label().to_string(),
					other: other.clone(),
				}
			})
			.collect();

		Some(Self {
			id: node.id.clone(),
			node_type: node.node_type.clone(),
			label: node.label.clone(),
			props,
			edge_count: touching.len(),
			connections,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::graph_viewer::layout::tests::{edge, node};

	#[test]
	fn lists_directions_and_relation_labels() {
		let mut labelled = edge("doc", "std");
		labelled.label = Some("aligns with".into());
		let graph = Graph {
			nodes: vec![node("doc", "Document"), node("std", "Standard"), node("sec", "Section")],
			edges: vec![labelled, edge("sec", "doc"), edge("std", "sec")],
		};
		let details = NodeDetails::for_node(&graph, "doc").unwrap();
		assert_eq!(details.edge_count, 2);
		assert_eq!(details.props, None);
		assert_eq!(
			details.connections,
			vec![
				ConnectionLine {
					direction: Direction::Outgoing,
					relation: "aligns with".into(),
					other: "std".into(),
				},
				ConnectionLine {
					direction: Direction::Incoming,
					relation: "relate_to".into(),
					other: "sec".into(),
				},
			]
		);
		assert_eq!(details.connections[1].direction.arrow(), "←");
	}

	#[test]
	fn caps_listed_connections_but_counts_all() {
		let mut graph = Graph {
			nodes: vec![node("hub", "Document")],
			edges: vec![],
		};
		for i in 0..14 {
			graph.edges.push(edge("hub", &format!("n{i}")));
		}
		let details = NodeDetails::for_node(&graph, "hub").unwrap();
		assert_eq!(details.edge_count, 14);
		assert_eq!(details.connections.len(), MAX_LISTED_CONNECTIONS);
		assert_eq!(details.connections[9].other, "n9");
	}

	#[test]
	fn props_are_pretty_printed_in_order() {
		let mut doc = node("doc", "Document");
		doc.props.insert("version".into(), "2.0".into());
		doc.props.insert("owner".into(), "CISO".into());
		let graph = Graph {
			nodes: vec![doc],
			edges: vec![],
		};
		let details = NodeDetails::for_node(&graph, "doc").unwrap();
		assert_eq!(
			details.props.as_deref(),
			Some("{\n  \"version\": \"2.0\",\n  \"owner\": \"CISO\"\n}")
		);
	}

	#[test]
	fn unknown_id_has_no_details() {
		assert_eq!(NodeDetails::for_node(&Graph::default(), "nope"), None);
	}
}
