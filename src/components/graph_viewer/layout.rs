//! Concentric ring-by-type layout, connectivity sizing and hit-testing.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use super::types::Graph;

pub const RING_SPACING: f64 = 80.0;
pub const RING_STAGGER: f64 = 0.5;
pub const BASE_RADIUS_RATIO: f64 = 0.3;
pub const MIN_NODE_RADIUS: f64 = 8.0;
pub const MAX_NODE_RADIUS: f64 = 20.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(self, other: Point) -> f64 {
		(self.x - other.x).hypot(self.y - other.y)
	}
}

/// A visible node and where it sits in layout space.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedNode {
	/// Index into `Graph::nodes`.
	pub index: usize,
	pub pos: Point,
}

/// Positions for the visible node set, in input order.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
	pub center: Point,
	pub base_radius: f64,
	pub nodes: Vec<PlacedNode>,
	by_id: HashMap<String, usize>,
}

impl Layout {
	pub fn position(&self, id: &str) -> Option<Point> {
		self.by_id.get(id).map(|&i| self.nodes[i].pos)
	}

	pub fn contains(&self, id: &str) -> bool {
		self.by_id.contains_key(id)
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// First visible node whose circle contains `point` (layout space).
	///
	/// The radius is the un-zoomed pixel radius, so the hit area is measured in
	/// layout units regardless of the current zoom.
	pub fn node_at(
		&self,
		graph: &Graph,
		connections: &HashMap<String, usize>,
		point: Point,
	) -> Option<usize> {
		self.nodes
			.iter()
			.find(|placed| {
				let id = &graph.nodes[placed.index].id;
				let radius = node_radius(connections.get(id).copied().unwrap_or(0));
				placed.pos.distance(point) < radius
			})
			.map(|placed| placed.index)
	}
}

/// Indices of the nodes to lay out and draw. Galaxy mode ignores the filter.
pub fn visible_nodes(graph: &Graph, excluded: &HashSet<String>, galaxy: bool) -> Vec<usize> {
	graph
		.nodes
		.iter()
		.enumerate()
		.filter(|(_, n)| galaxy || !excluded.contains(&n.node_type))
		.map(|(i, _)| i)
		.collect()
}

/// Edge count per node id over the full, unfiltered edge set.
pub fn connectivity(graph: &Graph) -> HashMap<String, usize> {
	let mut counts: HashMap<String, usize> = HashMap::new();
	for edge in &graph.edges {
		*counts.entry(edge.from.clone()).or_default() += 1;
		*counts.entry(edge.to.clone()).or_default() += 1;
	}
	counts
}

pub fn node_radius(connections: usize) -> f64 {
	(MIN_NODE_RADIUS + connections as f64 * 1.5).clamp(MIN_NODE_RADIUS, MAX_NODE_RADIUS)
}

/// Places each node type on its own concentric ring around the viewport centre.
///
/// Returns `None` for an empty viewport; the caller defers drawing until a
/// real size is known.
pub fn compute_layout(graph: &Graph, visible: &[usize], width: f64, height: f64) -> Option<Layout> {
	if !(width > 0.0 && height > 0.0) {
		return None;
	}

	// Rings in order of first appearance, members in input order.
	let mut rings: Vec<(&str, Vec<usize>)> = Vec::new();
	for &idx in visible {
		let node_type = graph.nodes[idx].node_type.as_str();
		match rings.iter_mut().find(|(t, _)| *t == node_type) {
			Some((_, members)) => members.push(idx),
			None => rings.push((node_type, vec![idx])),
		}
	}

	let center = Point::new(width / 2.0, height / 2.0);
	let base_radius = width.min(height) * BASE_RADIUS_RATIO;
	let mut placed = vec![None; graph.nodes.len()];

	for (ring, (_, members)) in rings.iter().enumerate() {
		let radius = base_radius + ring as f64 * RING_SPACING;
		let count = members.len() as f64;
		for (i, &idx) in members.iter().enumerate() {
			let angle = (i as f64 / count) * 2.0 * PI + ring as f64 * RING_STAGGER;
			placed[idx] = Some(Point::new(
				center.x + radius * angle.cos(),
				center.y + radius * angle.sin(),
			));
		}
	}

	let nodes: Vec<PlacedNode> = visible
		.iter()
		.filter_map(|&index| placed[index].map(|pos| PlacedNode { index, pos }))
		.collect();
	let by_id = nodes
		.iter()
		.enumerate()
		.map(|(i, p)| (graph.nodes[p.index].id.clone(), i))
		.collect();

	Some(Layout {
		center,
		base_radius,
		nodes,
		by_id,
	})
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;
	use crate::components::graph_viewer::types::{GraphEdge, GraphNode};

	pub(crate) fn node(id: &str, node_type: &str) -> GraphNode {
		GraphNode {
			id: id.into(),
			node_type: node_type.into(),
			label: format!("{node_type} {id}"),
			props: Default::default(),
		}
	}

	pub(crate) fn edge(from: &str, to: &str) -> GraphEdge {
		GraphEdge {
			from: from.into(),
			to: to.into(),
			edge_type: "relate_to".into(),
			label: None,
		}
	}

	/// Three `A` nodes followed by two `B` nodes, interleaved in input order.
	pub(crate) fn two_ring_graph() -> Graph {
		Graph {
			nodes: vec![
				node("a1", "A"),
				node("b1", "B"),
				node("a2", "A"),
				node("a3", "A"),
				node("b2", "B"),
			],
			edges: vec![edge("a1", "b1"), edge("a2", "b1"), edge("b2", "a3")],
		}
	}

	fn angle_of(layout: &Layout, id: &str) -> f64 {
		let p = layout.position(id).unwrap();
		let a = (p.y - layout.center.y).atan2(p.x - layout.center.x);
		if a < -1e-9 { a + 2.0 * PI } else { a }
	}

	#[test]
	fn layout_is_deterministic() {
		let graph = two_ring_graph();
		let visible = visible_nodes(&graph, &HashSet::new(), false);
		let first = compute_layout(&graph, &visible, 800.0, 500.0);
		let second = compute_layout(&graph, &visible, 800.0, 500.0);
		assert_eq!(first, second);
	}

	#[test]
	fn types_are_placed_on_concentric_rings() {
		let graph = two_ring_graph();
		let visible = visible_nodes(&graph, &HashSet::new(), false);
		let layout = compute_layout(&graph, &visible, 800.0, 500.0).unwrap();
		assert_eq!(layout.base_radius, 150.0);
		assert_eq!(layout.center, Point::new(400.0, 250.0));

		for id in ["a1", "a2", "a3"] {
			let r = layout.position(id).unwrap().distance(layout.center);
			assert!((r - 150.0).abs() < 1e-9, "{id} at radius {r}");
		}
		for id in ["b1", "b2"] {
			let r = layout.position(id).unwrap().distance(layout.center);
			assert!((r - 230.0).abs() < 1e-9, "{id} at radius {r}");
		}

		let expected = [0.0, 2.0 * PI / 3.0, 4.0 * PI / 3.0];
		for (id, want) in ["a1", "a2", "a3"].iter().zip(expected) {
			assert!((angle_of(&layout, id) - want).abs() < 1e-9);
		}
		// Second ring is staggered by half a radian.
		assert!((angle_of(&layout, "b1") - 0.5).abs() < 1e-9);
		assert!((angle_of(&layout, "b2") - (PI + 0.5)).abs() < 1e-9);
	}

	#[test]
	fn filtered_types_are_absent_but_still_counted() {
		let graph = two_ring_graph();
		let excluded: HashSet<String> = ["B".to_string()].into();
		let visible = visible_nodes(&graph, &excluded, false);
		let layout = compute_layout(&graph, &visible, 800.0, 500.0).unwrap();

		assert_eq!(layout.len(), 3);
		assert!(!layout.contains("b1") && !layout.contains("b2"));
		let counts = connectivity(&graph);
		assert_eq!(counts["b1"], 2);
		assert_eq!(counts["a3"], 1);
	}

	#[test]
	fn galaxy_mode_ignores_the_filter() {
		let graph = two_ring_graph();
		let excluded: HashSet<String> = ["A".to_string(), "B".to_string()].into();
		assert_eq!(visible_nodes(&graph, &excluded, true).len(), 5);
		assert!(visible_nodes(&graph, &excluded, false).is_empty());
	}

	#[test]
	fn layout_keys_match_visible_set() {
		let graph = two_ring_graph();
		let excluded: HashSet<String> = ["A".to_string()].into();
		let visible = visible_nodes(&graph, &excluded, false);
		let layout = compute_layout(&graph, &visible, 640.0, 480.0).unwrap();
		let ids: Vec<&str> = layout
			.nodes
			.iter()
			.map(|p| graph.nodes[p.index].id.as_str())
			.collect();
		assert_eq!(ids, vec!["b1", "b2"]);
	}

	#[test]
	fn empty_viewport_defers_layout() {
		let graph = two_ring_graph();
		let visible = visible_nodes(&graph, &HashSet::new(), false);
		assert!(compute_layout(&graph, &visible, 0.0, 500.0).is_none());
		assert!(compute_layout(&graph, &visible, 800.0, 0.0).is_none());
	}

	#[test]
	fn radius_is_clamped() {
		assert_eq!(node_radius(0), 8.0);
		assert_eq!(node_radius(2), 11.0);
		assert_eq!(node_radius(8), 20.0);
		assert_eq!(node_radius(100), 20.0);
	}

	#[test]
	fn hit_test_prefers_first_node_in_input_order() {
		let graph = Graph {
			nodes: vec![node("x", "A"), node("y", "A")],
			edges: vec![],
		};
		let visible = visible_nodes(&graph, &HashSet::new(), false);
		let mut layout = compute_layout(&graph, &visible, 800.0, 500.0).unwrap();
		// Stack both nodes on the same spot.
		let shared = layout.nodes[0].pos;
		layout.nodes[1].pos = shared;
		let counts = connectivity(&graph);
		assert_eq!(layout.node_at(&graph, &counts, shared), Some(0));
		assert_eq!(
			layout.node_at(&graph, &counts, Point::new(shared.x + 50.0, shared.y)),
			None
		);
	}
}
