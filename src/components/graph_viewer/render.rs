//! The draw pass: edges, arrowheads, nodes and labels.

use std::collections::HashMap;
use std::f64::consts::PI;

use super::layout::{Layout, node_radius};
use super::palette::Palette;
use super::surface::{Shadow, Surface};
use super::transform::ViewTransform;
use super::types::Graph;

const EDGE_ALPHA: f64 = 0.7;
/// Arrow tips stop this far short of the destination centre.
const ARROW_INSET: f64 = 18.0;
const LABEL_MAX_CHARS: usize = 30;
const LABEL_KEEP_CHARS: usize = 27;
const LABEL_PADDING: f64 = 4.0;
const LABEL_LINE_HEIGHT: f64 = 14.0;
const NODE_SHADOW: Shadow = Shadow {
	color: "rgba(0,0,0,0.2)",
	blur: 4.0,
	offset_x: 2.0,
	offset_y: 2.0,
};

/// Everything one frame needs, borrowed for the duration of the draw pass.
pub struct Scene<'a> {
	pub graph: &'a Graph,
	pub layout: &'a Layout,
	pub connections: &'a HashMap<String, usize>,
	pub transform: ViewTransform,
	pub palette: &'a Palette,
	pub root_type: &'a str,
	pub width: f64,
	pub height: f64,
	pub pixel_ratio: f64,
}

impl Scene<'_> {
	fn connections_of(&self, id: &str) -> usize {
		self.connections.get(id).copied().unwrap_or(0)
	}
}

pub fn render(scene: &Scene, surface: &mut impl Surface) {
	surface.set_base_scale(scene.pixel_ratio);
	surface.clear(scene.width, scene.height);
	surface.save();
	surface.translate(scene.transform.x, scene.transform.y);
	surface.scale(scene.transform.k);
	draw_edges(scene, surface);
	draw_nodes(scene, surface);
	surface.restore();
}

fn draw_edges(scene: &Scene, surface: &mut impl Surface) {
	let k = scene.transform.k;
	let (line_width, arrow_size) = ((3.0 / k).max(2.0), (10.0 / k).max(8.0));

	for edge in &scene.graph.edges {
		let (Some(from), Some(to)) = (
			scene.layout.position(&edge.from),
			scene.layout.position(&edge.to),
		) else {
			continue;
		};
		let color = scene.palette.edge_color(&edge.edge_type);

		surface.set_stroke(color);
		surface.set_line_width(line_width);
		surface.set_alpha(EDGE_ALPHA);
		surface.begin_path();
		surface.move_to(from.x, from.y);
		surface.line_to(to.x, to.y);
		surface.stroke();
		surface.set_alpha(1.0);

		let angle = (to.y - from.y).atan2(to.x - from.x);
		let (tip_x, tip_y) = (
			to.x - angle.cos() * ARROW_INSET,
			to.y - angle.sin() * ARROW_INSET,
		);
		surface.set_fill(color);
		surface.begin_path();
		surface.move_to(tip_x, tip_y);
		surface.line_to(
			tip_x - arrow_size * (angle - PI / 6.0).cos(),
			tip_y - arrow_size * (angle - PI / 6.0).sin(),
		);
		surface.line_to(
			tip_x - arrow_size * (angle + PI / 6.0).cos(),
			tip_y - arrow_size * (angle + PI / 6.0).sin(),
		);
		surface.close_path();
		surface.fill();
	}
}

fn draw_nodes(scene: &Scene, surface: &mut impl Surface) {
	let k = scene.transform.k;

	for placed in &scene.layout.nodes {
		let node = &scene.graph.nodes[placed.index];
		let connections = scene.connections_of(&node.id);
		let radius = node_radius(connections) / k;
		let (x, y) = (placed.pos.x, placed.pos.y);

		surface.set_shadow(Some(NODE_SHADOW));
		surface.set_fill(scene.palette.node_color(&node.node_type));
		surface.begin_path();
		surface.circle(x, y, radius);
		surface.fill();
		surface.set_shadow(None);

		surface.set_stroke("#ffffff");
		surface.set_line_width(2.0 / k);
		surface.stroke();

		if k > 0.5 || node.node_type == scene.root_type || connections > 5 {
			let label = truncate_label(&node.label);
			let label_y = y + radius + 4.0;
			surface.set_font(&format!("{}px sans-serif", (12.0 / k).max(10.0)));
			let text_width = surface.measure_text(&label);

			surface.set_fill("rgba(255, 255, 255, 0.9)");
			surface.fill_rect(
				x - text_width / 2.0 - LABEL_PADDING,
				label_y - LABEL_PADDING,
				text_width + LABEL_PADDING * 2.0,
				LABEL_LINE_HEIGHT + LABEL_PADDING * 2.0,
			);
			surface.set_fill("#2d3748");
			surface.fill_text(&label, x, label_y);
		}
	}
}

/// Labels longer than 30 characters keep their first 27 plus an ellipsis.
pub fn truncate_label(label: &str) -> String {
	if label.chars().count() > LABEL_MAX_CHARS {
		let mut short: String = label.chars().take(LABEL_KEEP_CHARS).collect();
		short.push_str("...");
		short
	} else {
		label.to_string()
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;
	use crate::components::graph_viewer::layout::tests::{edge, node, two_ring_graph};
	use crate::components::graph_viewer::layout::{compute_layout, connectivity, visible_nodes};
	use crate::components::graph_viewer::surface::recording::{Op, RecordingSurface};

	fn draw(graph: &Graph, excluded: &HashSet<String>, transform: ViewTransform) -> Vec<Op> {
		let visible = visible_nodes(graph, excluded, false);
		let layout = compute_layout(graph, &visible, 800.0, 500.0).unwrap();
		let connections = connectivity(graph);
		let palette = Palette::default();
		let scene = Scene {
			graph,
			layout: &layout,
			connections: &connections,
			transform,
			palette: &palette,
			root_type: "Document",
			width: 800.0,
			height: 500.0,
			pixel_ratio: 1.0,
		};
		let mut surface = RecordingSurface::default();
		render(&scene, &mut surface);
		surface.ops
	}

	fn count(ops: &[Op], pred: impl Fn(&Op) -> bool) -> usize {
		ops.iter().filter(|op| pred(op)).count()
	}

	#[test]
	fn draw_pass_is_idempotent() {
		let graph = two_ring_graph();
		let t = ViewTransform {
			x: 12.0,
			y: -4.0,
			k: 1.7,
		};
		assert_eq!(
			draw(&graph, &HashSet::new(), t),
			draw(&graph, &HashSet::new(), t)
		);
	}

	#[test]
	fn frame_is_wrapped_in_transform() {
		let ops = draw(
			&two_ring_graph(),
			&HashSet::new(),
			ViewTransform {
				x: 3.0,
				y: 4.0,
				k: 2.0,
			},
		);
		assert_eq!(
			&ops[..5],
			&[
				Op::BaseScale(1.0),
				Op::Clear(800.0, 500.0),
				Op::Save,
				Op::Translate(3.0, 4.0),
				Op::Scale(2.0),
			]
		);
		assert_eq!(ops.last(), Some(&Op::Restore));
	}

	#[test]
	fn dangling_edges_are_skipped() {
		let mut graph = two_ring_graph();
		graph.edges = vec![edge("a1", "missing"), edge("a1", "b1")];
		let ops = draw(&graph, &HashSet::new(), ViewTransform::default());
		// One edge stroke plus one border stroke per node.
		assert_eq!(count(&ops, |op| *op == Op::StrokePath), 1 + 5);
	}

	#[test]
	fn edges_to_filtered_nodes_are_not_drawn() {
		let graph = two_ring_graph();
		let excluded: HashSet<String> = ["B".to_string()].into();
		let ops = draw(&graph, &excluded, ViewTransform::default());
		assert_eq!(count(&ops, |op| matches!(op, Op::Circle(..))), 3);
		assert_eq!(count(&ops, |op| *op == Op::Alpha(EDGE_ALPHA)), 0);
	}

	#[test]
	fn strokes_and_radii_compensate_for_zoom() {
		let graph = Graph {
			nodes: vec![node("a", "A"), node("b", "A")],
			edges: vec![edge("a", "b")],
		};
		let ops = draw(
			&graph,
			&HashSet::new(),
			ViewTransform {
				x: 0.0,
				y: 0.0,
				k: 0.5,
			},
		);
		assert!(ops.contains(&Op::LineWidth(6.0)));
		// Each node has one connection: radius 9.5 screen px.
		assert!(ops.iter().any(|op| matches!(op, Op::Circle(_, _, r) if *r == 19.0)));
	}

	#[test]
	fn labels_hide_when_zoomed_out_except_roots() {
		let graph = Graph {
			nodes: vec![node("d", "Document"), node("s", "Section")],
			edges: vec![],
		};
		let zoomed_out = ViewTransform {
			x: 0.0,
			y: 0.0,
			k: 0.4,
		};
		let ops = draw(&graph, &HashSet::new(), zoomed_out);
		let texts: Vec<&str> = ops
			.iter()
			.filter_map(|op| match op {
				Op::Text(t, ..) => Some(t.as_str()),
				_ => None,
			})
			.collect();
		assert_eq!(texts, vec!["Document d"]);

		let ops = draw(&graph, &HashSet::new(), ViewTransform::default());
		assert_eq!(count(&ops, |op| matches!(op, Op::Text(..))), 2);
	}

	#[test]
	fn label_background_fits_text() {
		let graph = Graph {
			nodes: vec![node("n", "A")],
			edges: vec![],
		};
		let ops = draw(&graph, &HashSet::new(), ViewTransform::default());
		let Some(Op::Text(text, x, y)) = ops.iter().find(|op| matches!(op, Op::Text(..))) else {
			panic!("label not drawn");
		};
		let width = text.chars().count() as f64 * 6.0;
		assert!(ops.contains(&Op::FillRect(
			x - width / 2.0 - 4.0,
			y - 4.0,
			width + 8.0,
			22.0
		)));
	}

	#[test]
	fn long_labels_are_truncated() {
		assert_eq!(truncate_label("short"), "short");
		let exact = "x".repeat(30);
		assert_eq!(truncate_label(&exact), exact);
		let long = "Security and Audit Logging Standard v2";
		assert_eq!(truncate_label(long), "Security and Audit Logging ...");
		assert_eq!(truncate_label(&"é".repeat(40)).chars().count(), 30);
	}
}
