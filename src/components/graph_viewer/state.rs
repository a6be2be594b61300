//! Mutable viewer state shared by input handlers and the frame loop.

use std::collections::{HashMap, HashSet};

use log::debug;

use super::layout::{Layout, compute_layout, connectivity, visible_nodes};
use super::palette::GraphViewerConfig;
use super::render::Scene;
use super::transform::{PanState, ViewTransform};
use super::types::{Graph, GraphNode};

/// `MouseEvent.button` of the main (usually left) button.
pub const PRIMARY_BUTTON: i16 = 0;

/// All mutable viewer state. Event handlers and the frame loop share one instance.
pub struct GraphViewState {
	pub graph: Graph,
	pub config: GraphViewerConfig,
	pub transform: ViewTransform,
	pub pan: PanState,
	pub excluded: HashSet<String>,
	pub galaxy: bool,
	pub width: f64,
	pub height: f64,
	pub pixel_ratio: f64,
	selection: Option<String>,
	layout: Option<Layout>,
	connections: HashMap<String, usize>,
	needs_redraw: bool,
	suppress_click: bool,
}

impl GraphViewState {
	pub fn new(graph: Graph, config: GraphViewerConfig) -> Self {
		let connections = connectivity(&graph);
		Self {
			graph,
			config,
			transform: ViewTransform::default(),
			pan: PanState::default(),
			excluded: HashSet::new(),
			galaxy: false,
			width: 0.0,
			height: 0.0,
			pixel_ratio: 1.0,
			selection: None,
			layout: None,
			connections,
			needs_redraw: true,
			suppress_click: false,
		}
	}

	pub fn set_graph(&mut self, graph: Graph) {
		if graph == self.graph {
			return;
		}
		self.graph = graph;
		self.connections = connectivity(&self.graph);
		if let Some(id) = &self.selection {
			if self.graph.node(id).is_none() {
				self.selection = None;
			}
		}
		self.relayout();
	}

	pub fn set_filter(&mut self, excluded: HashSet<String>, galaxy: bool) {
		if excluded == self.excluded && galaxy == self.galaxy {
			return;
		}
		self.excluded = excluded;
		self.galaxy = galaxy;
		self.relayout();
	}

	pub fn resize(&mut self, width: f64, height: f64, pixel_ratio: f64) {
		self.width = width;
		self.height = height;
		self.pixel_ratio = pixel_ratio;
		self.relayout();
	}

	fn relayout(&mut self) {
		let visible = visible_nodes(&self.graph, &self.excluded, self.galaxy);
		self.layout = compute_layout(&self.graph, &visible, self.width, self.height);
		match &self.layout {
			Some(layout) => debug!(
				"Layout: {} of {} nodes on {}x{}",
				layout.len(),
				self.graph.nodes.len(),
				self.width,
				self.height
			),
			None => debug!("Layout deferred until the viewport has a size"),
		}
		self.request_redraw();
	}

	pub fn request_redraw(&mut self) {
		self.needs_redraw = true;
	}

	/// Consumes the pending redraw request, if any.
	pub fn take_redraw(&mut self) -> bool {
		std::mem::take(&mut self.needs_redraw)
	}

	/// Frame snapshot, or `None` while the viewport is empty.
	pub fn scene(&self) -> Option<Scene<'_>> {
		let layout = self.layout.as_ref()?;
		Some(Scene {
			graph: &self.graph,
			layout,
			connections: &self.connections,
			transform: self.transform,
			palette: &self.config.palette,
			root_type: &self.config.root_type,
			width: self.width,
			height: self.height,
			pixel_ratio: self.pixel_ratio,
		})
	}

	pub fn layout(&self) -> Option<&Layout> {
		self.layout.as_ref()
	}

	pub fn connections(&self) -> &HashMap<String, usize> {
		&self.connections
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<&GraphNode> {
		let point = self.transform.screen_to_graph(sx, sy);
		let idx = self
			.layout
			.as_ref()?
			.node_at(&self.graph, &self.connections, point)?;
		self.graph.nodes.get(idx)
	}

	pub fn on_wheel(&mut self, sx: f64, sy: f64, delta_y: f64) {
		self.transform.zoom_at(sx, sy, delta_y);
		self.request_redraw();
	}

	/// Only the primary button starts a pan.
	pub fn on_pointer_down(&mut self, sx: f64, sy: f64, button: i16) {
		if button == PRIMARY_BUTTON {
			self.pan.begin(sx, sy, &self.transform);
		}
	}

	pub fn on_pointer_move(&mut self, sx: f64, sy: f64) {
		if self.pan.update(sx, sy, &mut self.transform) {
			self.request_redraw();
		}
	}

	pub fn on_pointer_up(&mut self) {
		self.suppress_click = self.pan.end();
	}

	pub fn on_pointer_leave(&mut self) {
		self.pan.end();
		self.suppress_click = false;
	}

	/// Selects the node under the pointer. Misses and drag releases leave the
	/// selection untouched. Returns the current selection.
	pub fn on_click(&mut self, sx: f64, sy: f64) -> Option<&str> {
		if std::mem::take(&mut self.suppress_click) {
			return self.selection();
		}
		if let Some(id) = self.node_at_position(sx, sy).map(|n| n.id.clone()) {
			debug!("Selected node {id}");
			self.selection = Some(id);
			self.request_redraw();
		}
		self.selection()
	}

	pub fn selection(&self) -> Option<&str> {
		self.selection.as_deref()
	}

	pub fn set_selection(&mut self, id: Option<String>) {
		if self.selection != id {
			self.selection = id;
			self.request_redraw();
		}
	}

	pub fn clear_selection(&mut self) {
		self.set_selection(None);
	}

	pub fn reset_view(&mut self) {
		self.transform.reset();
		self.request_redraw();
	}
}
