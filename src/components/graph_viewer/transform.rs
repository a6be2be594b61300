//! Pan/zoom transform and drag tracking.

use super::layout::Point;

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 5.0;
pub const ZOOM_OUT_FACTOR: f64 = 0.9;
pub const ZOOM_IN_FACTOR: f64 = 1.1;
/// Pointer travel (screen pixels) after which a press counts as a drag, not a click.
pub const DRAG_THRESHOLD: f64 = 3.0;

/// Pan offset (`x`, `y`, screen pixels) and zoom scale `k`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	pub fn reset(&mut self) {
		*self = Self::default();
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> Point {
		Point::new((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	pub fn graph_to_screen(&self, p: Point) -> Point {
		Point::new(p.x * self.k + self.x, p.y * self.k + self.y)
	}

	/// Wheel zoom that keeps the graph point under the cursor fixed on screen.
	/// Positive `delta_y` (scrolling down) zooms out.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 {
			ZOOM_OUT_FACTOR
		} else {
			ZOOM_IN_FACTOR
		};
		let new_k = (self.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.k;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.k = new_k;
	}
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
	/// Set once the pointer travels past `DRAG_THRESHOLD` during this press.
	pub moved: bool,
}

impl PanState {
	pub fn begin(&mut self, x: f64, y: f64, transform: &ViewTransform) {
		*self = Self {
			active: true,
			start_x: x,
			start_y: y,
			transform_start_x: transform.x,
			transform_start_y: transform.y,
			moved: false,
		};
	}

	/// Tracks the pointer 1:1 while the button is held. Returns whether the pan changed.
	pub fn update(&mut self, x: f64, y: f64, transform: &mut ViewTransform) -> bool {
		if !self.active {
			return false;
		}
		let (dx, dy) = (x - self.start_x, y - self.start_y);
		if dx.hypot(dy) > DRAG_THRESHOLD {
			self.moved = true;
		}
		transform.x = self.transform_start_x + dx;
		transform.y = self.transform_start_y + dy;
		true
	}

	/// Releases the press; returns whether it was a drag.
	pub fn end(&mut self) -> bool {
		let dragged = self.active && self.moved;
		self.active = false;
		self.moved = false;
		dragged
	}
}
