//! Drawing-surface abstraction over the 2D canvas context.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
	pub color: &'static str,
	pub blur: f64,
	pub offset_x: f64,
	pub offset_y: f64,
}

/// Immediate-mode 2D drawing operations used by the draw pass.
pub trait Surface {
	/// Resets the frame to a plain device-pixel-ratio scale.
	fn set_base_scale(&mut self, ratio: f64);
	fn clear(&mut self, width: f64, height: f64);
	fn save(&mut self);
	fn restore(&mut self);
	fn translate(&mut self, x: f64, y: f64);
	fn scale(&mut self, k: f64);

	fn set_fill(&mut self, color: &str);
	fn set_stroke(&mut self, color: &str);
	fn set_line_width(&mut self, width: f64);
	fn set_alpha(&mut self, alpha: f64);
	fn set_shadow(&mut self, shadow: Option<Shadow>);
	fn set_font(&mut self, font: &str);

	fn begin_path(&mut self);
	fn move_to(&mut self, x: f64, y: f64);
	fn line_to(&mut self, x: f64, y: f64);
	fn close_path(&mut self);
	fn circle(&mut self, x: f64, y: f64, radius: f64);
	fn stroke(&mut self);
	fn fill(&mut self);

	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
	fn measure_text(&mut self, text: &str) -> f64;
	/// Text horizontally centred on `x` with its top edge at `y`.
	fn fill_text(&mut self, text: &str, x: f64, y: f64);
}

impl Surface for CanvasRenderingContext2d {
	fn set_base_scale(&mut self, ratio: f64) {
		let _ = self.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0);
	}

	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn save(&mut self) {
		CanvasRenderingContext2d::save(self);
	}

	fn restore(&mut self) {
		CanvasRenderingContext2d::restore(self);
	}

	fn translate(&mut self, x: f64, y: f64) {
		let _ = CanvasRenderingContext2d::translate(self, x, y);
	}

	fn scale(&mut self, k: f64) {
		let _ = CanvasRenderingContext2d::scale(self, k, k);
	}

	fn set_fill(&mut self, color: &str) {
		self.set_fill_style_str(color);
	}

	fn set_stroke(&mut self, color: &str) {
		self.set_stroke_style_str(color);
	}

	fn set_line_width(&mut self, width: f64) {
		CanvasRenderingContext2d::set_line_width(self, width);
	}

	fn set_alpha(&mut self, alpha: f64) {
		self.set_global_alpha(alpha);
	}

	fn set_shadow(&mut self, shadow: Option<Shadow>) {
		match shadow {
			Some(s) => {
				self.set_shadow_color(s.color);
				self.set_shadow_blur(s.blur);
				self.set_shadow_offset_x(s.offset_x);
				self.set_shadow_offset_y(s.offset_y);
			}
			None => self.set_shadow_color("transparent"),
		}
	}

	fn set_font(&mut self, font: &str) {
		CanvasRenderingContext2d::set_font(self, font);
	}

	fn begin_path(&mut self) {
		CanvasRenderingContext2d::begin_path(self);
	}

	fn move_to(&mut self, x: f64, y: f64) {
		CanvasRenderingContext2d::move_to(self, x, y);
	}

	fn line_to(&mut self, x: f64, y: f64) {
		CanvasRenderingContext2d::line_to(self, x, y);
	}

	fn close_path(&mut self) {
		CanvasRenderingContext2d::close_path(self);
	}

	fn circle(&mut self, x: f64, y: f64, radius: f64) {
		let _ = self.arc(x, y, radius, 0.0, 2.0 * PI);
	}

	fn stroke(&mut self) {
		CanvasRenderingContext2d::stroke(self);
	}

	fn fill(&mut self) {
		CanvasRenderingContext2d::fill(self);
	}

	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
		CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
	}

	fn measure_text(&mut self, text: &str) -> f64 {
		CanvasRenderingContext2d::measure_text(self, text)
			.map(|m| m.width())
			.unwrap_or(0.0)
	}

	fn fill_text(&mut self, text: &str, x: f64, y: f64) {
		self.set_text_align("center");
		self.set_text_baseline("top");
		let _ = CanvasRenderingContext2d::fill_text(self, text, x, y);
	}
}

/// Records every call so tests can compare and inspect draw passes.
#[cfg(test)]
pub(crate) mod recording {
	use super::{Shadow, Surface};

	#[derive(Clone, Debug, PartialEq)]
	pub(crate) enum Op {
		BaseScale(f64),
		Clear(f64, f64),
		Save,
		Restore,
		Translate(f64, f64),
		Scale(f64),
		Fill(String),
		Stroke(String),
		LineWidth(f64),
		Alpha(f64),
		Shadow(Option<Shadow>),
		Font(String),
		BeginPath,
		MoveTo(f64, f64),
		LineTo(f64, f64),
		ClosePath,
		Circle(f64, f64, f64),
		StrokePath,
		FillPath,
		FillRect(f64, f64, f64, f64),
		Text(String, f64, f64),
	}

	/// Text is measured at a fixed 6px per character.
	#[derive(Default)]
	pub(crate) struct RecordingSurface {
		pub(crate) ops: Vec<Op>,
	}

	impl Surface for RecordingSurface {
		fn set_base_scale(&mut self, ratio: f64) {
			self.ops.push(Op::BaseScale(ratio));
		}
		fn clear(&mut self, width: f64, height: f64) {
			self.ops.push(Op::Clear(width, height));
		}
		fn save(&mut self) {
			self.ops.push(Op::Save);
		}
		fn restore(&mut self) {
			self.ops.push(Op::Restore);
		}
		fn translate(&mut self, x: f64, y: f64) {
			self.ops.push(Op::Translate(x, y));
		}
		fn scale(&mut self, k: f64) {
			self.ops.push(Op::Scale(k));
		}
		fn set_fill(&mut self, color: &str) {
			self.ops.push(Op::Fill(color.into()));
		}
		fn set_stroke(&mut self, color: &str) {
			self.ops.push(Op::Stroke(color.into()));
		}
		fn set_line_width(&mut self, width: f64) {
			self.ops.push(Op::LineWidth(width));
		}
		fn set_alpha(&mut self, alpha: f64) {
			self.ops.push(Op::Alpha(alpha));
		}
		fn set_shadow(&mut self, shadow: Option<Shadow>) {
			self.ops.push(Op::Shadow(shadow));
		}
		fn set_font(&mut self, font: &str) {
			self.ops.push(Op::Font(font.into()));
		}
		fn begin_path(&mut self) {
			self.ops.push(Op::BeginPath);
		}
		fn move_to(&mut self, x: f64, y: f64) {
			self.ops.push(Op::MoveTo(x, y));
		}
		fn line_to(&mut self, x: f64, y: f64) {
			self.ops.push(Op::LineTo(x, y));
		}
		fn close_path(&mut self) {
			self.ops.push(Op::ClosePath);
		}
		fn circle(&mut self, x: f64, y: f64, radius: f64) {
			self.ops.push(Op::Circle(x, y, radius));
		}
		fn stroke(&mut self) {
			self.ops.push(Op::StrokePath);
		}
		fn fill(&mut self) {
			self.ops.push(Op::FillPath);
		}
		fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
			self.ops.push(Op::FillRect(x, y, width, height));
		}
		fn measure_text(&mut self, text: &str) -> f64 {
			text.chars().count() as f64 * 6.0
		}
		fn fill_text(&mut self, text: &str, x: f64, y: f64) {
			self.ops.push(Op::Text(text.into(), x, y));
		}
	}
}
