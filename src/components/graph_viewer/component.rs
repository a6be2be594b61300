use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, WheelEvent, Window,
};

use super::details::NodeDetails;
use super::export::download_graph;
use super::palette::GraphViewerConfig;
use super::render;
use super::state::GraphViewState;
use super::types::Graph;

type CanvasRef = NodeRef<leptos::html::Canvas>;
type FrameCallback = Closure<dyn FnMut()>;

/// Browser callbacks owned by one mounted viewer. The frame callback re-arms
/// itself through this struct, so it stays alive until the handles are taken.
struct LoopHandles<C> {
	animate: Option<C>,
	resize: Option<C>,
	/// Id of the pending animation frame.
	frame: Option<i32>,
}

impl<C> Default for LoopHandles<C> {
	fn default() -> Self {
		Self {
			animate: None,
			resize: None,
			frame: None,
		}
	}
}

/// Cancels the pending frame, unregisters the resize listener and drops both callbacks.
fn release_loop(handles: &RefCell<LoopHandles<FrameCallback>>) {
	let LoopHandles {
		animate,
		resize,
		frame,
	} = handles.take();
	if let Some(window) = web_sys::window() {
		if let Some(id) = frame {
			let _ = window.cancel_animation_frame(id);
		}
		if let Some(cb) = &resize {
			let _ =
				window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
	}
	drop(animate);
	debug!("Graph viewer unmounted, frame loop released");
}

/// Pointer position relative to the canvas' top-left corner.
fn local_point(canvas_ref: CanvasRef, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn set_cursor(canvas_ref: CanvasRef, cursor: &str) {
	if let Some(canvas) = canvas_ref.get_untracked() {
		let _ = HtmlElement::style(&canvas).set_property("cursor", cursor);
	}
}

/// Width follows the container, height is fixed by the host.
fn viewport_size(canvas: &HtmlCanvasElement, height: f64) -> (f64, f64) {
	let width = canvas
		.parent_element()
		.map(|p| p.client_width() as f64)
		.unwrap_or(800.0);
	(width, height)
}

fn apply_size(canvas: &HtmlCanvasElement, width: f64, height: f64, ratio: f64) {
	canvas.set_width((width * ratio) as u32);
	canvas.set_height((height * ratio) as u32);
	let style = HtmlElement::style(canvas);
	let _ = style.set_property("width", &format!("{width}px"));
	let _ = style.set_property("height", &format!("{height}px"));
}

/// Interactive ring-layout view of one graph, with type filters, export and a
/// details panel for the clicked node.
#[component]
pub fn GraphViewer(
	#[prop(into)] data: Signal<Graph>,
	#[prop(into)] title: String,
	#[prop(optional)] config: Option<GraphViewerConfig>,
) -> impl IntoView {
	let config = config.unwrap_or_default();
	let height = config.height;
	let legend = config.palette.edge_colors.clone();

	let canvas_ref = CanvasRef::new();
	let state = Rc::new(RefCell::new(GraphViewState::new(
		data.get_untracked(),
		config,
	)));
	let handles: Rc<RefCell<LoopHandles<FrameCallback>>> = Rc::default();

	let galaxy = RwSignal::new(false);
	let excluded = RwSignal::new(HashSet::<String>::new());
	let selected = RwSignal::new(None::<String>);
	let zoom = RwSignal::new(1.0_f64);
	let node_types = Memo::new(move |_| data.with(Graph::node_types));

	let state_data = state.clone();
	Effect::new(move |_| {
		let graph = data.get();
		let kept = {
			let mut s = state_data.borrow_mut();
			s.set_graph(graph);
			s.selection().map(String::from)
		};
		if kept.is_none() && selected.get_untracked().is_some() {
			selected.set(None);
		}
	});

	let state_filter = state.clone();
	Effect::new(move |_| {
		let (ex, show_all) = (excluded.get(), galaxy.get());
		state_filter.borrow_mut().set_filter(ex, show_all);
	});

	let state_select = state.clone();
	Effect::new(move |_| {
		let id = selected.get();
		state_select.borrow_mut().set_selection(id);
	});

	let (state_init, handles_init) = (state.clone(), handles.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window): Option<Window> = web_sys::window() else {
			return;
		};
		// A remount of the canvas replaces the previous loop.
		release_loop(&handles_init);

		let ratio = window.device_pixel_ratio();
		let (w, h) = viewport_size(&canvas, height);
		apply_size(&canvas, w, h, ratio);

		let Some(mut ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("2d canvas context unavailable, graph will not be drawn");
			return;
		};
		state_init.borrow_mut().resize(w, h, ratio);

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		let on_resize = FrameCallback::new(move || {
			let ratio = web_sys::window()
				.map(|w| w.device_pixel_ratio())
				.unwrap_or(1.0);
			let (nw, nh) = viewport_size(&canvas_resize, height);
			apply_size(&canvas_resize, nw, nh, ratio);
			state_resize.borrow_mut().resize(nw, nh, ratio);
		});
		let _ = window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());

		let (state_anim, handles_anim) = (state_init.clone(), handles_init.clone());
		let animate = FrameCallback::new(move || {
			{
				let mut s = state_anim.borrow_mut();
				if s.take_redraw() {
					match s.scene() {
						Some(scene) => render::render(&scene, &mut ctx),
						None => debug!("Draw deferred, viewport has no size"),
					}
				}
			}
			let mut h = handles_anim.borrow_mut();
			let next = match (&h.animate, web_sys::window()) {
				(Some(cb), Some(win)) => win.request_animation_frame(cb.as_ref().unchecked_ref()).ok(),
				_ => None,
			};
			h.frame = next;
		});
		let first = window.request_animation_frame(animate.as_ref().unchecked_ref()).ok();

		*handles_init.borrow_mut() = LoopHandles {
			animate: Some(animate),
			resize: Some(on_resize),
			frame: first,
		};
	});

	let handles_cleanup = SendWrapper::new(handles);
	on_cleanup(move || release_loop(&handles_cleanup));

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		let mut s = state_md.borrow_mut();
		s.on_pointer_down(x, y, ev.button());
		if s.pan.active {
			set_cursor(canvas_ref, "grabbing");
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		state_mm.borrow_mut().on_pointer_move(x, y);
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		state_mu.borrow_mut().on_pointer_up();
		set_cursor(canvas_ref, "grab");
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		state_ml.borrow_mut().on_pointer_leave();
		set_cursor(canvas_ref, "grab");
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		let k = {
			let mut s = state_wh.borrow_mut();
			s.on_wheel(x, y, ev.delta_y());
			s.transform.k
		};
		zoom.set(k);
	};

	let state_click = state.clone();
	let on_click = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		let picked = state_click.borrow_mut().on_click(x, y).map(String::from);
		if picked != selected.get_untracked() {
			selected.set(picked);
		}
	};

	let state_reset = state.clone();
	let on_reset = move |_: MouseEvent| {
		state_reset.borrow_mut().reset_view();
		zoom.set(1.0);
	};

	let export_title = title.clone();
	let on_export = move |_: MouseEvent| {
		if let Err(err) = data.with_untracked(|g| download_graph(g, &export_title)) {
			warn!("Graph export failed: {err}");
		}
	};

	let legend = legend
		.into_iter()
		.map(|(edge_type, color)| {
			view! {
				<div>
					<span style=format!("color: {color}; font-weight: bold;")>"━"</span>
					" "
					{edge_type}
				</div>
			}
		})
		.collect_view();

	let details = move || {
		let id = selected.get()?;
		let details = data.with(|g| NodeDetails::for_node(g, &id))?;
		let connections = details
			.connections
			.into_iter()
			.map(|c| view! { <li>{c.direction.arrow()} " " {c.relation} " " {c.other}</li> })
			.collect_view();
		Some(view! {
			<div class="card graph-details">
				<h4>"Selected Node"</h4>
				<div><strong>"Type: "</strong><span class="badge badge-info">{details.node_type}</span></div>
				<div><strong>"Label: "</strong>{details.label}</div>
				{details.props.map(|props| view! {
					<div>
						<strong>"Properties:"</strong>
						<pre class="graph-props">{props}</pre>
					</div>
				})}
				<div><strong>"Connected Edges: "</strong>{details.edge_count}</div>
				<div>
					<strong>"Connections:"</strong>
					<ul class="graph-connections">{connections}</ul>
				</div>
				<button class="button button-secondary" on:click=move |_| selected.set(None)>
					"Close"
				</button>
			</div>
		})
	};

	view! {
		<div class="graph-viewer">
			<div class="graph-toolbar">
				<h3 class="section-title">{title}</h3>
				<div class="graph-actions">
					<label>
						<input
							type="checkbox"
							prop:checked=move || galaxy.get()
							on:change=move |ev| galaxy.set(event_target_checked(&ev))
						/>
						"Galaxy Mode"
					</label>
					<button class="button" on:click=on_reset>"Reset View"</button>
					<button
						class="button button-secondary"
						on:click=on_export
						title="Download graph JSON"
					>
						"Export JSON"
					</button>
					<div class="graph-zoom">
						{move || format!("Zoom: {:.0}%", zoom.get() * 100.0)}
					</div>
				</div>
			</div>

			<div class="graph-legend">
				<div>
					<strong>"Controls:"</strong>
					" Mouse wheel to zoom, click & drag to pan, click nodes for details"
				</div>
				<div class="graph-legend-items">{legend}</div>
			</div>

			<div class="graph-filters">
				<For
					each=move || node_types.get()
					key=|node_type| node_type.clone()
					children=move |node_type: String| {
						let (shown_type, toggled_type) = (node_type.clone(), node_type.clone());
						view! {
							<label>
								<input
									type="checkbox"
									prop:checked=move || !excluded.with(|e| e.contains(&shown_type))
									on:change=move |ev| {
										let visible = event_target_checked(&ev);
										excluded.update(|e| {
											if visible {
												e.remove(&toggled_type);
											} else {
												e.insert(toggled_type.clone());
											}
										});
									}
								/>
								<span class="badge badge-info">{node_type}</span>
							</label>
						}
					}
				/>
			</div>

			<div
				class="graph-container"
				style=format!("height: {height}px; position: relative; overflow: hidden;")
			>
				<canvas
					node_ref=canvas_ref
					class="graph-canvas"
					on:mousedown=on_mousedown
					on:mousemove=on_mousemove
					on:mouseup=on_mouseup
					on:mouseleave=on_mouseleave
					on:wheel=on_wheel
					on:click=on_click
					style="display: block; cursor: grab; background: #ffffff;"
				/>
			</div>

			{details}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn taking_loop_handles_breaks_the_frame_cycle() {
		let handles: Rc<RefCell<LoopHandles<Box<dyn Fn() -> Option<i32>>>>> = Rc::default();
		let rearm = handles.clone();
		handles.borrow_mut().animate = Some(Box::new(move || rearm.borrow().frame));
		handles.borrow_mut().resize = Some(Box::new(|| None));
		handles.borrow_mut().frame = Some(7);
		let weak = Rc::downgrade(&handles);

		let taken = handles.take();
		assert_eq!(taken.frame, Some(7));
		assert!(taken.resize.is_some());
		assert!(handles.borrow().animate.is_none());

		drop(taken);
		drop(handles);
		assert!(weak.upgrade().is_none());
	}
}
