use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::state::{CLICK_SLOP, CanvasHit, ForceGraphState};
use crate::components::explorer::state::GraphViewState;

fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Force-directed drawing of the explorer's displayed graph.
///
/// The canvas keeps its own simulation and reconciles it against
/// `view_state` whenever the view-model changes. Pointer interaction is
/// reported back through the callbacks with the id of the item involved.
#[component]
pub fn ForceGraphCanvas(
	view_state: RwSignal<GraphViewState>,
	on_hover: impl Fn(Option<String>) + 'static,
	on_select: impl Fn(Option<String>) + 'static,
	on_expand: impl Fn(String) + 'static,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<ForceGraphState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());
	let (on_hover, on_select, on_expand) = (Rc::new(on_hover), Rc::new(on_select), Rc::new(on_expand));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let viewport = |win: &Window| {
			(
				win.inner_width().ok().and_then(|w| w.as_f64()).unwrap_or(800.0),
				win.inner_height().ok().and_then(|h| h.as_f64()).unwrap_or(600.0),
			)
		};

		let (w, h) = if fullscreen {
			viewport(&window)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			return;
		};
		let canvas_state =
			view_state.with_untracked(|s| ForceGraphState::new(&s.render_snapshot(), w, h));
		debug!("canvas ready with {} nodes", canvas_state.node_count());
		*state_init.borrow_mut() = Some(canvas_state);

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = viewport(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				if s.animation_running {
					s.tick(0.016);
				}
				render::render(s, &ctx);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Pick up merged neighbours and style changes.
	let state_sync = state.clone();
	Effect::new(move |_| {
		view_state.with(|s| {
			if let Some(ref mut canvas) = *state_sync.borrow_mut() {
				canvas.sync(&s.render_snapshot());
			}
		});
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};

		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.press.x = x;
			s.press.y = y;
			s.press.moved = false;
			if let Some(idx) = s.node_at_position(x, y) {
				s.drag.active = true;
				s.drag.node_idx = Some(idx);
				s.drag.start_x = x;
				s.drag.start_y = y;
				s.graph.visit_nodes(|node| {
					if node.index() == idx {
						s.drag.node_start_x = node.x();
						s.drag.node_start_y = node.y();
					}
				});
			} else {
				s.pan.active = true;
				s.pan.start_x = x;
				s.pan.start_y = y;
				s.pan.transform_start_x = s.transform.x;
				s.pan.transform_start_y = s.transform.y;
			}
		}
	};

	let (state_mm, hover_mm) = (state.clone(), on_hover.clone());
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};

		let mut changed = None;
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if (s.drag.active || s.pan.active)
				&& ((x - s.press.x).powi(2) + (y - s.press.y).powi(2)).sqrt() > CLICK_SLOP
			{
				s.press.moved = true;
			}

			// Update hover state when not dragging
			if !s.drag.active {
				let hit = s.item_at_position(x, y);
				changed = s.hover_item(hit);
			}

			if s.drag.active {
				if let Some(idx) = s.drag.node_idx {
					let (dx, dy) = (
						(x - s.drag.start_x) / s.transform.k,
						(y - s.drag.start_y) / s.transform.k,
					);
					let (nx, ny) = (
						s.drag.node_start_x + dx as f32,
						s.drag.node_start_y + dy as f32,
					);
					s.graph.visit_nodes_mut(|node| {
						if node.index() == idx {
							node.data.x = nx;
							node.data.y = ny;
							node.data.is_anchor = true;
						}
					});
				}
			} else if s.pan.active {
				s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
				s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
			}
		}
		if let Some(hit) = changed {
			hover_mm(hit.map(|h| h.id().to_string()));
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let point = canvas_point(canvas_ref, &ev);
		let mut clicked = None;
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			if s.drag.active {
				if let Some(idx) = s.drag.node_idx {
					s.graph.visit_nodes_mut(|node| {
						if node.index() == idx {
							node.data.is_anchor = true;
						}
					});
				}
			}
			if (s.drag.active || s.pan.active) && !s.press.moved {
				clicked = Some(point.and_then(|(x, y)| s.item_at_position(x, y)));
			}
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;
		}
		if let Some(hit) = clicked {
			on_select(hit.map(|h| h.id().to_string()));
		}
	};

	let state_dc = state.clone();
	let on_dblclick = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		let target = state_dc
			.borrow()
			.as_ref()
			.and_then(|s| match s.item_at_position(x, y) {
				Some(CanvasHit::Node(id)) => Some(id),
				_ => None,
			});
		if let Some(id) = target {
			on_expand(id);
		}
	};

	let (state_ml, hover_ml) = (state.clone(), on_hover.clone());
	let on_mouseleave = move |_: MouseEvent| {
		let mut changed = None;
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;
			changed = s.hover_item(None);
		}
		if changed.is_some() {
			hover_ml(None);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};

		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (s.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / s.transform.k;
			s.transform.x = x - (x - s.transform.x) * ratio;
			s.transform.y = y - (y - s.transform.y) * ratio;
			s.transform.k = new_k;
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:dblclick=on_dblclick
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
