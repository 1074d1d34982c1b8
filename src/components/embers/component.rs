//! Leptos component hosting the ember field on a canvas element.
//!
//! The component sizes the canvas backing store for the device pixel ratio,
//! keeps it in sync with window resizes, and drives [`EmberField::tick`] from
//! a `requestAnimationFrame` loop through a fixed-step [`FrameClock`].

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::canvas::{DrawSurface, WebCanvas};
use super::clock::FrameClock;
use super::config::EmberConfig;
use super::field::EmberField;
use super::surface::{SurfaceManager, SurfaceState};

/// How often (in ticks) population stats are logged.
const STATS_INTERVAL: u64 = 600;

/// Everything the animation and resize callbacks share.
struct EmberContext {
	surface: SurfaceManager,
	field: EmberField<SmallRng>,
	canvas: WebCanvas,
	clock: FrameClock,
}

/// Renders the ember background on a canvas element.
///
/// By default the canvas is fixed behind the page, fills the viewport and
/// follows window resizes. With `fullscreen = false` it sizes itself to its
/// parent, or to explicit `width`/`height`.
#[component]
pub fn EmberCanvas(
	#[prop(optional)] config: Option<EmberConfig>,
	#[prop(default = true)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<EmberContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("ember-glow: no window, embers disabled");
			return;
		};
		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("ember-glow: 2d context unavailable, embers disabled");
			return;
		};

		let mut surface = SurfaceManager::new(window.device_pixel_ratio());
		let (w, h) = host_size(&window, &canvas, fullscreen, width, height);
		let state = surface.resize(w, h);
		apply_backing(&canvas, &state);

		let mut web_canvas = WebCanvas::new(ctx);
		surface.apply(&mut web_canvas);
		web_canvas.clear(state.width, state.height);

		let config = config.clone().unwrap_or_default();
		info!(
			"ember-glow: {}x{} @ {}x, target population {}",
			state.width, state.height, state.scale, config.target_population
		);

		*context.borrow_mut() = Some(EmberContext {
			surface,
			field: EmberField::seeded(config, fresh_seed()),
			canvas: web_canvas,
			clock: FrameClock::default(),
		});

		if fullscreen || (width.is_none() && height.is_none()) {
			let (context_resize, canvas_resize) = (context.clone(), canvas.clone());
			*resize_cb.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = host_size(&win, &canvas_resize, fullscreen, width, height);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					if c.surface.logical_size() == (nw, nh) {
						return;
					}
					let state = c.surface.resize(nw, nh);
					// Changing the backing size resets the context transform.
					apply_backing(&canvas_resize, &state);
					c.surface.apply(&mut c.canvas);
					debug!("ember-glow: resized to {}x{}", state.width, state.height);
				}
			}));
			if let Some(ref cb) = *resize_cb.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context.clone(), animate.clone());
		*animate.borrow_mut() = Some(Closure::new(move |now: f64| {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				let state = c.surface.state();
				for _ in 0..c.clock.advance(now) {
					c.field.tick(&state, &mut c.canvas);
					if c.field.ticks() % STATS_INTERVAL == 0 {
						debug!(
							"ember-glow: tick {}, {} embers",
							c.field.ticks(),
							c.field.population()
						);
					}
				}
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let style = if fullscreen {
		"position: fixed; inset: 0; display: block; pointer-events: none; z-index: 0;"
	} else {
		"display: block; pointer-events: none;"
	};

	view! { <canvas node_ref=canvas_ref class="ember-canvas" aria-hidden="true" style=style /> }
}

/// Logical size the canvas should take.
fn host_size(
	window: &Window,
	canvas: &HtmlCanvasElement,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> (f64, f64) {
	if fullscreen {
		let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
		(dim(window.inner_width()), dim(window.inner_height()))
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
	}
}

/// Size the backing store in device pixels and the element in CSS pixels.
fn apply_backing(canvas: &HtmlCanvasElement, state: &SurfaceState) {
	canvas.set_width(state.backing_width);
	canvas.set_height(state.backing_height);
	let style = web_sys::HtmlElement::style(canvas);
	let _ = style.set_property("width", &format!("{}px", state.width));
	let _ = style.set_property("height", &format!("{}px", state.height));
}

/// A non-reproducible seed for production rendering.
fn fresh_seed() -> u64 {
	let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
	(js_sys::Date::now() as u64).rotate_left(32) ^ noise
}
