//! ember-glow: an ambient ember/flame particle background for web pages.
//!
//! This crate provides a WASM canvas component that renders a field of rising,
//! flickering embers with additive glow and motion trails, plus the
//! host-independent simulation and a software framebuffer it can render into.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::embers::{EmberCanvas, EmberConfig, EmberField, Framebuffer, SurfaceManager};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("ember-glow: logging initialized");
}

/// Load config overrides from a script element with id="ember-config".
/// Expected format: a JSON object with any subset of [`EmberConfig`] fields.
fn load_ember_config() -> Option<EmberConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("ember-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match EmberConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"ember-glow: loaded config overrides (target population {})",
				config.target_population
			);
			Some(config)
		}
		Err(e) => {
			warn!("ember-glow: failed to parse ember config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Reads optional config from the DOM and mounts the ember backdrop.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_ember_config().unwrap_or_default();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Embers" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="ember-backdrop">
			<EmberCanvas config=config fullscreen=true />
		</div>
	}
}
