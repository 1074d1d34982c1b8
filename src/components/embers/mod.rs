//! Ambient ember background.
//!
//! Renders a continuous field of rising, flickering embers on an HTML canvas:
//! - Population kept topped up along the bottom edge, with random bursts
//! - Sine-driven sideways drift, damped so it never runs away
//! - Trail fade followed by additive two-layer glow (soft halo + hot core)
//! - Fixed-step ticking independent of display refresh rate
//!
//! The simulation core ([`EmberField`]) only talks to a [`DrawSurface`], so
//! it runs identically against the browser canvas and the in-memory
//! [`Framebuffer`].
//!
//! # Example
//!
//! ```ignore
//! use ember_glow::{EmberCanvas, EmberConfig};
//!
//! view! { <EmberCanvas config=EmberConfig { target_population: 90, ..Default::default() } /> }
//! ```

pub mod canvas;
pub mod clock;
mod component;
pub mod config;
pub mod field;
pub mod framebuffer;
pub mod particle;
mod render;
pub mod surface;
pub mod theme;

pub use canvas::{CompositeMode, DrawSurface, GradientStop, WebCanvas};
pub use clock::FrameClock;
pub use component::EmberCanvas;
pub use config::EmberConfig;
pub use field::EmberField;
pub use framebuffer::Framebuffer;
pub use particle::{Glow, Particle};
pub use surface::{SurfaceManager, SurfaceState};
pub use theme::{Color, GlowStyle, Hsla};
