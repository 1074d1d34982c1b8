//! Immediate-mode drawing contract.
//!
//! [`DrawSurface`] is the narrow slice of a 2D canvas the ember renderer
//! needs. [`WebCanvas`] forwards it to the browser; the software
//! [`Framebuffer`](super::framebuffer::Framebuffer) implements it in memory.
//! All coordinates are logical units; `set_transform` maps them to pixels.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::theme::Color;

/// How new paint combines with what is already on the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompositeMode {
	/// Normal alpha blending; paint covers what is below.
	SourceOver,
	/// Additive blending; overlapping paint only ever brightens.
	Lighter,
}

impl CompositeMode {
	/// Canvas `globalCompositeOperation` name.
	pub fn as_css(self) -> &'static str {
		match self {
			CompositeMode::SourceOver => "source-over",
			CompositeMode::Lighter => "lighter",
		}
	}
}

/// One color stop of a radial gradient. `offset` is a fraction of the
/// gradient radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
	pub offset: f64,
	pub color: Color,
}

impl GradientStop {
	pub const fn new(offset: f64, color: Color) -> Self {
		Self { offset, color }
	}
}

/// A 2D drawing target.
pub trait DrawSurface {
	/// Replace the current transform with a uniform `scale`.
	fn set_transform(&mut self, scale: f64);

	/// Select the blend mode for subsequent fills.
	fn set_composite(&mut self, mode: CompositeMode);

	/// Reset the `width` x `height` logical area to transparent black.
	fn clear(&mut self, width: f64, height: f64);

	/// Fill an axis-aligned rectangle with a solid color.
	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);

	/// Fill a disc of `disc_radius` centred on `(cx, cy)` with a radial
	/// gradient running from the centre out to `gradient_radius`.
	fn fill_radial(
		&mut self,
		cx: f64,
		cy: f64,
		gradient_radius: f64,
		disc_radius: f64,
		stops: &[GradientStop],
	);

	/// Fill a disc with a solid color.
	fn fill_disc(&mut self, cx: f64, cy: f64, radius: f64, color: Color);
}

/// [`DrawSurface`] backed by a browser `CanvasRenderingContext2d`.
pub struct WebCanvas {
	ctx: CanvasRenderingContext2d,
}

impl WebCanvas {
	pub fn new(ctx: CanvasRenderingContext2d) -> Self {
		Self { ctx }
	}
}

impl DrawSurface for WebCanvas {
	fn set_transform(&mut self, scale: f64) {
		let _ = self.ctx.set_transform(scale, 0.0, 0.0, scale, 0.0, 0.0);
	}

	fn set_composite(&mut self, mode: CompositeMode) {
		let _ = self.ctx.set_global_composite_operation(mode.as_css());
	}

	fn clear(&mut self, width: f64, height: f64) {
		self.ctx.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
		self.ctx.set_fill_style_str(&color.to_css());
		self.ctx.fill_rect(x, y, width, height);
	}

	fn fill_radial(
		&mut self,
		cx: f64,
		cy: f64,
		gradient_radius: f64,
		disc_radius: f64,
		stops: &[GradientStop],
	) {
		let Ok(gradient) = self
			.ctx
			.create_radial_gradient(cx, cy, 0.0, cx, cy, gradient_radius.max(0.0))
		else {
			return;
		};
		for stop in stops {
			let _ = gradient.add_color_stop(stop.offset.clamp(0.0, 1.0) as f32, &stop.color.to_css());
		}

		self.ctx.begin_path();
		let _ = self.ctx.arc(cx, cy, disc_radius.max(0.0), 0.0, TAU);
		#[allow(deprecated)]
		self.ctx.set_fill_style(&gradient);
		self.ctx.fill();
	}

	fn fill_disc(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
		self.ctx.begin_path();
		let _ = self.ctx.arc(cx, cy, radius.max(0.0), 0.0, TAU);
		self.ctx.set_fill_style_str(&color.to_css());
		self.ctx.fill();
	}
}
