//! Painting for the ember field.
//!
//! A frame is drawn in two passes:
//! 1. Trail fade: translucent black over the whole surface (source-over)
//! 2. Embers: halo gradient, then hot core, each additive

use super::canvas::{CompositeMode, DrawSurface, GradientStop};
use super::config::EmberConfig;
use super::particle::{Glow, Particle};
use super::theme::{Color, GlowStyle, Hsla};

/// Below this an ember contributes nothing visible.
const MIN_VISIBLE_ALPHA: f64 = 0.001;

/// Partially erase the previous frame so moving embers leave trails.
pub fn fade_trails<S: DrawSurface + ?Sized>(
	canvas: &mut S,
	width: f64,
	height: f64,
	config: &EmberConfig,
) {
	canvas.set_composite(CompositeMode::SourceOver);
	canvas.fill_rect(0.0, 0.0, width, height, Color::BLACK.with_alpha(config.fade_alpha));
}

/// Draw one ember as a soft halo with a bright core.
///
/// Expects the surface to already be in [`CompositeMode::Lighter`].
pub fn draw_ember<S: DrawSurface + ?Sized>(
	canvas: &mut S,
	particle: &Particle,
	glow: Glow,
	style: &GlowStyle,
) {
	if glow.alpha < MIN_VISIBLE_ALPHA {
		return;
	}

	let (x, y) = (particle.x, particle.y);
	let hue = particle.hue();
	let shifted = hue + style.hue_shift;

	let halo = [
		GradientStop::new(
			0.0,
			Hsla::new(hue, style.halo_saturation, style.halo_lightness, glow.alpha).to_color(),
		),
		GradientStop::new(
			style.halo_mid_offset,
			Hsla::new(
				shifted,
				style.halo_saturation,
				style.halo_mid_lightness,
				glow.alpha * style.halo_mid_alpha,
			)
			.to_color(),
		),
		GradientStop::new(1.0, Color::TRANSPARENT),
	];
	canvas.fill_radial(
		x,
		y,
		glow.radius * style.halo_extent,
		glow.radius * style.halo_clip,
		&halo,
	);

	let core = Hsla::new(shifted, style.core_saturation, style.core_lightness, glow.alpha);
	canvas.fill_disc(x, y, glow.radius * style.core_extent, core.to_color());
}
