//! Colors and glow styling for the ember field.
//!
//! Embers are tinted in HSL space (a hue on the warm band plus fixed
//! saturation/lightness per layer) and converted to RGBA before reaching a
//! drawing surface.

use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	/// Opaque black, used for the trail fade.
	pub const BLACK: Color = Color::rgb(0, 0, 0);
	/// Fully transparent black, the outer stop of every halo.
	pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0.0);

	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Premultiplied `[r, g, b, a]` in `0.0..=1.0`, the layout the software
	/// framebuffer blends in.
	pub fn to_premultiplied(self) -> [f32; 4] {
		let a = self.a.clamp(0.0, 1.0) as f32;
		[
			self.r as f32 / 255.0 * a,
			self.g as f32 / 255.0 * a,
			self.b as f32 / 255.0 * a,
			a,
		]
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// A color in HSL space with straight alpha.
///
/// `s` and `l` are fractions (`0.95` rather than `95%`). Hue is in degrees and
/// wraps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
	pub h: f64,
	pub s: f64,
	pub l: f64,
	pub a: f64,
}

impl Hsla {
	pub const fn new(h: f64, s: f64, l: f64, a: f64) -> Self {
		Self { h, s, l, a }
	}

	/// Convert to RGBA using the CSS Color 3 HSL algorithm.
	pub fn to_color(self) -> Color {
		let h = self.h.rem_euclid(360.0) / 60.0;
		let s = self.s.clamp(0.0, 1.0);
		let l = self.l.clamp(0.0, 1.0);

		let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
		let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
		let m = l - chroma / 2.0;

		let (r, g, b) = match h as u32 {
			0 => (chroma, x, 0.0),
			1 => (x, chroma, 0.0),
			2 => (0.0, chroma, x),
			3 => (0.0, x, chroma),
			4 => (x, 0.0, chroma),
			_ => (chroma, 0.0, x),
		};
		let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;

		Color::rgba(channel(r), channel(g), channel(b), self.a.clamp(0.0, 1.0))
	}
}

/// Two-layer glow look: a soft outer halo and a small hot core.
///
/// Extents are multiples of the ember's instantaneous radius.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GlowStyle {
	/// Radius of the halo gradient (where it reaches full transparency)
	pub halo_extent: f64,
	/// Radius of the disc the halo gradient is painted into
	pub halo_clip: f64,
	pub halo_saturation: f64,
	pub halo_lightness: f64,
	/// Gradient offset of the middle halo stop
	pub halo_mid_offset: f64,
	pub halo_mid_lightness: f64,
	/// Alpha multiplier of the middle halo stop
	pub halo_mid_alpha: f64,
	/// Hue offset (degrees) for the middle halo stop and the core
	pub hue_shift: f64,
	pub core_extent: f64,
	pub core_saturation: f64,
	pub core_lightness: f64,
}

impl GlowStyle {
	/// Hot orange halo with a pale yellow-orange core (default).
	pub fn ember() -> Self {
		Self {
			halo_extent: 10.0,
			halo_clip: 8.0,
			halo_saturation: 0.95,
			halo_lightness: 0.65,
			halo_mid_offset: 0.35,
			halo_mid_lightness: 0.55,
			halo_mid_alpha: 0.55,
			hue_shift: 10.0,
			core_extent: 0.9,
			core_saturation: 0.98,
			core_lightness: 0.72,
		}
	}
}

impl Default for GlowStyle {
	fn default() -> Self {
		Self::ember()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hsl_primary_hues() {
		assert_eq!(Hsla::new(0.0, 1.0, 0.5, 1.0).to_color(), Color::rgb(255, 0, 0));
		assert_eq!(Hsla::new(120.0, 1.0, 0.5, 1.0).to_color(), Color::rgb(0, 255, 0));
		assert_eq!(Hsla::new(240.0, 1.0, 0.5, 1.0).to_color(), Color::rgb(0, 0, 255));
		assert_eq!(Hsla::new(30.0, 1.0, 0.5, 1.0).to_color(), Color::rgb(255, 128, 0));
	}

	#[test]
	fn hue_wraps_around() {
		assert_eq!(
			Hsla::new(372.0, 0.9, 0.6, 1.0).to_color(),
			Hsla::new(12.0, 0.9, 0.6, 1.0).to_color()
		);
		assert_eq!(
			Hsla::new(-348.0, 0.9, 0.6, 1.0).to_color(),
			Hsla::new(12.0, 0.9, 0.6, 1.0).to_color()
		);
	}

	#[test]
	fn warm_band_stays_warm() {
		let style = GlowStyle::default();
		let mut hue = 12.0;
		while hue <= 42.0 {
			for (h, l) in [
				(hue, style.halo_lightness),
				(hue + style.hue_shift, style.core_lightness),
			] {
				let c = Hsla::new(h, style.halo_saturation, l, 1.0).to_color();
				assert!(c.r >= c.g && c.g > c.b, "hue {h} rendered as {c:?}");
			}
			hue += 1.5;
		}
	}

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(255, 128, 0).to_css(), "#ff8000");
		assert_eq!(Color::BLACK.with_alpha(0.18).to_css(), "rgba(0, 0, 0, 0.18)");
	}

	#[test]
	fn premultiplied_scales_by_alpha() {
		let [r, g, b, a] = Color::rgba(255, 0, 51, 0.5).to_premultiplied();
		assert!((r - 0.5).abs() < 1e-6);
		assert_eq!(g, 0.0);
		assert!((b - 0.1).abs() < 1e-6);
		assert_eq!(a, 0.5);
	}
}
