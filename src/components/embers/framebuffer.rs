//! In-memory RGBA framebuffer implementing [`DrawSurface`].
//!
//! Pixels are stored premultiplied in `f32`, which makes both blend modes
//! one line each:
//! - source-over: `dst = src + dst * (1 - src_a)`
//! - lighter: `dst = min(1, src + dst)`
//!
//! A shape covers a pixel when the pixel centre falls inside it. There is no
//! anti-aliasing.

use std::ops::Range;

use super::canvas::{CompositeMode, DrawSurface, GradientStop};
use super::surface::SurfaceState;
use super::theme::Color;

/// Persistent software render target.
#[derive(Clone, Debug)]
pub struct Framebuffer {
	width: usize,
	height: usize,
	scale: f64,
	mode: CompositeMode,
	pixels: Vec<[f32; 4]>,
}

impl Framebuffer {
	/// A transparent buffer of `width` x `height` backing pixels.
	pub fn new(width: usize, height: usize) -> Self {
		Self {
			width,
			height,
			scale: 1.0,
			mode: CompositeMode::SourceOver,
			pixels: vec![[0.0; 4]; width * height],
		}
	}

	/// A buffer sized and scaled to match a resized surface.
	pub fn from_surface(state: &SurfaceState) -> Self {
		let mut fb = Self::new(state.backing_width as usize, state.backing_height as usize);
		fb.set_transform(state.scale);
		fb
	}

	pub fn width(&self) -> usize {
		self.width
	}

	pub fn height(&self) -> usize {
		self.height
	}

	pub fn scale(&self) -> f64 {
		self.scale
	}

	/// Premultiplied `[r, g, b, a]` of a backing pixel.
	pub fn pixel(&self, x: usize, y: usize) -> Option<[f32; 4]> {
		if x < self.width && y < self.height {
			Some(self.pixels[y * self.width + x])
		} else {
			None
		}
	}

	pub fn pixels(&self) -> &[[f32; 4]] {
		&self.pixels
	}

	/// Straight-alpha RGBA bytes, row-major, ready for `ImageData` or an
	/// image encoder.
	pub fn to_rgba8(&self) -> Vec<u8> {
		let mut out = Vec::with_capacity(self.pixels.len() * 4);
		for &[r, g, b, a] in &self.pixels {
			let unpremultiply = |c: f32| {
				if a > 0.0 {
					((c / a).clamp(0.0, 1.0) * 255.0).round() as u8
				} else {
					0
				}
			};
			out.extend_from_slice(&[
				unpremultiply(r),
				unpremultiply(g),
				unpremultiply(b),
				(a.clamp(0.0, 1.0) * 255.0).round() as u8,
			]);
		}
		out
	}

	/// Backing pixel indices whose centres fall in the logical span `lo..hi`.
	fn span(&self, lo: f64, hi: f64, limit: usize) -> Range<usize> {
		let start = (lo * self.scale - 0.5).ceil().max(0.0) as usize;
		let end = (hi * self.scale - 0.5).ceil().max(0.0) as usize;
		start.min(limit)..end.min(limit)
	}

	/// Logical coordinates of a backing pixel centre.
	fn centre(&self, px: usize, py: usize) -> (f64, f64) {
		(
			(px as f64 + 0.5) / self.scale,
			(py as f64 + 0.5) / self.scale,
		)
	}

	fn blend(&mut self, px: usize, py: usize, src: [f32; 4]) {
		let dst = &mut self.pixels[py * self.width + px];
		match self.mode {
			CompositeMode::SourceOver => {
				let keep = 1.0 - src[3];
				for (d, s) in dst.iter_mut().zip(src) {
					*d = s + *d * keep;
				}
			}
			CompositeMode::Lighter => {
				for (d, s) in dst.iter_mut().zip(src) {
					*d = (*d + s).min(1.0);
				}
			}
		}
	}

	/// Visit every pixel whose centre lies within `radius` of `(cx, cy)`,
	/// passing the logical distance from the centre.
	fn for_each_in_disc(
		&mut self,
		cx: f64,
		cy: f64,
		radius: f64,
		mut paint: impl FnMut(f64) -> [f32; 4],
	) {
		if radius.is_nan() || radius <= 0.0 {
			return;
		}
		let rows = self.span(cy - radius, cy + radius, self.height);
		let cols = self.span(cx - radius, cx + radius, self.width);
		for py in rows {
			for px in cols.clone() {
				let (x, y) = self.centre(px, py);
				let dist = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
				if dist <= radius {
					let src = paint(dist);
					self.blend(px, py, src);
				}
			}
		}
	}
}

/// Premultiplied color of a gradient at fraction `t` of its radius.
fn sample_gradient(stops: &[GradientStop], t: f64) -> [f32; 4] {
	let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
		return [0.0; 4];
	};
	if t <= first.offset {
		return first.color.to_premultiplied();
	}
	if t >= last.offset {
		return last.color.to_premultiplied();
	}
	for pair in stops.windows(2) {
		let (a, b) = (pair[0], pair[1]);
		if t <= b.offset {
			let span = b.offset - a.offset;
			let f = if span > 0.0 { ((t - a.offset) / span) as f32 } else { 1.0 };
			let (ca, cb) = (a.color.to_premultiplied(), b.color.to_premultiplied());
			return std::array::from_fn(|i| ca[i] + (cb[i] - ca[i]) * f);
		}
	}
	last.color.to_premultiplied()
}

impl DrawSurface for Framebuffer {
	fn set_transform(&mut self, scale: f64) {
		self.scale = if scale > 0.0 && scale.is_finite() { scale } else { 1.0 };
	}

	fn set_composite(&mut self, mode: CompositeMode) {
		self.mode = mode;
	}

	fn clear(&mut self, width: f64, height: f64) {
		let rows = self.span(0.0, height, self.height);
		let cols = self.span(0.0, width, self.width);
		for py in rows {
			for px in cols.clone() {
				self.pixels[py * self.width + px] = [0.0; 4];
			}
		}
	}

	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
		let src = color.to_premultiplied();
		let rows = self.span(y, y + height, self.height);
		let cols = self.span(x, x + width, self.width);
		for py in rows {
			for px in cols.clone() {
				self.blend(px, py, src);
			}
		}
	}

	fn fill_radial(
		&mut self,
		cx: f64,
		cy: f64,
		gradient_radius: f64,
		disc_radius: f64,
		stops: &[GradientStop],
	) {
		self.for_each_in_disc(cx, cy, disc_radius, |dist| {
			let t = if gradient_radius > 0.0 {
				dist / gradient_radius
			} else {
				1.0
			};
			sample_gradient(stops, t)
		});
	}

	fn fill_disc(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
		let src = color.to_premultiplied();
		self.for_each_in_disc(cx, cy, radius, |_| src);
	}
}
