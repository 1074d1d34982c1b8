//! Logical vs backing size of the drawing surface.
//!
//! The simulation only ever sees logical units. The device pixel ratio is
//! clamped to `1.0..=2.0` to bound fill cost on dense displays, and is
//! absorbed once per resize by the surface transform.

use super::canvas::DrawSurface;

/// Smallest device pixel ratio the backing buffer is scaled by.
pub const MIN_PIXEL_RATIO: f64 = 1.0;
/// Largest device pixel ratio the backing buffer is scaled by.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// Snapshot of the surface dimensions after the latest resize.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceState {
	/// Logical width (CSS pixels)
	pub width: f64,
	/// Logical height (CSS pixels)
	pub height: f64,
	/// Clamped device pixel ratio
	pub scale: f64,
	/// Backing buffer width, `floor(width * scale)`
	pub backing_width: u32,
	/// Backing buffer height, `floor(height * scale)`
	pub backing_height: u32,
}

/// Owns surface dimensions and reacts to host resizes.
#[derive(Clone, Debug)]
pub struct SurfaceManager {
	state: SurfaceState,
	sized: bool,
}

impl SurfaceManager {
	pub fn new(device_pixel_ratio: f64) -> Self {
		Self {
			state: SurfaceState {
				scale: clamp_pixel_ratio(device_pixel_ratio),
				..SurfaceState::default()
			},
			sized: false,
		}
	}

	/// Recompute backing dimensions for a new logical size.
	///
	/// Negative or non-finite dimensions are treated as zero.
	pub fn resize(&mut self, width: f64, height: f64) -> SurfaceState {
		let (width, height) = (dimension(width), dimension(height));
		let scale = self.state.scale;
		self.state = SurfaceState {
			width,
			height,
			scale,
			backing_width: (width * scale).floor() as u32,
			backing_height: (height * scale).floor() as u32,
		};
		self.sized = true;
		self.state
	}

	pub fn logical_size(&self) -> (f64, f64) {
		(self.state.width, self.state.height)
	}

	pub fn state(&self) -> SurfaceState {
		self.state
	}

	/// Whether at least one resize has happened.
	pub fn is_sized(&self) -> bool {
		self.sized
	}

	/// Set (not multiply) the logical-to-backing transform on `canvas`.
	pub fn apply<S: DrawSurface + ?Sized>(&self, canvas: &mut S) {
		canvas.set_transform(self.state.scale);
	}
}

/// Clamp a raw `devicePixelRatio` to the supported range.
pub fn clamp_pixel_ratio(ratio: f64) -> f64 {
	if ratio.is_finite() {
		ratio.clamp(MIN_PIXEL_RATIO, MAX_PIXEL_RATIO)
	} else {
		MIN_PIXEL_RATIO
	}
}

fn dimension(v: f64) -> f64 {
	if v.is_finite() { v.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::embers::framebuffer::Framebuffer;

	#[test]
	fn pixel_ratio_is_clamped() {
		assert_eq!(clamp_pixel_ratio(0.5), 1.0);
		assert_eq!(clamp_pixel_ratio(1.5), 1.5);
		assert_eq!(clamp_pixel_ratio(3.0), 2.0);
		assert_eq!(clamp_pixel_ratio(f64::NAN), 1.0);
		assert_eq!(clamp_pixel_ratio(f64::INFINITY), 1.0);
	}

	#[test]
	fn backing_size_follows_scale() {
		let mut surface = SurfaceManager::new(1.5);
		let state = surface.resize(801.0, 601.0);
		assert_eq!(state.backing_width, 1201);
		assert_eq!(state.backing_height, 901);
		assert_eq!(surface.logical_size(), (801.0, 601.0));
	}

	#[test]
	fn resize_is_idempotent() {
		let mut surface = SurfaceManager::new(2.0);
		let first = surface.resize(1280.0, 720.0);
		let second = surface.resize(1280.0, 720.0);
		assert_eq!(first, second);
		assert_eq!(surface.state(), first);
	}

	#[test]
	fn starts_unsized() {
		let mut surface = SurfaceManager::new(1.0);
		assert!(!surface.is_sized());
		assert_eq!(surface.logical_size(), (0.0, 0.0));
		surface.resize(0.0, 0.0);
		assert!(surface.is_sized());
	}

	#[test]
	fn bad_dimensions_collapse_to_zero() {
		let mut surface = SurfaceManager::new(2.0);
		let state = surface.resize(-20.0, f64::NAN);
		assert_eq!((state.width, state.height), (0.0, 0.0));
		assert_eq!((state.backing_width, state.backing_height), (0, 0));
	}

	#[test]
	fn apply_does_not_accumulate_scale() {
		let mut surface = SurfaceManager::new(2.0);
		let state = surface.resize(4.0, 4.0);
		let mut fb = Framebuffer::from_surface(&state);
		surface.apply(&mut fb);
		surface.apply(&mut fb);
		assert_eq!(fb.scale(), 2.0);
	}
}
