//! Tunable constants for the ember simulation.
//!
//! Every number that shapes the look of the effect lives here. Defaults are
//! tuned for one tick per 60 Hz frame; the [`FrameClock`](super::clock::FrameClock)
//! keeps that cadence on other refresh rates.
//!
//! Pages can override any subset of fields with JSON:
//!
//! ```json
//! { "target_population": 90, "glow": { "core_lightness": 0.8 } }
//! ```

use std::ops::RangeInclusive;

use serde::Deserialize;

use super::theme::GlowStyle;

/// Hues (degrees) an ember may be born with. Keeps every ember in the
/// red-orange-yellow family.
pub const WARM_HUE_BAND: RangeInclusive<f64> = 12.0..=42.0;

/// Largest population a page may ask for.
pub const MAX_TARGET_POPULATION: usize = 4096;

/// Simulation and appearance parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EmberConfig {
	/// Population the field is topped up to every tick
	pub target_population: usize,
	/// Per-tick probability of one extra spawn on top of the top-up
	pub burst_chance: f64,
	/// Depth of the band below the bottom edge that top-up spawns land in
	pub spawn_band: f64,
	/// Distance below the bottom edge for burst spawns
	pub burst_offset: f64,

	/// Shortest time-to-live, in ticks
	pub ttl_min: f64,
	/// Random extra time-to-live on top of `ttl_min`
	pub ttl_spread: f64,
	pub alpha_min: f64,
	pub alpha_spread: f64,
	pub hue_min: f64,
	pub hue_spread: f64,

	/// Horizontal speed spread of the smallest ember
	pub sway_min: f64,
	/// Extra horizontal speed spread per unit of ember size
	pub sway_scale: f64,
	/// Rise speed of the smallest ember
	pub rise_min: f64,
	/// Extra rise speed per unit of ember size
	pub rise_scale: f64,
	pub radius_min: f64,
	pub radius_scale: f64,
	pub flicker_phase_min: f64,
	pub flicker_phase_spread: f64,

	/// Spatial frequency of the sine drift term
	pub drift_frequency: f64,
	/// Amplitude of the sine drift added to `vx` each tick
	pub drift_strength: f64,
	/// Multiplicative `vx` damping per tick
	pub damping: f64,
	pub horizontal_speed: f64,
	pub vertical_speed: f64,

	/// Age-to-time factor for the flicker wave
	pub flicker_rate: f64,
	pub flicker_speed: f64,
	pub flicker_phase_scale: f64,
	/// Centre of the flicker wave
	pub flicker_mean: f64,
	/// Amplitude of the flicker wave around `flicker_mean`
	pub flicker_depth: f64,

	/// Ceiling on instantaneous alpha
	pub max_alpha: f64,
	/// Radius multiplier left when an ember reaches the end of its life
	pub radius_floor: f64,

	/// How far above the top edge an ember may rise before it is culled
	pub top_margin: f64,
	/// How far past either side an ember may drift before it is culled
	pub side_margin: f64,

	/// Opacity of the black overlay painted at the start of every tick
	pub fade_alpha: f64,

	pub glow: GlowStyle,
}

impl Default for EmberConfig {
	fn default() -> Self {
		Self {
			target_population: 140,
			burst_chance: 0.14,
			spawn_band: 90.0,
			burst_offset: 40.0,

			ttl_min: 90.0,
			ttl_spread: 180.0,
			alpha_min: 0.7,
			alpha_spread: 0.2,
			hue_min: 16.0,
			hue_spread: 26.0,

			sway_min: 0.35,
			sway_scale: 0.8,
			rise_min: 0.9,
			rise_scale: 2.6,
			radius_min: 0.7,
			radius_scale: 2.6,
			flicker_phase_min: 0.6,
			flicker_phase_spread: 0.8,

			drift_frequency: 0.01,
			drift_strength: 0.010,
			damping: 0.994,
			horizontal_speed: 3.3,
			vertical_speed: 2.1,

			flicker_rate: 0.015,
			flicker_speed: 9.0,
			flicker_phase_scale: 10.0,
			flicker_mean: 0.55,
			flicker_depth: 0.45,

			max_alpha: 0.9,
			radius_floor: 0.6,

			top_margin: 140.0,
			side_margin: 200.0,

			fade_alpha: 0.18,

			glow: GlowStyle::default(),
		}
	}
}

impl EmberConfig {
	/// Parse a (possibly partial) JSON override. Missing fields keep their
	/// defaults.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str::<Self>(json).map(Self::sanitized)
	}

	/// Pull out-of-range values back into the ranges the simulation relies on.
	pub fn sanitized(mut self) -> Self {
		self.target_population = self.target_population.min(MAX_TARGET_POPULATION);
		self.burst_chance = unit(self.burst_chance);
		self.spawn_band = self.spawn_band.max(0.0);
		self.ttl_min = if self.ttl_min >= 1.0 { self.ttl_min } else { 1.0 };
		self.ttl_spread = self.ttl_spread.max(0.0);

		self.alpha_min = unit(self.alpha_min);
		self.alpha_spread = self.alpha_spread.clamp(0.0, 1.0 - self.alpha_min);

		let (lo, hi) = (*WARM_HUE_BAND.start(), *WARM_HUE_BAND.end());
		self.hue_min = if self.hue_min.is_nan() { lo } else { self.hue_min.clamp(lo, hi) };
		self.hue_spread = self.hue_spread.clamp(0.0, hi - self.hue_min);

		for v in [
			&mut self.sway_min,
			&mut self.sway_scale,
			&mut self.rise_min,
			&mut self.rise_scale,
			&mut self.radius_min,
			&mut self.radius_scale,
			&mut self.flicker_phase_spread,
			&mut self.flicker_mean,
			&mut self.flicker_depth,
		] {
			*v = v.max(0.0);
		}
		if !self.flicker_phase_min.is_finite() {
			self.flicker_phase_min = 0.0;
		}

		self.damping = unit(self.damping);
		self.max_alpha = unit(self.max_alpha);
		self.radius_floor = self.radius_floor.max(0.0);
		self.top_margin = self.top_margin.max(0.0);
		self.side_margin = self.side_margin.max(0.0);
		self.fade_alpha = unit(self.fade_alpha);
		self
	}
}

fn unit(v: f64) -> f64 {
	if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_tuned_values() {
		let config = EmberConfig::default();
		assert_eq!(config.target_population, 140);
		assert_eq!(config.burst_chance, 0.14);
		assert_eq!(config.damping, 0.994);
		assert_eq!(config.horizontal_speed, 3.3);
		assert_eq!(config.vertical_speed, 2.1);
		assert_eq!(config.max_alpha, 0.9);
		assert_eq!(config.top_margin, 140.0);
		assert_eq!(config.side_margin, 200.0);
		assert_eq!((config.sway_min, config.sway_scale), (0.35, 0.8));
		assert_eq!((config.rise_min, config.rise_scale), (0.9, 2.6));
		assert_eq!((config.radius_min, config.radius_scale), (0.7, 2.6));
		assert_eq!((config.flicker_phase_min, config.flicker_phase_spread), (0.6, 0.8));
		assert_eq!((config.flicker_mean, config.flicker_depth), (0.55, 0.45));
		assert_eq!(config, config.clone().sanitized());
	}

	#[test]
	fn partial_json_keeps_defaults() {
		let config =
			EmberConfig::from_json(r#"{ "target_population": 60, "glow": { "core_lightness": 0.8 } }"#)
				.unwrap();
		assert_eq!(config.target_population, 60);
		assert_eq!(config.glow.core_lightness, 0.8);
		assert_eq!(config.glow.halo_extent, 10.0);
		assert_eq!(config.burst_chance, 0.14);
	}

	#[test]
	fn malformed_json_is_an_error() {
		assert!(EmberConfig::from_json("{ target_population: ").is_err());
		assert!(EmberConfig::from_json(r#"{ "target_population": -3 }"#).is_err());
	}

	#[test]
	fn sanitize_keeps_hue_in_warm_band() {
		let config = EmberConfig::from_json(r#"{ "hue_min": 200.0, "hue_spread": 90.0 }"#).unwrap();
		assert_eq!(config.hue_min, 42.0);
		assert_eq!(config.hue_spread, 0.0);

		let config = EmberConfig::from_json(r#"{ "hue_min": 0.0, "hue_spread": 90.0 }"#).unwrap();
		assert_eq!(config.hue_min, 12.0);
		assert_eq!(config.hue_min + config.hue_spread, 42.0);
	}

	#[test]
	fn sanitize_clamps_probabilities_and_alpha() {
		let config = EmberConfig {
			burst_chance: 3.0,
			max_alpha: 1.7,
			fade_alpha: -0.5,
			ttl_min: 0.0,
			alpha_min: 0.95,
			alpha_spread: 0.5,
			..EmberConfig::default()
		}
		.sanitized();
		assert_eq!(config.burst_chance, 1.0);
		assert_eq!(config.max_alpha, 1.0);
		assert_eq!(config.fade_alpha, 0.0);
		assert_eq!(config.ttl_min, 1.0);
		assert!((config.alpha_min + config.alpha_spread - 1.0).abs() < 1e-12);
	}

	#[test]
	fn sanitize_caps_population_and_spawn_shape() {
		let config = EmberConfig {
			target_population: usize::MAX,
			rise_min: -2.0,
			radius_scale: f64::NAN,
			flicker_phase_min: f64::INFINITY,
			..EmberConfig::default()
		}
		.sanitized();
		assert_eq!(config.target_population, MAX_TARGET_POPULATION);
		assert_eq!(config.rise_min, 0.0);
		assert_eq!(config.radius_scale, 0.0);
		assert_eq!(config.flicker_phase_min, 0.0);

		let config = EmberConfig::from_json(r#"{ "target_population": 4000000000 }"#).unwrap();
		assert_eq!(config.target_population, MAX_TARGET_POPULATION);
	}
}
