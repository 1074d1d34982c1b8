//! A single ember: spawn sampling, per-tick integration and appearance.

use rand::Rng;

use super::config::EmberConfig;

/// A single rising ember.
///
/// Position and velocity are live simulation state. Everything else is drawn
/// once at spawn and never changes.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	radius: f64,
	age: u32,
	ttl: f64,
	base_alpha: f64,
	hue: f64,
	flicker_phase: f64,
}

/// Instantaneous look of an ember for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
	/// Opacity in `0.0..=max_alpha`
	pub alpha: f64,
	/// Render radius in logical units
	pub radius: f64,
}

impl Particle {
	/// Sample a fresh ember at `(x, y)`.
	///
	/// One shared draw `b` couples size and speed: bigger embers rise faster
	/// and spread wider.
	pub fn spawn<R: Rng + ?Sized>(rng: &mut R, x: f64, y: f64, config: &EmberConfig) -> Self {
		let b: f64 = rng.random();
		Self {
			x,
			y,
			vx: (rng.random::<f64>() - 0.5) * (config.sway_min + b * config.sway_scale),
			vy: -(config.rise_min + b * config.rise_scale),
			radius: config.radius_min + b * config.radius_scale,
			age: 0,
			ttl: config.ttl_min + rng.random::<f64>() * config.ttl_spread,
			base_alpha: config.alpha_min + rng.random::<f64>() * config.alpha_spread,
			hue: config.hue_min + rng.random::<f64>() * config.hue_spread,
			flicker_phase: config.flicker_phase_min
				+ rng.random::<f64>() * config.flicker_phase_spread,
		}
	}

	/// A motionless ember with mid-range attributes, for hosts that want to
	/// place embers by hand.
	pub fn at_rest(x: f64, y: f64, ttl: f64) -> Self {
		Self {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			radius: 2.0,
			age: 0,
			ttl: ttl.max(1.0),
			base_alpha: 0.8,
			hue: 28.0,
			flicker_phase: 1.0,
		}
	}

	pub fn radius(&self) -> f64 {
		self.radius
	}

	/// Ticks survived so far.
	pub fn age(&self) -> u32 {
		self.age
	}

	pub fn ttl(&self) -> f64 {
		self.ttl
	}

	pub fn base_alpha(&self) -> f64 {
		self.base_alpha
	}

	/// Hue in degrees on the warm band.
	pub fn hue(&self) -> f64 {
		self.hue
	}

	pub fn flicker_phase(&self) -> f64 {
		self.flicker_phase
	}

	/// Age one tick: sine drift, damping, then integrate position.
	pub fn advance(&mut self, config: &EmberConfig) {
		self.age += 1;
		let age = self.age as f64;

		self.vx += ((self.x + age) * config.drift_frequency).sin() * config.drift_strength;
		self.vx *= config.damping;

		self.x += self.vx * config.horizontal_speed;
		self.y += self.vy * config.vertical_speed;
	}

	/// Remaining-life fraction `k = 1 - age / ttl`.
	pub fn life_fraction(&self) -> f64 {
		1.0 - self.age as f64 / self.ttl
	}

	/// Flame shimmer in `0.1..=1.0`.
	pub fn flicker(&self, config: &EmberConfig) -> f64 {
		let t = self.age as f64 * config.flicker_rate;
		let wave = (t * config.flicker_speed + self.flicker_phase * config.flicker_phase_scale).sin();
		config.flicker_mean + config.flicker_depth * wave
	}

	pub fn glow(&self, config: &EmberConfig) -> Glow {
		let k = self.life_fraction();
		Glow {
			alpha: (self.base_alpha * k * self.flicker(config)).clamp(0.0, config.max_alpha),
			radius: self.radius * (config.radius_floor + k),
		}
	}

	/// Whether the ember has outlived its ttl or left the visible area
	/// (with margins) of a surface `width` wide.
	pub fn is_expired(&self, width: f64, config: &EmberConfig) -> bool {
		self.age as f64 > self.ttl
			|| self.y < -config.top_margin
			|| self.x < -config.side_margin
			|| self.x > width + config.side_margin
	}
}
