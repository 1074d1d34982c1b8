//! The live ember population and its per-tick update.
//!
//! [`EmberField::tick`] is pull-based: the host decides when a tick happens
//! (see [`FrameClock`](super::clock::FrameClock)) and the field does one
//! fixed step of fade, top-up, update and draw.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::canvas::{CompositeMode, DrawSurface};
use super::config::EmberConfig;
use super::particle::Particle;
use super::render;
use super::surface::SurfaceState;

/// Owns the ember population, its tuning and its random source.
pub struct EmberField<R> {
	particles: Vec<Particle>,
	config: EmberConfig,
	rng: R,
	ticks: u64,
}

impl EmberField<SmallRng> {
	/// A field driven by a [`SmallRng`] seeded with `seed`.
	pub fn seeded(config: EmberConfig, seed: u64) -> Self {
		Self::new(config, SmallRng::seed_from_u64(seed))
	}
}

impl<R: Rng> EmberField<R> {
	pub fn new(config: EmberConfig, rng: R) -> Self {
		let config = config.sanitized();
		Self {
			particles: Vec::with_capacity(config.target_population.saturating_add(1)),
			config,
			rng,
			ticks: 0,
		}
	}

	pub fn config(&self) -> &EmberConfig {
		&self.config
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn population(&self) -> usize {
		self.particles.len()
	}

	/// Ticks run since the field was created.
	pub fn ticks(&self) -> u64 {
		self.ticks
	}

	/// Spawn a freshly sampled ember at `(x, y)`.
	pub fn spawn_at(&mut self, x: f64, y: f64) {
		let particle = Particle::spawn(&mut self.rng, x, y, &self.config);
		self.particles.push(particle);
	}

	/// Insert an already built ember.
	pub fn push(&mut self, particle: Particle) {
		self.particles.push(particle);
	}

	pub fn clear(&mut self) {
		self.particles.clear();
	}

	/// Advance the simulation one step and paint it onto `canvas`.
	pub fn tick<S: DrawSurface + ?Sized>(&mut self, surface: &SurfaceState, canvas: &mut S) {
		let (width, height) = (surface.width, surface.height);

		render::fade_trails(canvas, width, height, &self.config);
		self.replenish(width, height);

		canvas.set_composite(CompositeMode::Lighter);
		let config = &self.config;
		self.particles.retain_mut(|p| {
			p.advance(config);
			if p.is_expired(width, config) {
				return false;
			}
			render::draw_ember(canvas, p, p.glow(config), &config.glow);
			true
		});

		self.ticks += 1;
	}

	/// Top the population up to target along the bottom edge, plus the
	/// occasional extra ember for uneven emission.
	fn replenish(&mut self, width: f64, height: f64) {
		while self.particles.len() < self.config.target_population {
			let x = self.rng.random::<f64>() * width;
			let y = height + self.rng.random::<f64>() * self.config.spawn_band;
			self.spawn_at(x, y);
		}
		if self.rng.random::<f64>() < self.config.burst_chance {
			let x = self.rng.random::<f64>() * width;
			self.spawn_at(x, height + self.config.burst_offset);
		}
	}
}
