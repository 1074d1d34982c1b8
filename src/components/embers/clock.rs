//! Fixed-step scheduling on top of a variable-rate frame callback.
//!
//! Every ember constant is tuned per 60 Hz tick. The clock converts
//! `requestAnimationFrame` timestamps into a whole number of fixed ticks, so
//! embers rise at the same speed on 30, 60, 120 or 144 Hz displays.

/// Default simulation rate.
pub const DEFAULT_TICK_HZ: f64 = 60.0;
/// Default cap on ticks run for a single frame.
pub const DEFAULT_MAX_CATCH_UP: u32 = 4;

/// Absorbs float error in timestamps that are exact multiples of a step.
const STEP_EPSILON_MS: f64 = 1e-6;

/// Fixed-step accumulator fed with frame timestamps in milliseconds.
#[derive(Clone, Debug)]
pub struct FrameClock {
	step_ms: f64,
	max_catch_up: u32,
	last_ms: Option<f64>,
	carry_ms: f64,
}

impl FrameClock {
	/// A clock ticking at `tick_hz` that never runs more than `max_catch_up`
	/// ticks for one frame.
	pub fn new(tick_hz: f64, max_catch_up: u32) -> Self {
		let tick_hz = if tick_hz.is_finite() && tick_hz >= 1.0 {
			tick_hz
		} else {
			DEFAULT_TICK_HZ
		};
		Self {
			step_ms: 1000.0 / tick_hz,
			max_catch_up: max_catch_up.max(1),
			last_ms: None,
			carry_ms: 0.0,
		}
	}

	pub fn step_ms(&self) -> f64 {
		self.step_ms
	}

	/// Number of ticks due at frame time `now_ms`.
	///
	/// The first frame always runs one tick. After a long stall (hidden tab)
	/// at most `max_catch_up` ticks run and the rest of the backlog is
	/// dropped. A timestamp that goes backwards rebases the clock.
	pub fn advance(&mut self, now_ms: f64) -> u32 {
		let Some(last_ms) = self.last_ms else {
			self.last_ms = Some(now_ms);
			return 1;
		};
		self.last_ms = Some(now_ms);

		let elapsed = now_ms - last_ms;
		if elapsed.is_nan() || elapsed <= 0.0 {
			return 0;
		}

		self.carry_ms += elapsed;
		let due = ((self.carry_ms + STEP_EPSILON_MS) / self.step_ms).floor();
		if due >= self.max_catch_up as f64 {
			self.carry_ms = 0.0;
			return self.max_catch_up;
		}
		self.carry_ms = (self.carry_ms - due * self.step_ms).max(0.0);
		due as u32
	}

	/// Forget the last timestamp; the next frame is treated as the first.
	pub fn reset(&mut self) {
		self.last_ms = None;
		self.carry_ms = 0.0;
	}
}

impl Default for FrameClock {
	fn default() -> Self {
		Self::new(DEFAULT_TICK_HZ, DEFAULT_MAX_CATCH_UP)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Total ticks over one second of frames at `display_hz`.
	fn ticks_per_second(display_hz: f64) -> u32 {
		let mut clock = FrameClock::default();
		let frame_ms = 1000.0 / display_hz;
		let frames = display_hz.round() as u32;
		(0..=frames)
			.map(|i| clock.advance(1000.0 + i as f64 * frame_ms))
			.sum()
	}

	#[test]
	fn first_frame_runs_one_tick() {
		let mut clock = FrameClock::default();
		assert_eq!(clock.advance(12_345.0), 1);
	}

	#[test]
	fn matching_refresh_runs_one_tick_per_frame() {
		let mut clock = FrameClock::default();
		let step = clock.step_ms();
		clock.advance(0.0);
		for i in 1..=600 {
			assert_eq!(clock.advance(i as f64 * step), 1, "frame {i}");
		}
	}

	#[test]
	fn rate_is_independent_of_display() {
		for hz in [30.0, 60.0, 75.0, 120.0, 144.0] {
			let ticks = ticks_per_second(hz);
			assert!((60..=62).contains(&ticks), "{hz} Hz ran {ticks} ticks");
		}
	}

	#[test]
	fn slow_display_runs_several_ticks() {
		let mut clock = FrameClock::default();
		clock.advance(0.0);
		assert_eq!(clock.advance(1000.0 / 30.0), 2);
	}

	#[test]
	fn stall_is_clamped() {
		let mut clock = FrameClock::default();
		clock.advance(0.0);
		assert_eq!(clock.advance(10_000.0), DEFAULT_MAX_CATCH_UP);
		assert_eq!(clock.advance(10_000.0 + clock.step_ms()), 1);
	}

	#[test]
	fn backwards_time_rebases() {
		let mut clock = FrameClock::default();
		clock.advance(500.0);
		assert_eq!(clock.advance(100.0), 0);
		assert_eq!(clock.advance(100.0 + clock.step_ms()), 1);
	}

	#[test]
	fn reset_restarts_baseline() {
		let mut clock = FrameClock::default();
		clock.advance(0.0);
		clock.reset();
		assert_eq!(clock.advance(99_999.0), 1);
	}

	#[test]
	fn bad_rate_falls_back_to_default() {
		let clock = FrameClock::new(f64::NAN, 0);
		assert_eq!(clock.step_ms(), 1000.0 / DEFAULT_TICK_HZ);
	}
}
