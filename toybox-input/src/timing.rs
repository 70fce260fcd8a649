
const MILLISECONDS_PER_SECOND: f32 = 1000.0;

/// Assumed duration of the frame before the first, so the first delta isn't a huge spike.
const FIRST_FRAME_MS: u64 = 16;


/// Frame timing, driven by a millisecond clock.
#[derive(Debug, Clone)]
pub struct FrameTimer {
	start_ms: u64,
	last_ms: u64,
	frame_time_ms: u64,
	frames: u64,

	next_frame_rate_log: f32,
}

impl FrameTimer {
	pub fn new(now_ms: u64) -> FrameTimer {
		FrameTimer {
			start_ms: now_ms,
			last_ms: now_ms.saturating_sub(FIRST_FRAME_MS),
			frame_time_ms: 0,
			frames: 0,

			next_frame_rate_log: 0.0,
		}
	}

	pub fn advance(&mut self, now_ms: u64) {
		self.frame_time_ms = now_ms.saturating_sub(self.last_ms);
		self.last_ms = now_ms;
		self.frames += 1;
	}

	/// Number of times the timer has been advanced.
	pub fn frames(&self) -> u64 { self.frames }

	pub fn frame_time_ms(&self) -> u64 { self.frame_time_ms }

	/// Seconds between the start of the previous frame and the start of this one.
	pub fn delta_time(&self) -> f32 {
		self.frame_time_ms as f32 / MILLISECONDS_PER_SECOND
	}

	/// Seconds since the timer was created, as of the start of this frame.
	pub fn time(&self) -> f32 {
		self.last_ms.saturating_sub(self.start_ms) as f32 / MILLISECONDS_PER_SECOND
	}

	/// Returns true at most once per elapsed second.
	pub(crate) fn should_log_frame_rate(&mut self) -> bool {
		let time = self.time();
		if time < self.next_frame_rate_log {
			return false
		}

		self.next_frame_rate_log = time.floor() + 1.0;
		true
	}
}
