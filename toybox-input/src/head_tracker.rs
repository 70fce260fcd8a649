//! Head mounted display support - a single trigger button, plus per-eye view transforms
//! supplied by an external tracker.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use mint::ColumnMatrix4;


pub type EyeTransform = ColumnMatrix4<f32>;

pub fn identity_transform() -> EyeTransform {
	ColumnMatrix4::from([
		[1.0, 0.0, 0.0, 0.0],
		[0.0, 1.0, 0.0, 0.0],
		[0.0, 0.0, 1.0, 0.0],
		[0.0, 0.0, 0.0, 1.0],
	])
}


/// Source of eye transforms, e.g., the platform's head tracking service.
pub trait EyeTracker {
	/// Query the current (left, right) eye transforms.
	fn eye_views(&mut self) -> anyhow::Result<(EyeTransform, EyeTransform)>;

	fn reset(&mut self) -> anyhow::Result<()> { Ok(()) }
}


/// Thread safe handle for reporting trigger presses, e.g., from a platform callback.
#[derive(Debug, Clone)]
pub struct HeadTriggerHandle {
	pending: Arc<AtomicBool>,
}

impl HeadTriggerHandle {
	pub fn trigger(&self) {
		self.pending.store(true, Ordering::Release);
	}
}


pub struct HeadTracker {
	tracker: Box<dyn EyeTracker>,

	pending_trigger: Arc<AtomicBool>,
	triggered: bool,

	in_head_mount: bool,

	left_eye_transform: EyeTransform,
	right_eye_transform: EyeTransform,
}

impl HeadTracker {
	pub fn new(tracker: Box<dyn EyeTracker>) -> HeadTracker {
		HeadTracker {
			tracker,

			pending_trigger: Arc::new(AtomicBool::new(false)),
			triggered: false,

			in_head_mount: false,

			left_eye_transform: identity_transform(),
			right_eye_transform: identity_transform(),
		}
	}

	pub fn trigger_handle(&self) -> HeadTriggerHandle {
		HeadTriggerHandle {
			pending: Arc::clone(&self.pending_trigger),
		}
	}

	/// Whether the trigger was pressed since the previous frame.
	/// However many presses arrive between frames, this is true for exactly one frame.
	pub fn triggered(&self) -> bool { self.triggered }

	pub fn is_in_head_mount(&self) -> bool { self.in_head_mount }
	pub fn set_in_head_mount(&mut self, in_head_mount: bool) { self.in_head_mount = in_head_mount }

	pub fn left_eye_transform(&self) -> EyeTransform { self.left_eye_transform }
	pub fn right_eye_transform(&self) -> EyeTransform { self.right_eye_transform }

	pub fn on_trigger(&mut self) {
		self.pending_trigger.store(true, Ordering::Release);
	}

	pub fn reset_head_tracker(&mut self) {
		if let Err(error) = self.tracker.reset() {
			log::warn!("Failed to reset head tracker: {error}");
		}
	}

	pub fn advance_frame(&mut self) {
		self.update_transforms();
		self.triggered = self.pending_trigger.swap(false, Ordering::AcqRel);
	}

	fn update_transforms(&mut self) {
		// Previous transforms are kept if the tracker fails.
		match self.tracker.eye_views() {
			Ok((left, right)) => {
				self.left_eye_transform = left;
				self.right_eye_transform = right;
			}

			Err(error) => log::trace!("Failed to update eye transforms: {error}"),
		}
	}
}

impl std::fmt::Debug for HeadTracker {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("HeadTracker")
			.field("triggered", &self.triggered)
			.field("in_head_mount", &self.in_head_mount)
			.finish_non_exhaustive()
	}
}



#[cfg(test)]
mod test {
	use super::*;

	struct ScriptedTracker {
		responses: Vec<anyhow::Result<(EyeTransform, EyeTransform)>>,
	}

	impl EyeTracker for ScriptedTracker {
		fn eye_views(&mut self) -> anyhow::Result<(EyeTransform, EyeTransform)> {
			if self.responses.is_empty() {
				anyhow::bail!("tracker unavailable")
			}

			self.responses.remove(0)
		}
	}

	fn scaled(scale: f32) -> EyeTransform {
		ColumnMatrix4::from([
			[scale, 0.0, 0.0, 0.0],
			[0.0, scale, 0.0, 0.0],
			[0.0, 0.0, scale, 0.0],
			[0.0, 0.0, 0.0, 1.0],
		])
	}

	#[test]
	fn trigger_latches_for_one_frame() {
		let mut tracker = HeadTracker::new(Box::new(ScriptedTracker { responses: Vec::new() }));
		let handle = tracker.trigger_handle();

		tracker.advance_frame();
		assert!(!tracker.triggered());

		handle.trigger();
		tracker.on_trigger();
		handle.trigger();
		assert!(!tracker.triggered());

		tracker.advance_frame();
		assert!(tracker.triggered());

		tracker.advance_frame();
		assert!(!tracker.triggered());

		// Triggering while still latched produces another single frame
		tracker.on_trigger();
		tracker.advance_frame();
		assert!(tracker.triggered());
		tracker.on_trigger();
		tracker.advance_frame();
		assert!(tracker.triggered());
		tracker.advance_frame();
		assert!(!tracker.triggered());
	}

	#[test]
	fn stale_transforms_survive_tracker_failure() {
		let responses = vec![
			Ok((scaled(2.0), scaled(3.0))),
			Err(anyhow::format_err!("lost connection")),
		];

		let mut tracker = HeadTracker::new(Box::new(ScriptedTracker { responses }));
		assert_eq!(tracker.left_eye_transform(), identity_transform());

		tracker.advance_frame();
		assert_eq!(tracker.left_eye_transform(), scaled(2.0));
		assert_eq!(tracker.right_eye_transform(), scaled(3.0));

		tracker.advance_frame();
		assert_eq!(tracker.left_eye_transform(), scaled(2.0));
		assert_eq!(tracker.right_eye_transform(), scaled(3.0));
	}
}
