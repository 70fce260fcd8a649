use crate::keys::Keycode;


/// Logical identifier for a digital control owned directly by the [`System`](crate::System).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ButtonId {
	Key(Keycode),

	/// Pointer slot index. Mouse buttons map to `button - 1`, touch fingers to their slot.
	Pointer(usize),
}

impl ButtonId {
	pub fn is_pointer(&self) -> bool {
		matches!(self, ButtonId::Pointer(_))
	}

	pub fn is_key(&self) -> bool {
		matches!(self, ButtonId::Key(_))
	}
}

impl From<Keycode> for ButtonId {
	fn from(o: Keycode) -> ButtonId {
		ButtonId::Key(o)
	}
}


/// Edge triggered digital control.
/// Tracks whether it is currently held, and whether it changed state since the last frame.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Button {
	is_down: bool,
	went_down: bool,
	went_up: bool,
}

impl Button {
	pub fn is_down(&self) -> bool { self.is_down }
	pub fn went_down(&self) -> bool { self.went_down }
	pub fn went_up(&self) -> bool { self.went_up }

	pub fn update(&mut self, down: bool) {
		// Transitions accumulate within a frame - never clear a flag set earlier this frame.
		if !self.is_down && down {
			self.went_down = true;
		} else if self.is_down && !down {
			self.went_up = true;
		}

		self.is_down = down;
	}

	/// Clear 'this frame' state. Must happen before any updates for the new frame.
	pub fn advance_frame(&mut self) {
		self.went_down = false;
		self.went_up = false;
	}
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn press_and_release() {
		let mut button = Button::default();

		button.update(true);
		assert!(button.is_down());
		assert!(button.went_down());
		assert!(!button.went_up());

		button.advance_frame();
		assert!(button.is_down());
		assert!(!button.went_down());
		assert!(!button.went_up());

		button.update(false);
		assert!(!button.is_down());
		assert!(!button.went_down());
		assert!(button.went_up());

		button.advance_frame();
		assert_eq!(button, Button::default());
	}

	#[test]
	fn double_transition_in_one_frame() {
		let mut button = Button::default();

		button.update(true);
		button.update(false);
		assert!(!button.is_down());
		assert!(button.went_down());
		assert!(button.went_up());

		button.update(true);
		assert!(button.is_down());
		assert!(button.went_down());
		assert!(button.went_up());

		button.advance_frame();
		assert!(button.is_down());
		assert!(!button.went_down());
		assert!(!button.went_up());
	}

	#[test]
	fn repeated_updates_dont_retrigger() {
		let mut button = Button::default();
		button.update(true);
		button.advance_frame();

		button.update(true);
		button.update(true);
		assert!(button.is_down());
		assert!(!button.went_down());

		button.advance_frame();
		button.update(false);
		button.update(false);
		assert!(button.went_up());
		assert!(!button.went_down());
	}

	#[test]
	fn advance_is_idempotent() {
		let mut button = Button::default();
		button.update(true);

		button.advance_frame();
		let after_first = button;
		button.advance_frame();

		assert_eq!(button, after_first);
		assert!(button.is_down());
	}
}
