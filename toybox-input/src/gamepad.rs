use crate::button::Button;


/// Platform device id of a gamepad delivered through the [`GamepadEventSender`](crate::bridge::GamepadEventSender).
pub type GamepadId = i32;

/// Analog motion beyond this magnitude counts as a directional press.
pub const DEFAULT_GAMEPAD_DEADZONE: f32 = 0.5;


#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GamepadButton {
	Up,
	Down,
	Left,
	Right,
	A,
	B,
	C,
}

impl GamepadButton {
	pub const COUNT: usize = 7;

	pub const ALL: [GamepadButton; Self::COUNT] = [
		GamepadButton::Up,
		GamepadButton::Down,
		GamepadButton::Left,
		GamepadButton::Right,
		GamepadButton::A,
		GamepadButton::B,
		GamepadButton::C,
	];

	fn index(self) -> usize {
		self as usize
	}

	/// Maps an android keycode onto a gamepad button.
	/// Dpad center doubles as A, since nobody dealing with a gamepad wants to care about the distinction.
	pub fn from_android_keycode(keycode: i32) -> Option<GamepadButton> {
		ANDROID_KEYCODE_MAP.iter()
			.find(|&&(code, _)| code == keycode)
			.map(|&(_, button)| button)
	}
}


pub mod android_keycode {
	pub const DPAD_UP: i32 = 19;
	pub const DPAD_DOWN: i32 = 20;
	pub const DPAD_LEFT: i32 = 21;
	pub const DPAD_RIGHT: i32 = 22;
	pub const DPAD_CENTER: i32 = 23;
	pub const BUTTON_A: i32 = 96;
	pub const BUTTON_B: i32 = 97;
	pub const BUTTON_C: i32 = 98;
}

const ANDROID_KEYCODE_MAP: [(i32, GamepadButton); 8] = [
	(android_keycode::DPAD_UP, GamepadButton::Up),
	(android_keycode::DPAD_DOWN, GamepadButton::Down),
	(android_keycode::DPAD_LEFT, GamepadButton::Left),
	(android_keycode::DPAD_RIGHT, GamepadButton::Right),
	(android_keycode::DPAD_CENTER, GamepadButton::A),
	(android_keycode::BUTTON_A, GamepadButton::A),
	(android_keycode::BUTTON_B, GamepadButton::B),
	(android_keycode::BUTTON_C, GamepadButton::C),
];


#[derive(Debug, Clone)]
pub struct Gamepad {
	controller_id: GamepadId,
	buttons: [Button; GamepadButton::COUNT],
}

impl Gamepad {
	pub fn new(controller_id: GamepadId) -> Gamepad {
		Gamepad {
			controller_id,
			buttons: [Button::default(); GamepadButton::COUNT],
		}
	}

	pub fn controller_id(&self) -> GamepadId {
		self.controller_id
	}

	pub fn button(&self, button: GamepadButton) -> Button {
		self.buttons[button.index()]
	}

	pub fn button_mut(&mut self, button: GamepadButton) -> &mut Button {
		&mut self.buttons[button.index()]
	}

	/// Synthesize directional buttons from analog stick motion.
	/// Comparisons are strict - a value exactly on the deadzone is not a press.
	pub fn update_from_motion(&mut self, x: f32, y: f32, deadzone: f32) {
		self.button_mut(GamepadButton::Left).update(x < -deadzone);
		self.button_mut(GamepadButton::Right).update(x > deadzone);
		self.button_mut(GamepadButton::Up).update(y < -deadzone);
		self.button_mut(GamepadButton::Down).update(y > deadzone);
	}

	pub fn advance_frame(&mut self) {
		self.buttons.iter_mut().for_each(Button::advance_frame);
	}
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn keycode_mapping() {
		use android_keycode::*;

		assert_eq!(GamepadButton::from_android_keycode(DPAD_UP), Some(GamepadButton::Up));
		assert_eq!(GamepadButton::from_android_keycode(DPAD_RIGHT), Some(GamepadButton::Right));
		assert_eq!(GamepadButton::from_android_keycode(DPAD_CENTER), Some(GamepadButton::A));
		assert_eq!(GamepadButton::from_android_keycode(BUTTON_A), Some(GamepadButton::A));
		assert_eq!(GamepadButton::from_android_keycode(BUTTON_B), Some(GamepadButton::B));
		assert_eq!(GamepadButton::from_android_keycode(BUTTON_C), Some(GamepadButton::C));
		assert_eq!(GamepadButton::from_android_keycode(4), None);
	}

	#[test]
	fn deadzone() {
		let deadzone = DEFAULT_GAMEPAD_DEADZONE;
		let mut gamepad = Gamepad::new(1);

		gamepad.update_from_motion(-deadzone - 0.01, 0.0, deadzone);
		assert!(gamepad.button(GamepadButton::Left).is_down());
		assert!(!gamepad.button(GamepadButton::Right).is_down());

		gamepad.update_from_motion(deadzone - 0.01, -deadzone + 0.01, deadzone);
		assert!(!gamepad.button(GamepadButton::Left).is_down());
		assert!(!gamepad.button(GamepadButton::Right).is_down());
		assert!(!gamepad.button(GamepadButton::Up).is_down());
		assert!(gamepad.button(GamepadButton::Left).went_up());

		gamepad.update_from_motion(deadzone, deadzone, deadzone);
		assert!(!gamepad.button(GamepadButton::Right).is_down());
		assert!(!gamepad.button(GamepadButton::Down).is_down());

		gamepad.update_from_motion(0.0, deadzone + 0.01, deadzone);
		assert!(gamepad.button(GamepadButton::Down).is_down());
		assert!(!gamepad.button(GamepadButton::Up).is_down());
	}

	#[test]
	fn advance_clears_edges() {
		let mut gamepad = Gamepad::new(7);
		gamepad.button_mut(GamepadButton::B).update(true);
		assert!(gamepad.button(GamepadButton::B).went_down());

		gamepad.advance_frame();
		assert!(gamepad.button(GamepadButton::B).is_down());
		assert!(!gamepad.button(GamepadButton::B).went_down());
		assert_eq!(gamepad.controller_id(), 7);
	}
}
