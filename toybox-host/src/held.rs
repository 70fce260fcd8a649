use std::collections::HashMap;

use winit::keyboard::PhysicalKey;

use toybox_input::{Event, Keycode, Keymod};


/// Keys and mouse buttons currently held, keyed by what physically went down.
/// A key's logical value can change while it is held (e.g., shift released before `1`), so releases
/// report whatever keycode the press did.
#[derive(Debug, Default)]
pub struct HeldInputs {
	keys: HashMap<PhysicalKey, Keycode>,
	mouse_buttons: Vec<u8>,
}

impl HeldInputs {
	/// Returns the keycode to report for this press. Repeats keep the keycode of the initial press.
	pub fn press_key(&mut self, physical_key: PhysicalKey, keycode: Keycode) -> Keycode {
		*self.keys.entry(physical_key).or_insert(keycode)
	}

	pub fn release_key(&mut self, physical_key: PhysicalKey, keycode: Keycode) -> Keycode {
		self.keys.remove(&physical_key).unwrap_or(keycode)
	}

	pub fn press_mouse_button(&mut self, button: u8) {
		if !self.mouse_buttons.contains(&button) {
			self.mouse_buttons.push(button);
		}
	}

	pub fn release_mouse_button(&mut self, button: u8) {
		self.mouse_buttons.retain(|&held| held != button);
	}

	/// Release events for everything still held. Used when the window loses focus, since not every
	/// backend sends releases for keys let go while unfocused.
	pub fn release_all(&mut self, cursor: (i32, i32)) -> Vec<Event> {
		let keys = self.keys.drain()
			.map(|(_, keycode)| Event::Key {
				keycode,
				pressed: false,
				repeat: false,
				modifiers: Keymod::empty(),
			});

		let mouse_buttons = self.mouse_buttons.drain(..)
			.map(|button| Event::MouseButton {
				button,
				pressed: false,
				x: cursor.0,
				y: cursor.1,
			});

		keys.chain(mouse_buttons).collect()
	}
}



#[cfg(test)]
mod test {
	use super::*;
	use winit::keyboard::KeyCode;
	use toybox_input::keys;

	#[test]
	fn release_matches_shifted_press() {
		let mut held = HeldInputs::default();
		let digit_1 = PhysicalKey::Code(KeyCode::Digit1);

		// Shift+1 goes down as '!', but shift is let go first so 1 comes up as '1'.
		let pressed = held.press_key(digit_1, keys::from_char('!'));
		let released = held.release_key(digit_1, keys::from_char('1'));

		assert_eq!(pressed, keys::from_char('!'));
		assert_eq!(released, pressed);

		// Unmatched releases pass through.
		assert_eq!(held.release_key(digit_1, keys::from_char('1')), keys::from_char('1'));
	}

	#[test]
	fn repeats_keep_first_keycode() {
		let mut held = HeldInputs::default();
		let key_a = PhysicalKey::Code(KeyCode::KeyA);

		assert_eq!(held.press_key(key_a, keys::KEY_A), keys::KEY_A);
		assert_eq!(held.press_key(key_a, keys::from_char('A')), keys::KEY_A);
		assert_eq!(held.release_key(key_a, keys::KEY_A), keys::KEY_A);
	}

	#[test]
	fn focus_loss_releases_everything() {
		let mut held = HeldInputs::default();
		held.press_key(PhysicalKey::Code(KeyCode::KeyW), keys::KEY_W);
		held.press_key(PhysicalKey::Code(KeyCode::KeyD), keys::KEY_D);
		held.press_key(PhysicalKey::Code(KeyCode::KeyS), keys::KEY_S);
		held.release_key(PhysicalKey::Code(KeyCode::KeyS), keys::KEY_S);
		held.press_mouse_button(1);
		held.press_mouse_button(1);

		let mut released = held.release_all((5, 6));
		assert_eq!(released.len(), 3);

		let mouse = released.pop().unwrap();
		assert_eq!(mouse, Event::MouseButton { button: 1, pressed: false, x: 5, y: 6 });

		let mut released_keys: Vec<Keycode> = released.into_iter()
			.map(|event| match event {
				Event::Key { keycode, pressed: false, .. } => keycode,
				other => panic!("unexpected {other:?}"),
			})
			.collect();

		released_keys.sort();
		assert_eq!(released_keys, [keys::KEY_D, keys::KEY_W]);

		assert!(held.release_all((0, 0)).is_empty());
	}

	#[test]
	fn released_keys_drive_input_system() {
		use toybox_input::{System, Settings, testing::ScriptedPlatform};
		use common::math::Vec2i;

		let mut held = HeldInputs::default();
		let digit_1 = PhysicalKey::Code(KeyCode::Digit1);
		let mut input = System::new(ScriptedPlatform::new(), Settings::default());
		let mut window_size = Vec2i::new(100, 100);

		let keycode = held.press_key(digit_1, keys::from_char('!'));
		input.platform_mut().push(Event::Key { keycode, pressed: true, repeat: false, modifiers: Keymod::SHIFT });
		input.advance_frame(&mut window_size);
		assert!(input.button(keys::from_char('!')).is_down());

		let keycode = held.release_key(digit_1, keys::from_char('1'));
		input.platform_mut().push(Event::Key { keycode, pressed: false, repeat: false, modifiers: Keymod::empty() });
		input.advance_frame(&mut window_size);

		assert!(input.button(keys::from_char('!')).went_up());
		assert!(!input.button(keys::from_char('!')).is_down());
		assert!(!input.button(keys::from_char('1')).went_up());
	}
}
