//! Conversions from winit types into platform independent input types.

use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{MouseButton, MouseScrollDelta};
use winit::keyboard::{Key, KeyLocation, ModifiersState, NamedKey};

use toybox_input::keys::{self, Keycode, Keymod};


/// Scroll distance that counts as one wheel notch, for devices that report pixels.
const PIXELS_PER_LINE: f64 = 20.0;


pub fn keycode_from_key(key: &Key, location: KeyLocation) -> Option<Keycode> {
	match key {
		Key::Character(text) => text.chars().next().map(keys::from_char),
		Key::Named(named) => keycode_from_named_key(*named, location),
		_ => None,
	}
}

fn keycode_from_named_key(key: NamedKey, location: KeyLocation) -> Option<Keycode> {
	let is_right = location == KeyLocation::Right;

	let keycode = match key {
		NamedKey::Backspace => keys::BACKSPACE,
		NamedKey::Tab => keys::TAB,
		NamedKey::Enter => keys::ENTER,
		NamedKey::Escape => keys::ESCAPE,
		NamedKey::Space => keys::SPACE,
		NamedKey::Delete => keys::DELETE,
		NamedKey::CapsLock => keys::CAPS_LOCK,

		NamedKey::F1 => keys::F1,
		NamedKey::F2 => keys::F2,
		NamedKey::F3 => keys::F3,
		NamedKey::F4 => keys::F4,
		NamedKey::F5 => keys::F5,
		NamedKey::F6 => keys::F6,
		NamedKey::F7 => keys::F7,
		NamedKey::F8 => keys::F8,
		NamedKey::F9 => keys::F9,
		NamedKey::F10 => keys::F10,
		NamedKey::F11 => keys::F11,
		NamedKey::F12 => keys::F12,

		NamedKey::Insert => keys::INSERT,
		NamedKey::Home => keys::HOME,
		NamedKey::PageUp => keys::PAGE_UP,
		NamedKey::End => keys::END,
		NamedKey::PageDown => keys::PAGE_DOWN,

		NamedKey::ArrowRight => keys::ARROW_RIGHT,
		NamedKey::ArrowLeft => keys::ARROW_LEFT,
		NamedKey::ArrowDown => keys::ARROW_DOWN,
		NamedKey::ArrowUp => keys::ARROW_UP,

		NamedKey::Control if is_right => keys::RIGHT_CONTROL,
		NamedKey::Control => keys::LEFT_CONTROL,
		NamedKey::Shift if is_right => keys::RIGHT_SHIFT,
		NamedKey::Shift => keys::LEFT_SHIFT,
		NamedKey::Alt if is_right => keys::RIGHT_ALT,
		NamedKey::Alt => keys::LEFT_ALT,
		NamedKey::Super if is_right => keys::RIGHT_SUPER,
		NamedKey::Super => keys::LEFT_SUPER,

		NamedKey::BrowserBack | NamedKey::GoBack => keys::AC_BACK,

		_ => return None,
	};

	Some(keycode)
}

/// winit doesn't report which side a held modifier is on, so everything reads as the left key.
pub fn keymod_from_modifiers(state: ModifiersState) -> Keymod {
	let mut keymod = Keymod::empty();
	keymod.set(Keymod::LEFT_SHIFT, state.shift_key());
	keymod.set(Keymod::LEFT_CONTROL, state.control_key());
	keymod.set(Keymod::LEFT_ALT, state.alt_key());
	keymod.set(Keymod::LEFT_SUPER, state.super_key());
	keymod
}

/// 1-based button index, matching [`toybox_input::Event::MouseButton`].
pub fn mouse_button_index(button: MouseButton) -> Option<u8> {
	match button {
		MouseButton::Left => Some(1),
		MouseButton::Middle => Some(2),
		MouseButton::Right => Some(3),
		MouseButton::Back => Some(4),
		MouseButton::Forward => Some(5),
		MouseButton::Other(index) => u8::try_from(index).ok()?.checked_add(1),
	}
}

pub fn scroll_delta(delta: MouseScrollDelta) -> (i32, i32) {
	match delta {
		MouseScrollDelta::LineDelta(x, y) => (x.round() as i32, y.round() as i32),
		MouseScrollDelta::PixelDelta(position) => (
			(position.x / PIXELS_PER_LINE).round() as i32,
			(position.y / PIXELS_PER_LINE).round() as i32,
		),
	}
}

/// Map a window space touch location into [0, 1].
pub fn normalize_touch(location: PhysicalPosition<f64>, window_size: PhysicalSize<u32>) -> (f32, f32) {
	let width = window_size.width.max(1) as f64;
	let height = window_size.height.max(1) as f64;

	((location.x / width) as f32, (location.y / height) as f32)
}

/// Convert an IME preedit cursor from byte offsets into (start, length) in characters.
/// With no cursor, the caret sits after the whole text.
pub fn preedit_range(text: &str, cursor: Option<(usize, usize)>) -> (i32, i32) {
	let char_offset = |byte_offset: usize| {
		text.get(..byte_offset)
			.map_or_else(|| text.chars().count(), |prefix| prefix.chars().count())
	};

	let (start, end) = cursor.map_or((text.len(), text.len()), |(start, end)| (start, end.max(start)));
	let start_chars = char_offset(start);
	let end_chars = char_offset(end);

	(start_chars as i32, (end_chars - start_chars) as i32)
}



#[cfg(test)]
mod test {
	use super::*;
	use winit::keyboard::SmolStr;

	#[test]
	fn character_keys() {
		let key = Key::Character(SmolStr::new("W"));
		assert_eq!(keycode_from_key(&key, KeyLocation::Standard), Some(keys::KEY_W));

		let key = Key::Character(SmolStr::new("0"));
		assert_eq!(keycode_from_key(&key, KeyLocation::Numpad), Some(keys::DIGIT_0));
	}

	#[test]
	fn named_keys() {
		let enter = Key::Named(NamedKey::Enter);
		assert_eq!(keycode_from_key(&enter, KeyLocation::Standard), Some(keys::ENTER));

		let shift = Key::Named(NamedKey::Shift);
		assert_eq!(keycode_from_key(&shift, KeyLocation::Left), Some(keys::LEFT_SHIFT));
		assert_eq!(keycode_from_key(&shift, KeyLocation::Right), Some(keys::RIGHT_SHIFT));

		let unmapped = Key::Named(NamedKey::MediaPlay);
		assert_eq!(keycode_from_key(&unmapped, KeyLocation::Standard), None);
	}

	#[test]
	fn modifiers() {
		let keymod = keymod_from_modifiers(ModifiersState::SHIFT | ModifiersState::CONTROL);
		assert!(keymod.intersects(Keymod::SHIFT));
		assert!(keymod.intersects(Keymod::CONTROL));
		assert!(!keymod.intersects(Keymod::ALT));

		assert_eq!(keymod_from_modifiers(ModifiersState::empty()), Keymod::empty());
	}

	#[test]
	fn mouse_buttons() {
		assert_eq!(mouse_button_index(MouseButton::Left), Some(1));
		assert_eq!(mouse_button_index(MouseButton::Right), Some(3));
		assert_eq!(mouse_button_index(MouseButton::Other(7)), Some(8));
		assert_eq!(mouse_button_index(MouseButton::Other(300)), None);
	}

	#[test]
	fn scrolling() {
		assert_eq!(scroll_delta(MouseScrollDelta::LineDelta(0.0, -1.0)), (0, -1));
		assert_eq!(scroll_delta(MouseScrollDelta::PixelDelta(PhysicalPosition::new(40.0, 0.0))), (2, 0));
	}

	#[test]
	fn preedit_offsets_are_characters() {
		// "かな" is 6 bytes. A cursor selecting the second character is (3, 6) in bytes.
		assert_eq!(preedit_range("かな", Some((3, 6))), (1, 1));
		assert_eq!(preedit_range("かな", None), (2, 0));
		assert_eq!(preedit_range("abc", Some((1, 1))), (1, 0));

		// Offsets that don't land on a character boundary clamp to the end.
		assert_eq!(preedit_range("か", Some((0, 1))), (0, 1));
	}

	#[test]
	fn touch_normalization() {
		let (x, y) = normalize_touch(PhysicalPosition::new(50.0, 150.0), PhysicalSize::new(100, 200));
		assert_eq!((x, y), (0.5, 0.75));

		let (x, _) = normalize_touch(PhysicalPosition::new(3.0, 0.0), PhysicalSize::new(0, 0));
		assert_eq!(x, 3.0);
	}
}
