//! Logical keycodes.
//! Printable keys use their unicode codepoint (lowercase for letters), everything else lives
//! in the range above [`SCANCODE_MASK`], matching the convention most platform layers already use.

/// Platform independent logical key identifier.
pub type Keycode = i32;

pub const SCANCODE_MASK: Keycode = 1 << 30;

const fn from_scancode(scancode: Keycode) -> Keycode {
	scancode | SCANCODE_MASK
}

pub const UNKNOWN: Keycode = 0;

pub const BACKSPACE: Keycode = 0x08;
pub const TAB: Keycode = 0x09;
pub const ENTER: Keycode = 0x0D;
pub const ESCAPE: Keycode = 0x1B;
pub const SPACE: Keycode = 0x20;
pub const DELETE: Keycode = 0x7F;

pub const DIGIT_0: Keycode = '0' as Keycode;
pub const DIGIT_9: Keycode = '9' as Keycode;
pub const KEY_A: Keycode = 'a' as Keycode;
pub const KEY_D: Keycode = 'd' as Keycode;
pub const KEY_S: Keycode = 's' as Keycode;
pub const KEY_W: Keycode = 'w' as Keycode;
pub const KEY_Z: Keycode = 'z' as Keycode;

pub const CAPS_LOCK: Keycode = from_scancode(57);

pub const F1: Keycode = from_scancode(58);
pub const F2: Keycode = from_scancode(59);
pub const F3: Keycode = from_scancode(60);
pub const F4: Keycode = from_scancode(61);
pub const F5: Keycode = from_scancode(62);
pub const F6: Keycode = from_scancode(63);
pub const F7: Keycode = from_scancode(64);
pub const F8: Keycode = from_scancode(65);
pub const F9: Keycode = from_scancode(66);
pub const F10: Keycode = from_scancode(67);
pub const F11: Keycode = from_scancode(68);
pub const F12: Keycode = from_scancode(69);

pub const INSERT: Keycode = from_scancode(73);
pub const HOME: Keycode = from_scancode(74);
pub const PAGE_UP: Keycode = from_scancode(75);
pub const END: Keycode = from_scancode(77);
pub const PAGE_DOWN: Keycode = from_scancode(78);

pub const ARROW_RIGHT: Keycode = from_scancode(79);
pub const ARROW_LEFT: Keycode = from_scancode(80);
pub const ARROW_DOWN: Keycode = from_scancode(81);
pub const ARROW_UP: Keycode = from_scancode(82);

pub const LEFT_CONTROL: Keycode = from_scancode(224);
pub const LEFT_SHIFT: Keycode = from_scancode(225);
pub const LEFT_ALT: Keycode = from_scancode(226);
pub const LEFT_SUPER: Keycode = from_scancode(227);
pub const RIGHT_CONTROL: Keycode = from_scancode(228);
pub const RIGHT_SHIFT: Keycode = from_scancode(229);
pub const RIGHT_ALT: Keycode = from_scancode(230);
pub const RIGHT_SUPER: Keycode = from_scancode(231);

// Android back button - delivered as a key on mobile platforms.
pub const AC_BACK: Keycode = from_scancode(270);


/// Keycode for a printable character.
pub fn from_char(c: char) -> Keycode {
	c.to_ascii_lowercase() as Keycode
}


bitflags::bitflags! {
	/// Modifier keys held during a key event.
	#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
	pub struct Keymod: u16 {
		const LEFT_SHIFT = 0x0001;
		const RIGHT_SHIFT = 0x0002;
		const LEFT_CONTROL = 0x0040;
		const RIGHT_CONTROL = 0x0080;
		const LEFT_ALT = 0x0100;
		const RIGHT_ALT = 0x0200;
		const LEFT_SUPER = 0x0400;
		const RIGHT_SUPER = 0x0800;
		const NUM_LOCK = 0x1000;
		const CAPS_LOCK = 0x2000;

		const SHIFT = Self::LEFT_SHIFT.bits() | Self::RIGHT_SHIFT.bits();
		const CONTROL = Self::LEFT_CONTROL.bits() | Self::RIGHT_CONTROL.bits();
		const ALT = Self::LEFT_ALT.bits() | Self::RIGHT_ALT.bits();
		const SUPER = Self::LEFT_SUPER.bits() | Self::RIGHT_SUPER.bits();
	}
}


#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn char_keycodes() {
		assert_eq!(from_char('A'), KEY_A);
		assert_eq!(from_char('z'), KEY_Z);
		assert_eq!(from_char(' '), SPACE);
		assert!(F1 & SCANCODE_MASK != 0);
	}

	#[test]
	fn modifier_groups() {
		let mods = Keymod::LEFT_SHIFT | Keymod::RIGHT_ALT;
		assert!(mods.intersects(Keymod::SHIFT));
		assert!(mods.intersects(Keymod::ALT));
		assert!(!mods.intersects(Keymod::CONTROL));
	}
}
