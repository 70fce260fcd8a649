use crate::keys::{Keycode, Keymod};


/// A single recorded text input event, as seen by a text field.
/// Only recorded while [`System::record_text_input`](crate::System::record_text_input) is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextInputEvent {
	/// Raw key press or release, for handling cursor movement, deletion and so on.
	Key {
		pressed: bool,
		repeat: bool,
		symbol: Keycode,
		modifier: Keymod,
	},

	/// In-progress IME composition.
	Edit {
		text: String,
		start: i32,
		length: i32,
	},

	/// Committed text.
	Text {
		text: String,
	},
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TextInputEventKind {
	Key,
	Edit,
	Text,
}

impl TextInputEvent {
	pub fn key(pressed: bool, repeat: bool, symbol: Keycode, modifier: Keymod) -> TextInputEvent {
		TextInputEvent::Key { pressed, repeat, symbol, modifier }
	}

	pub fn edit(text: impl Into<String>, start: i32, length: i32) -> TextInputEvent {
		TextInputEvent::Edit { text: text.into(), start, length }
	}

	pub fn text(text: impl Into<String>) -> TextInputEvent {
		TextInputEvent::Text { text: text.into() }
	}

	pub fn kind(&self) -> TextInputEventKind {
		match self {
			TextInputEvent::Key{..} => TextInputEventKind::Key,
			TextInputEvent::Edit{..} => TextInputEventKind::Edit,
			TextInputEvent::Text{..} => TextInputEventKind::Text,
		}
	}

	/// The text payload of Edit and Text events.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			TextInputEvent::Edit{ text, .. } | TextInputEvent::Text{ text } => Some(text),
			TextInputEvent::Key{..} => None,
		}
	}
}


/// Screen space rect used to position IME candidate windows.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct TextInputRect {
	pub x: i32,
	pub y: i32,
	pub width: i32,
	pub height: i32,
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn constructors_match_kinds() {
		let key = TextInputEvent::key(true, false, crate::keys::BACKSPACE, Keymod::LEFT_SHIFT);
		assert_eq!(key.kind(), TextInputEventKind::Key);
		assert_eq!(key.as_text(), None);

		let edit = TextInputEvent::edit("かな", 0, 2);
		assert_eq!(edit.kind(), TextInputEventKind::Edit);
		assert_eq!(edit.as_text(), Some("かな"));

		let text = TextInputEvent::text("hello");
		assert_eq!(text.kind(), TextInputEventKind::Text);
		assert_eq!(text, TextInputEvent::Text{ text: "hello".into() });
	}
}
