use crate::joystick::JoystickId;
use crate::keys::{Keycode, Keymod};
use crate::pointer::PointerId;


/// Coarse application lifecycle notifications, mostly relevant on mobile.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AppEvent {
	Terminating,
	LowMemory,
	WillEnterBackground,
	DidEnterBackground,
	WillEnterForeground,
	DidEnterForeground,
}


/// A single event as delivered by a [`Platform`](crate::Platform).
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
	Quit,

	App(AppEvent),

	Key {
		keycode: Keycode,
		pressed: bool,
		repeat: bool,
		modifiers: Keymod,
	},

	/// Finger positions and deltas are normalised to [0, 1] across the window.
	FingerDown { finger_id: PointerId, x: f32, y: f32, dx: f32, dy: f32 },
	FingerMotion { finger_id: PointerId, x: f32, y: f32, dx: f32, dy: f32 },
	FingerUp { finger_id: PointerId, x: f32, y: f32, dx: f32, dy: f32 },

	/// `button` is 1-based: 1 is the primary button.
	MouseButton { button: u8, pressed: bool, x: i32, y: i32 },
	MouseMotion { x: i32, y: i32, xrel: i32, yrel: i32 },
	MouseWheel { x: i32, y: i32 },

	WindowResized { width: i32, height: i32 },

	/// Raw axis value in [-32768, 32767].
	JoystickAxis { joystick_id: JoystickId, axis: usize, value: i16 },
	JoystickButton { joystick_id: JoystickId, button: usize, pressed: bool },

	/// Raw hat bitmask - see [`HatDirection::from_raw`](crate::HatDirection::from_raw).
	JoystickHat { joystick_id: JoystickId, hat: usize, value: u8 },

	/// `device_index` is an enumeration index, not an instance id.
	JoystickAdded { device_index: usize },
	JoystickRemoved { joystick_id: JoystickId },

	/// `start` and `length` are measured in characters, not bytes.
	TextEditing { text: String, start: i32, length: i32 },
	TextInput { text: String },

	/// Anything the platform layer passes on without translating.
	Unknown { kind: u32 },
}
