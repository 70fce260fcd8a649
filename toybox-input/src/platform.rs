use crate::event::Event;
use crate::joystick::JoystickDevice;
use crate::text::TextInputRect;


/// Everything the input system needs from the windowing layer.
pub trait Platform {
	/// Next pending event, without blocking.
	fn poll_event(&mut self) -> Option<Event>;

	/// Monotonic clock in milliseconds.
	fn ticks_ms(&self) -> u64;

	fn num_joysticks(&mut self) -> usize { 0 }

	/// Open the joystick at enumeration index `index`. The handle is closed when dropped.
	fn open_joystick(&mut self, _index: usize) -> Option<Box<dyn JoystickDevice>> { None }

	fn relative_mouse_mode(&self) -> bool { false }
	fn set_relative_mouse_mode(&mut self, _enabled: bool) {}

	fn start_text_input(&mut self) {}
	fn stop_text_input(&mut self) {}
	fn set_text_input_rect(&mut self, _rect: TextInputRect) {}
}
