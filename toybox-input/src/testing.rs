//! In-memory [`Platform`] for tests and headless runs.
//! Events are queued up front and then drained by the next [`System::advance_frame`](crate::System::advance_frame).

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::event::Event;
use crate::joystick::{JoystickDevice, JoystickId};
use crate::platform::Platform;
use crate::text::TextInputRect;


#[derive(Debug, Copy, Clone)]
struct JoystickInfo {
	instance_id: JoystickId,
	num_buttons: usize,
	num_axes: usize,
	num_hats: usize,
}


#[derive(Debug, Default)]
pub struct ScriptedPlatform {
	events: VecDeque<Event>,
	now_ms: u64,

	joysticks: Vec<JoystickInfo>,
	open_handles: Rc<Cell<usize>>,

	relative_mouse_mode: bool,
	text_input_active: bool,
	text_input_rect: Option<TextInputRect>,
}

impl ScriptedPlatform {
	pub fn new() -> ScriptedPlatform {
		ScriptedPlatform::default()
	}

	pub fn push(&mut self, event: Event) {
		self.events.push_back(event);
	}

	pub fn push_all(&mut self, events: impl IntoIterator<Item = Event>) {
		self.events.extend(events);
	}

	pub fn pending_events(&self) -> usize {
		self.events.len()
	}

	pub fn set_time(&mut self, now_ms: u64) {
		self.now_ms = now_ms;
	}

	pub fn advance_time(&mut self, ms: u64) {
		self.now_ms += ms;
	}

	/// Make a joystick available for enumeration and queue the matching added event.
	pub fn connect_joystick(&mut self, instance_id: JoystickId, num_buttons: usize, num_axes: usize, num_hats: usize) {
		self.joysticks.push(JoystickInfo { instance_id, num_buttons, num_axes, num_hats });
		self.push(Event::JoystickAdded { device_index: self.joysticks.len() - 1 });
	}

	pub fn disconnect_joystick(&mut self, instance_id: JoystickId) {
		self.joysticks.retain(|info| info.instance_id != instance_id);
		self.push(Event::JoystickRemoved { joystick_id: instance_id });
	}

	/// Number of joystick handles opened and not yet dropped.
	pub fn open_joystick_handles(&self) -> usize {
		self.open_handles.get()
	}

	pub fn is_text_input_active(&self) -> bool {
		self.text_input_active
	}

	pub fn text_input_rect(&self) -> Option<TextInputRect> {
		self.text_input_rect
	}
}

impl Platform for ScriptedPlatform {
	fn poll_event(&mut self) -> Option<Event> {
		self.events.pop_front()
	}

	fn ticks_ms(&self) -> u64 {
		self.now_ms
	}

	fn num_joysticks(&mut self) -> usize {
		self.joysticks.len()
	}

	fn open_joystick(&mut self, index: usize) -> Option<Box<dyn JoystickDevice>> {
		let info = *self.joysticks.get(index)?;

		self.open_handles.set(self.open_handles.get() + 1);

		Some(Box::new(ScriptedJoystick {
			info,
			open_handles: Rc::clone(&self.open_handles),
		}))
	}

	fn relative_mouse_mode(&self) -> bool {
		self.relative_mouse_mode
	}

	fn set_relative_mouse_mode(&mut self, enabled: bool) {
		self.relative_mouse_mode = enabled;
	}

	fn start_text_input(&mut self) {
		self.text_input_active = true;
	}

	fn stop_text_input(&mut self) {
		self.text_input_active = false;
	}

	fn set_text_input_rect(&mut self, rect: TextInputRect) {
		self.text_input_rect = Some(rect);
	}
}


struct ScriptedJoystick {
	info: JoystickInfo,
	open_handles: Rc<Cell<usize>>,
}

impl JoystickDevice for ScriptedJoystick {
	fn instance_id(&self) -> JoystickId { self.info.instance_id }
	fn name(&self) -> &str { "scripted joystick" }
	fn num_buttons(&self) -> usize { self.info.num_buttons }
	fn num_axes(&self) -> usize { self.info.num_axes }
	fn num_hats(&self) -> usize { self.info.num_hats }
}

impl Drop for ScriptedJoystick {
	fn drop(&mut self) {
		self.open_handles.set(self.open_handles.get() - 1);
	}
}
