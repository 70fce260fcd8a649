use std::collections::{HashMap, VecDeque};

use gilrs::{Axis, Button, EventType, Gilrs};

use toybox_input::{Event, HatDirection, JoystickDevice, JoystickId, JOYSTICK_AXIS_RANGE};


const BUTTONS: &[Button] = &[
	Button::South,
	Button::East,
	Button::North,
	Button::West,
	Button::LeftTrigger,
	Button::RightTrigger,
	Button::LeftTrigger2,
	Button::RightTrigger2,
	Button::Select,
	Button::Start,
	Button::Mode,
	Button::LeftThumb,
	Button::RightThumb,
];

const AXES: &[Axis] = &[
	Axis::LeftStickX,
	Axis::LeftStickY,
	Axis::RightStickX,
	Axis::RightStickY,
	Axis::LeftZ,
	Axis::RightZ,
];


/// Exposes gilrs gamepads as joysticks. The dpad is reported as a single hat.
pub struct GamepadBackend {
	gilrs: Gilrs,
	hats: HashMap<JoystickId, u8>,
}

impl GamepadBackend {
	pub fn new() -> anyhow::Result<GamepadBackend> {
		let gilrs = match Gilrs::new() {
			Ok(gilrs) => gilrs,
			Err(gilrs::Error::NotImplemented(dummy)) => {
				log::warn!("Gamepads not supported on this platform");
				dummy
			}
			Err(error) => anyhow::bail!("Failed to initialise gilrs: {error}"),
		};

		Ok(GamepadBackend {
			gilrs,
			hats: HashMap::new(),
		})
	}

	pub fn num_joysticks(&self) -> usize {
		self.gilrs.gamepads().count()
	}

	pub fn open_joystick(&self, index: usize) -> Option<Box<dyn JoystickDevice>> {
		let (id, gamepad) = self.gilrs.gamepads().nth(index)?;

		Some(Box::new(GilrsJoystick {
			instance_id: joystick_id(id),
			name: gamepad.name().to_owned(),
		}))
	}

	/// Translate everything gilrs has queued into joystick events.
	pub fn pump_events(&mut self, events: &mut VecDeque<Event>) {
		while let Some(gilrs::Event { id, event, .. }) = self.gilrs.next_event() {
			let joystick_id = joystick_id(id);

			match event {
				EventType::ButtonPressed(button, _) => self.on_button(joystick_id, button, true, events),
				EventType::ButtonReleased(button, _) => self.on_button(joystick_id, button, false, events),

				EventType::AxisChanged(axis, value, _) => {
					if let Some(axis_index) = axis_index(axis) {
						events.push_back(Event::JoystickAxis {
							joystick_id,
							axis: axis_index,
							value: raw_axis_value(axis, value),
						});
					}
				}

				EventType::Connected => {
					let Some(device_index) = self.gilrs.gamepads().position(|(other, _)| other == id) else {
						continue
					};

					events.push_back(Event::JoystickAdded { device_index });
				}

				EventType::Disconnected => {
					self.hats.remove(&joystick_id);
					events.push_back(Event::JoystickRemoved { joystick_id });
				}

				_ => {}
			}
		}
	}

	fn on_button(&mut self, joystick_id: JoystickId, button: Button, pressed: bool, events: &mut VecDeque<Event>) {
		if let Some(bit) = hat_bit(button) {
			let hat = self.hats.entry(joystick_id).or_default();
			if pressed {
				*hat |= bit;
			} else {
				*hat &= !bit;
			}

			events.push_back(Event::JoystickHat { joystick_id, hat: 0, value: *hat });
			return
		}

		if let Some(button) = button_index(button) {
			events.push_back(Event::JoystickButton { joystick_id, button, pressed });
		}
	}
}


struct GilrsJoystick {
	instance_id: JoystickId,
	name: String,
}

impl JoystickDevice for GilrsJoystick {
	fn instance_id(&self) -> JoystickId { self.instance_id }
	fn name(&self) -> &str { &self.name }
	fn num_buttons(&self) -> usize { BUTTONS.len() }
	fn num_axes(&self) -> usize { AXES.len() }
	fn num_hats(&self) -> usize { 1 }
}


fn joystick_id(id: gilrs::GamepadId) -> JoystickId {
	usize::from(id) as JoystickId
}

fn button_index(button: Button) -> Option<usize> {
	BUTTONS.iter().position(|&other| other == button)
}

fn axis_index(axis: Axis) -> Option<usize> {
	AXES.iter().position(|&other| other == axis)
}

fn hat_bit(button: Button) -> Option<u8> {
	match button {
		Button::DPadUp => Some(HatDirection::RAW_UP),
		Button::DPadRight => Some(HatDirection::RAW_RIGHT),
		Button::DPadDown => Some(HatDirection::RAW_DOWN),
		Button::DPadLeft => Some(HatDirection::RAW_LEFT),
		_ => None,
	}
}

/// gilrs reports sticks as y-up in [-1, 1]. Joystick axes are y-down in raw units.
fn raw_axis_value(axis: Axis, value: f32) -> i16 {
	let value = match axis {
		Axis::LeftStickY | Axis::RightStickY => -value,
		_ => value,
	};

	(value.clamp(-1.0, 1.0) * JOYSTICK_AXIS_RANGE) as i16
}
