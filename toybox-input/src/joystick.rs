use crate::analog::{Axis, Hat};
use crate::button::Button;


/// Platform assigned instance id. Stable for as long as a device stays connected.
pub type JoystickId = i32;


/// An open handle to a physical joystick.
/// Dropping the handle closes it.
pub trait JoystickDevice {
	fn instance_id(&self) -> JoystickId;

	fn name(&self) -> &str { "joystick" }

	fn num_buttons(&self) -> usize;
	fn num_axes(&self) -> usize;
	fn num_hats(&self) -> usize;
}


/// Logical joystick. Outlives the physical device it represents so that any state game logic
/// holds onto keeps making sense across disconnects and reconnects.
#[derive(Default)]
pub struct Joystick {
	device: Option<Box<dyn JoystickDevice>>,

	buttons: Vec<Button>,
	axes: Vec<Axis>,
	hats: Vec<Hat>,
}

impl Joystick {
	pub fn is_connected(&self) -> bool {
		self.device.is_some()
	}

	pub fn device(&self) -> Option<&dyn JoystickDevice> {
		self.device.as_deref()
	}

	/// Replaces the current device handle, closing the previous one.
	pub(crate) fn set_device(&mut self, device: Option<Box<dyn JoystickDevice>>) {
		self.device = device;
	}

	pub fn instance_id(&self) -> Option<JoystickId> {
		self.device.as_ref().map(|device| device.instance_id())
	}

	pub fn name(&self) -> Option<&str> {
		self.device.as_ref().map(|device| device.name())
	}

	/// Number of buttons the connected device reports. Zero when disconnected.
	pub fn num_buttons(&self) -> usize {
		self.device.as_ref().map_or(0, |device| device.num_buttons())
	}

	pub fn num_axes(&self) -> usize {
		self.device.as_ref().map_or(0, |device| device.num_axes())
	}

	pub fn num_hats(&self) -> usize {
		self.device.as_ref().map_or(0, |device| device.num_hats())
	}

	pub fn button(&self, index: usize) -> Button {
		self.buttons.get(index).copied().unwrap_or_default()
	}

	pub fn axis(&self, index: usize) -> Axis {
		self.axes.get(index).copied().unwrap_or_default()
	}

	pub fn hat(&self, index: usize) -> Hat {
		self.hats.get(index).copied().unwrap_or_default()
	}

	pub fn buttons(&self) -> &[Button] { &self.buttons }
	pub fn axes(&self) -> &[Axis] { &self.axes }
	pub fn hats(&self) -> &[Hat] { &self.hats }

	pub fn button_mut(&mut self, index: usize) -> &mut Button {
		grow_to_fit(&mut self.buttons, index)
	}

	pub fn axis_mut(&mut self, index: usize) -> &mut Axis {
		grow_to_fit(&mut self.axes, index)
	}

	pub fn hat_mut(&mut self, index: usize) -> &mut Hat {
		grow_to_fit(&mut self.hats, index)
	}

	/// Reset per-frame state on all controls.
	pub fn advance_frame(&mut self) {
		self.buttons.iter_mut().for_each(Button::advance_frame);
		self.axes.iter_mut().for_each(Axis::advance_frame);
		self.hats.iter_mut().for_each(Hat::advance_frame);
	}
}

impl std::fmt::Debug for Joystick {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Joystick")
			.field("device", &self.name())
			.field("buttons", &self.buttons)
			.field("axes", &self.axes)
			.field("hats", &self.hats)
			.finish()
	}
}


fn grow_to_fit<T: Default>(list: &mut Vec<T>, index: usize) -> &mut T {
	if index >= list.len() {
		list.resize_with(index + 1, T::default);
	}

	&mut list[index]
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn controls_grow_on_demand() {
		let mut joystick = Joystick::default();
		assert!(!joystick.is_connected());
		assert_eq!(joystick.buttons().len(), 0);

		joystick.button_mut(3).update(true);
		assert_eq!(joystick.buttons().len(), 4);
		assert!(joystick.button(3).went_down());
		assert!(!joystick.button(0).is_down());

		// Reads past the end don't grow
		assert!(!joystick.button(10).is_down());
		assert_eq!(joystick.buttons().len(), 4);

		joystick.axis_mut(1).update(0.5);
		assert_eq!(joystick.axes().len(), 2);
		assert_eq!(joystick.axis(1).value(), 0.5);

		joystick.advance_frame();
		assert!(joystick.button(3).is_down());
		assert!(!joystick.button(3).went_down());
		assert_eq!(joystick.axis(1).value(), 0.5);
	}
}
