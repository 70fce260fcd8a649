//! Per-frame input state.
//! [`System`] polls a [`Platform`] once per frame and folds everything it receives into
//! edge triggered [`Button`]s, analog [`Axis`]/[`Hat`] controls, a [`PointerTable`] and
//! a text input log, which game logic can then query until the next [`System::advance_frame`].

use std::collections::HashMap;

use common::math::Vec2i;

pub mod analog;
pub mod bridge;
pub mod button;
pub mod event;
pub mod gamepad;
pub mod head_tracker;
pub mod joystick;
pub mod keys;
pub mod platform;
pub mod pointer;
pub mod settings;
pub mod testing;
pub mod text;
pub mod timing;

pub mod prelude {
	pub use super::{ButtonId, GamepadButton, HatDirection, System};
	pub use super::keys;
}

pub use analog::{Axis, Hat, HatDirection, JOYSTICK_AXIS_RANGE};
pub use bridge::{GamepadAction, GamepadEvent, GamepadEventQueue, GamepadEventSender};
pub use button::{Button, ButtonId};
pub use event::{AppEvent, Event};
pub use gamepad::{Gamepad, GamepadButton, GamepadId};
pub use head_tracker::{EyeTracker, EyeTransform, HeadTracker, HeadTriggerHandle};
pub use joystick::{Joystick, JoystickDevice, JoystickId};
pub use keys::{Keycode, Keymod};
pub use platform::Platform;
pub use pointer::{Pointer, PointerId, PointerTable};
pub use settings::Settings;
pub use text::{TextInputEvent, TextInputEventKind, TextInputRect};
pub use timing::FrameTimer;


pub type AppEventCallback = Box<dyn FnMut(AppEvent)>;


pub struct System<P: Platform> {
	platform: P,
	settings: Settings,

	/// Keyboard and pointer buttons. Never shrinks - keycodes and pointer indices are a small, bounded space.
	buttons: HashMap<ButtonId, Button>,

	/// Every joystick ever seen. Entries outlive disconnects so logical indices stay stable.
	joysticks: HashMap<JoystickId, Joystick>,

	gamepads: HashMap<GamepadId, Gamepad>,
	gamepad_events: GamepadEventQueue,

	pointers: PointerTable,
	mousewheel_delta: Vec2i,

	timer: FrameTimer,

	exit_requested: bool,
	minimized: bool,
	minimized_frame: u64,

	app_event_callbacks: Vec<AppEventCallback>,

	record_text_input: bool,
	text_input_events: Vec<TextInputEvent>,

	head_tracker: Option<HeadTracker>,
}


impl<P: Platform> System<P> {
	/// Establishes the clock baseline and opens any joysticks that are already connected.
	#[tracing::instrument(skip_all, name="input::System::new")]
	pub fn new(platform: P, settings: Settings) -> System<P> {
		let timer = FrameTimer::new(platform.ticks_ms());

		let mut system = System {
			platform,

			buttons: HashMap::new(),
			joysticks: HashMap::new(),

			gamepads: HashMap::new(),
			gamepad_events: GamepadEventQueue::new(settings.gamepad_events_per_frame),

			pointers: PointerTable::new(settings.max_pointers),
			mousewheel_delta: Vec2i::zero(),

			timer,

			exit_requested: false,
			minimized: false,
			minimized_frame: 0,

			app_event_callbacks: Vec::new(),

			record_text_input: false,
			text_input_events: Vec::new(),

			head_tracker: None,

			settings,
		};

		system.update_connected_joysticks();
		system
	}

	/// Register a callback for app lifecycle events.
	/// Callbacks are invoked in registration order, during [`System::advance_frame`].
	pub fn add_app_event_callback(&mut self, callback: impl FnMut(AppEvent) + 'static) {
		self.app_event_callbacks.push(Box::new(callback));
	}

	/// Handle for delivering gamepad events from other threads.
	pub fn gamepad_event_sender(&self) -> GamepadEventSender {
		self.gamepad_events.sender()
	}

	/// Enable head mounted display support. The returned handle can report trigger presses from any thread.
	pub fn enable_head_tracking(&mut self, tracker: Box<dyn EyeTracker>) -> HeadTriggerHandle {
		let head_tracker = HeadTracker::new(tracker);
		let handle = head_tracker.trigger_handle();
		self.head_tracker = Some(head_tracker);
		handle
	}

	/// Close all joystick handles. Logical joysticks and their state are kept.
	pub fn shutdown(&mut self) {
		for joystick in self.joysticks.values_mut() {
			joystick.set_device(None);
		}
	}
}


/// Queries.
impl<P: Platform> System<P> {
	pub fn platform(&self) -> &P { &self.platform }
	pub fn platform_mut(&mut self) -> &mut P { &mut self.platform }

	pub fn settings(&self) -> &Settings { &self.settings }

	/// State of a keyboard key or pointer button. Buttons never seen before are up.
	pub fn button(&self, id: impl Into<ButtonId>) -> Button {
		self.buttons.get(&id.into()).copied().unwrap_or_default()
	}

	/// Get or create the button for `id`.
	pub fn button_mut(&mut self, id: impl Into<ButtonId>) -> &mut Button {
		self.buttons.entry(id.into()).or_default()
	}

	pub fn pointer_button(&self, pointer: usize) -> Button {
		self.button(ButtonId::Pointer(pointer))
	}

	pub fn pointer_button_mut(&mut self, pointer: usize) -> &mut Button {
		self.button_mut(ButtonId::Pointer(pointer))
	}

	/// Joysticks are only created by device enumeration, never by lookup.
	pub fn joystick(&self, id: JoystickId) -> Option<&Joystick> {
		self.joysticks.get(&id)
	}

	pub fn joysticks(&self) -> impl Iterator<Item = (JoystickId, &Joystick)> {
		self.joysticks.iter().map(|(&id, joystick)| (id, joystick))
	}

	pub fn gamepad(&self, id: GamepadId) -> Option<&Gamepad> {
		self.gamepads.get(&id)
	}

	pub fn gamepads(&self) -> impl Iterator<Item = &Gamepad> {
		self.gamepads.values()
	}

	pub fn pointers(&self) -> &[Pointer] {
		self.pointers.as_slice()
	}

	pub fn pointer(&self, slot: usize) -> Option<&Pointer> {
		self.pointers.get(slot)
	}

	pub fn mousewheel_delta(&self) -> Vec2i {
		self.mousewheel_delta
	}

	/// Seconds between the start of the previous frame and the start of this one.
	pub fn delta_time(&self) -> f32 {
		self.timer.delta_time()
	}

	/// Seconds since the system was created.
	pub fn time(&self) -> f32 {
		self.timer.time()
	}

	pub fn frames(&self) -> u64 {
		self.timer.frames()
	}

	/// Set once the platform asks the application to quit. Never cleared.
	pub fn exit_requested(&self) -> bool {
		self.exit_requested
	}

	pub fn minimized(&self) -> bool {
		self.minimized
	}

	/// The frame on which `minimized` last changed.
	pub fn minimized_frame(&self) -> u64 {
		self.minimized_frame
	}

	pub fn head_tracker(&self) -> Option<&HeadTracker> {
		self.head_tracker.as_ref()
	}

	pub fn head_tracker_mut(&mut self) -> Option<&mut HeadTracker> {
		self.head_tracker.as_mut()
	}
}


/// Text input and mouse modes.
impl<P: Platform> System<P> {
	/// While recording, key and text events are appended to the text input log, and the log is only
	/// cleared by [`System::take_text_input_events`]. Otherwise it is cleared every frame.
	pub fn record_text_input(&mut self, record: bool) {
		self.record_text_input = record;
	}

	pub fn is_recording_text_input(&self) -> bool {
		self.record_text_input
	}

	pub fn text_input_events(&self) -> &[TextInputEvent] {
		&self.text_input_events
	}

	pub fn take_text_input_events(&mut self) -> Vec<TextInputEvent> {
		std::mem::take(&mut self.text_input_events)
	}

	/// Ask the platform to start delivering IME events.
	pub fn start_text_input(&mut self) {
		self.platform.start_text_input();
	}

	pub fn stop_text_input(&mut self) {
		self.platform.stop_text_input();
	}

	/// Where IME candidate windows should be placed.
	pub fn set_text_input_rect(&mut self, rect: TextInputRect) {
		self.platform.set_text_input_rect(rect);
	}

	pub fn relative_mouse_mode(&self) -> bool {
		self.platform.relative_mouse_mode()
	}

	/// Capture the mouse and only report motion deltas.
	pub fn set_relative_mouse_mode(&mut self, enabled: bool) {
		self.platform.set_relative_mouse_mode(enabled);
	}
}


/// Frame processing.
impl<P: Platform> System<P> {
	/// Clear last frames transitions, and process every event the platform has queued since.
	/// `window_size` is only written if the window was resized.
	#[tracing::instrument(skip_all, name="input::System::advance_frame")]
	pub fn advance_frame(&mut self, window_size: &mut Vec2i) {
		self.timer.advance(self.platform.ticks_ms());

		if self.settings.log_frame_rate && self.timer.should_log_frame_rate() {
			log::info!("DeltaTime: {}", self.timer.delta_time());
		}

		self.reset_frame_state();
		self.handle_gamepad_events();

		if !self.record_text_input {
			self.text_input_events.clear();
		}

		while let Some(event) = self.platform.poll_event() {
			self.handle_event(event, window_size);
		}

		// Mouse presses count as head mount triggers, so this has to come after event handling.
		if let Some(head_tracker) = &mut self.head_tracker {
			head_tracker.advance_frame();
		}
	}

	fn reset_frame_state(&mut self) {
		self.mousewheel_delta = Vec2i::zero();

		self.buttons.values_mut().for_each(Button::advance_frame);
		self.pointers.advance_frame();
		self.joysticks.values_mut().for_each(Joystick::advance_frame);
		self.gamepads.values_mut().for_each(Gamepad::advance_frame);
	}

	fn handle_event(&mut self, event: Event, window_size: &mut Vec2i) {
		match event {
			Event::Quit => self.exit_requested = true,

			Event::App(app_event) => self.handle_app_event(app_event),

			Event::Key { keycode, pressed, repeat, modifiers } => {
				self.button_mut(keycode).update(pressed);

				if self.record_text_input {
					self.text_input_events.push(TextInputEvent::key(pressed, repeat, keycode, modifiers));
				}
			}

			// Desktop touchpads send these as well as mouse events - only listen to them when asked to.
			Event::FingerDown{..} | Event::FingerMotion{..} | Event::FingerUp{..} if !self.settings.touch_pointers => {}

			Event::FingerDown { finger_id, x, y, dx, dy } => {
				if let Some(slot) = self.update_drag_position(finger_id, [x, y], [dx, dy], *window_size) {
					self.pointer_button_mut(slot).update(true);
				}
			}

			Event::FingerMotion { finger_id, x, y, dx, dy } => {
				self.update_drag_position(finger_id, [x, y], [dx, dy], *window_size);
			}

			Event::FingerUp { finger_id, x, y, .. } => {
				let Some(slot) = self.pointers.find(finger_id) else {
					log::trace!("Finger {finger_id} released without being pressed");
					return
				};

				if let Some(pointer) = self.pointers.get_mut(slot) {
					pointer.position = to_window_space([x, y], *window_size);
				}

				self.pointers.release(slot);
				self.pointer_button_mut(slot).update(false);
			}

			Event::MouseButton { button, pressed, x, y } => {
				match button.checked_sub(1) {
					Some(index) => self.pointer_button_mut(usize::from(index)).update(pressed),
					None => log::warn!("Mouse button event with invalid button 0"),
				}

				let primary = self.pointers.primary_mut();
				primary.position = Vec2i::new(x, y);
				primary.used = true;

				if pressed && let Some(head_tracker) = &mut self.head_tracker {
					head_tracker.on_trigger();
				}
			}

			Event::MouseMotion { x, y, xrel, yrel } => {
				let primary = self.pointers.primary_mut();
				primary.delta += Vec2i::new(xrel, yrel);
				primary.position = Vec2i::new(x, y);
			}

			Event::MouseWheel { x, y } => {
				self.mousewheel_delta += Vec2i::new(x, y);
			}

			Event::WindowResized { width, height } => {
				*window_size = Vec2i::new(width, height);
			}

			event @ (Event::JoystickAxis{..} | Event::JoystickButton{..} | Event::JoystickHat{..}
				| Event::JoystickAdded{..} | Event::JoystickRemoved{..}) =>
			{
				self.handle_joystick_event(event);
			}

			Event::TextEditing { text, start, length } => {
				if self.record_text_input {
					self.text_input_events.push(TextInputEvent::edit(text, start, length));
				}
			}

			Event::TextInput { text } => {
				if self.record_text_input {
					self.text_input_events.push(TextInputEvent::text(text));
				}
			}

			Event::Unknown { kind } => {
				log::info!("Unknown platform event: {kind:#x}");
			}
		}
	}

	fn handle_app_event(&mut self, event: AppEvent) {
		match event {
			AppEvent::WillEnterBackground => {
				self.minimized = true;
				self.minimized_frame = self.timer.frames();
			}

			AppEvent::DidEnterForeground => {
				self.minimized = false;
				self.minimized_frame = self.timer.frames();
			}

			_ => {}
		}

		for callback in self.app_event_callbacks.iter_mut() {
			callback(event);
		}
	}

	/// Resolve the pointer slot for a finger and move it. Returns the slot, if there was room for it.
	fn update_drag_position(&mut self, finger_id: PointerId, position: [f32; 2], delta: [f32; 2], window_size: Vec2i) -> Option<usize> {
		let Some(slot) = self.pointers.find_or_allocate(finger_id) else {
			log::error!("Pointer table full ({} slots) - dropping finger {finger_id}", self.pointers.capacity());
			debug_assert!(false, "Pointer table full");
			return None
		};

		let pointer = self.pointers.get_mut(slot)?;
		pointer.position = to_window_space(position, window_size);
		pointer.delta += to_window_space(delta, window_size);

		Some(slot)
	}

	fn handle_joystick_event(&mut self, event: Event) {
		match event {
			Event::JoystickAdded{..} | Event::JoystickRemoved{..} => self.update_connected_joysticks(),

			Event::JoystickAxis { joystick_id, axis, value } => {
				if let Some(joystick) = self.joystick_for_event(joystick_id) {
					joystick.axis_mut(axis).update_raw(i32::from(value), JOYSTICK_AXIS_RANGE);
				}
			}

			Event::JoystickButton { joystick_id, button, pressed } => {
				if let Some(joystick) = self.joystick_for_event(joystick_id) {
					joystick.button_mut(button).update(pressed);
				}
			}

			Event::JoystickHat { joystick_id, hat, value } => {
				let direction = HatDirection::from_raw_or_centered(value);

				if let Some(joystick) = self.joystick_for_event(joystick_id) {
					joystick.hat_mut(hat).update(direction);
				}
			}

			_ => {}
		}
	}

	fn joystick_for_event(&mut self, joystick_id: JoystickId) -> Option<&mut Joystick> {
		let joystick = self.joysticks.get_mut(&joystick_id);
		if joystick.is_none() {
			log::warn!("Event for unknown joystick {joystick_id}");
		}

		joystick
	}

	/// Rebind every logical joystick to its current device handle.
	/// Joysticks that are no longer connected are left without one.
	#[tracing::instrument(skip_all)]
	fn update_connected_joysticks(&mut self) {
		self.shutdown();

		for index in 0..self.platform.num_joysticks() {
			let Some(device) = self.platform.open_joystick(index) else {
				log::warn!("Failed to open joystick {index}");
				continue
			};

			let joystick_id = device.instance_id();

			log::info!("Joystick connected: '{}' ({joystick_id}) - {} buttons, {} axes, {} hats",
				device.name(), device.num_buttons(), device.num_axes(), device.num_hats());

			self.joysticks.entry(joystick_id)
				.or_default()
				.set_device(Some(device));
		}
	}

	/// Process events queued by [`GamepadEventSender`]s since last frame.
	fn handle_gamepad_events(&mut self) {
		let deadzone = self.settings.gamepad_deadzone;

		for GamepadEvent { device_id, action } in self.gamepad_events.drain() {
			let gamepad = self.gamepads.entry(device_id)
				.or_insert_with(|| Gamepad::new(device_id));

			match action {
				GamepadAction::KeyDown(keycode) | GamepadAction::KeyUp(keycode) => {
					let Some(button) = GamepadButton::from_android_keycode(keycode) else {
						log::trace!("Ignoring unmapped gamepad keycode {keycode}");
						continue
					};

					let pressed = matches!(action, GamepadAction::KeyDown(_));
					gamepad.button_mut(button).update(pressed);
				}

				GamepadAction::Motion { x, y } => gamepad.update_from_motion(x, y, deadzone),
			}
		}
	}
}

impl<P: Platform> Drop for System<P> {
	fn drop(&mut self) {
		// Handles must be closed before the platform that opened them goes away.
		self.shutdown();
	}
}


fn to_window_space([x, y]: [f32; 2], window_size: Vec2i) -> Vec2i {
	Vec2i::new(
		(x * window_size.x as f32) as i32,
		(y * window_size.y as f32) as i32,
	)
}
