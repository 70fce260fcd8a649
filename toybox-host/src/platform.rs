use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Instant;

use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{DeviceEvent, Ime, TouchPhase, WindowEvent};
use winit::window::{CursorGrabMode, Window};

use common::math::Vec2i;

use toybox_input::{AppEvent, Event, Keymod, Platform, PointerId, TextInputRect};
#[cfg(feature="gamepad")]
use toybox_input::JoystickDevice;

use crate::held::HeldInputs;
use crate::translate;


/// [`Platform`] backed by a winit window, and gilrs for joysticks when the `gamepad` feature is enabled.
/// winit pushes events at us from the event loop, so they are queued here until the input system polls them.
pub struct WinitPlatform {
	window: Arc<Window>,
	events: VecDeque<Event>,
	start: Instant,

	modifiers: Keymod,
	cursor_position: Vec2i,
	relative_mouse_mode: bool,
	held: HeldInputs,

	/// Last normalised position of each active touch, for computing deltas.
	fingers: HashMap<u64, (f32, f32)>,

	#[cfg(feature="gamepad")]
	gamepads: Option<crate::gamepad::GamepadBackend>,
}

impl WinitPlatform {
	pub fn new(window: Arc<Window>) -> WinitPlatform {
		WinitPlatform {
			window,
			events: VecDeque::new(),
			start: Instant::now(),

			modifiers: Keymod::empty(),
			cursor_position: Vec2i::zero(),
			relative_mouse_mode: false,
			held: HeldInputs::default(),

			fingers: HashMap::new(),

			#[cfg(feature="gamepad")]
			gamepads: crate::gamepad::GamepadBackend::new()
				.inspect_err(|error| log::error!("{error}"))
				.ok(),
		}
	}

	pub fn window(&self) -> &Arc<Window> {
		&self.window
	}

	pub fn push_event(&mut self, event: Event) {
		self.events.push_back(event);
	}

	pub fn on_app_event(&mut self, event: AppEvent) {
		self.push_event(Event::App(event));
	}

	pub fn on_window_event(&mut self, event: &WindowEvent) {
		match event {
			WindowEvent::CloseRequested => self.push_event(Event::Quit),

			WindowEvent::Resized(size) => {
				self.push_event(Event::WindowResized {
					width: size.width as i32,
					height: size.height as i32,
				});
			}

			WindowEvent::Focused(false) => {
				let cursor = (self.cursor_position.x, self.cursor_position.y);
				for event in self.held.release_all(cursor) {
					self.push_event(event);
				}
			}

			WindowEvent::ModifiersChanged(modifiers) => {
				self.modifiers = translate::keymod_from_modifiers(modifiers.state());
			}

			WindowEvent::KeyboardInput { event, .. } => {
				let Some(keycode) = translate::keycode_from_key(&event.logical_key, event.location) else {
					log::trace!("Ignoring unmapped key {:?}", event.logical_key);
					return
				};

				let pressed = event.state.is_pressed();
				let keycode = if pressed {
					self.held.press_key(event.physical_key, keycode)
				} else {
					self.held.release_key(event.physical_key, keycode)
				};

				self.push_event(Event::Key {
					keycode,
					pressed,
					repeat: event.repeat,
					modifiers: self.modifiers,
				});
			}

			WindowEvent::CursorMoved { position, .. } => {
				let new_position = Vec2i::new(position.x as i32, position.y as i32);
				let previous_position = std::mem::replace(&mut self.cursor_position, new_position);

				// Relative motion comes from raw device events instead.
				if !self.relative_mouse_mode {
					self.push_event(Event::MouseMotion {
						x: new_position.x,
						y: new_position.y,
						xrel: new_position.x - previous_position.x,
						yrel: new_position.y - previous_position.y,
					});
				}
			}

			WindowEvent::MouseInput { state, button, .. } => {
				if let Some(button) = translate::mouse_button_index(*button) {
					let pressed = state.is_pressed();
					if pressed {
						self.held.press_mouse_button(button);
					} else {
						self.held.release_mouse_button(button);
					}

					self.push_event(Event::MouseButton {
						button,
						pressed,
						x: self.cursor_position.x,
						y: self.cursor_position.y,
					});
				}
			}

			WindowEvent::MouseWheel { delta, .. } => {
				let (x, y) = translate::scroll_delta(*delta);
				self.push_event(Event::MouseWheel { x, y });
			}

			WindowEvent::Touch(touch) => {
				let (x, y) = translate::normalize_touch(touch.location, self.window.inner_size());
				let (last_x, last_y) = self.fingers.get(&touch.id).copied().unwrap_or((x, y));
				let (dx, dy) = (x - last_x, y - last_y);
				let finger_id = touch.id as PointerId;

				match touch.phase {
					TouchPhase::Started => {
						self.fingers.insert(touch.id, (x, y));
						self.push_event(Event::FingerDown { finger_id, x, y, dx, dy });
					}

					TouchPhase::Moved => {
						self.fingers.insert(touch.id, (x, y));
						self.push_event(Event::FingerMotion { finger_id, x, y, dx, dy });
					}

					TouchPhase::Ended | TouchPhase::Cancelled => {
						self.fingers.remove(&touch.id);
						self.push_event(Event::FingerUp { finger_id, x, y, dx, dy });
					}
				}
			}

			WindowEvent::Ime(Ime::Preedit(text, cursor)) => {
				let (start, length) = translate::preedit_range(text, *cursor);

				self.push_event(Event::TextEditing {
					text: text.clone(),
					start,
					length,
				});
			}

			WindowEvent::Ime(Ime::Commit(text)) => {
				self.push_event(Event::TextInput { text: text.clone() });
			}

			_ => {}
		}
	}

	pub fn on_device_event(&mut self, event: &DeviceEvent) {
		if let DeviceEvent::MouseMotion { delta: (dx, dy) } = *event
			&& self.relative_mouse_mode
		{
			self.push_event(Event::MouseMotion {
				x: self.cursor_position.x,
				y: self.cursor_position.y,
				xrel: dx as i32,
				yrel: dy as i32,
			});
		}
	}
}

impl Platform for WinitPlatform {
	fn poll_event(&mut self) -> Option<Event> {
		#[cfg(feature="gamepad")]
		{
			if self.events.is_empty() && let Some(gamepads) = &mut self.gamepads {
				gamepads.pump_events(&mut self.events);
			}
		}

		self.events.pop_front()
	}

	fn ticks_ms(&self) -> u64 {
		self.start.elapsed().as_millis() as u64
	}

	#[cfg(feature="gamepad")]
	fn num_joysticks(&mut self) -> usize {
		self.gamepads.as_ref().map_or(0, |gamepads| gamepads.num_joysticks())
	}

	#[cfg(feature="gamepad")]
	fn open_joystick(&mut self, index: usize) -> Option<Box<dyn JoystickDevice>> {
		self.gamepads.as_ref()?.open_joystick(index)
	}

	fn relative_mouse_mode(&self) -> bool {
		self.relative_mouse_mode
	}

	fn set_relative_mouse_mode(&mut self, enabled: bool) {
		let result = if enabled {
			self.window.set_cursor_grab(CursorGrabMode::Locked)
				.or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined))
		} else {
			self.window.set_cursor_grab(CursorGrabMode::None)
		};

		if let Err(error) = result {
			log::warn!("Failed to set cursor grab mode: {error}");
		}

		self.window.set_cursor_visible(!enabled);
		self.relative_mouse_mode = enabled;
	}

	fn start_text_input(&mut self) {
		self.window.set_ime_allowed(true);
	}

	fn stop_text_input(&mut self) {
		self.window.set_ime_allowed(false);
	}

	fn set_text_input_rect(&mut self, rect: TextInputRect) {
		self.window.set_ime_cursor_area(
			PhysicalPosition::new(rect.x, rect.y),
			PhysicalSize::new(rect.width, rect.height),
		);
	}
}
