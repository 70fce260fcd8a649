//! Gamepad events delivered from outside the simulation thread.
//! On android these arrive through a JNI callback on the UI thread; the callback gets a
//! [`GamepadEventSender`] and the [`System`](crate::System) drains the queue once per frame.

use std::sync::mpsc::{self, SyncSender, Receiver, TrySendError};

use crate::gamepad::GamepadId;


pub const DEFAULT_MAX_EVENTS_PER_FRAME: usize = 100;


pub mod android_action {
	pub const KEY_DOWN: i32 = 0;
	pub const KEY_UP: i32 = 1;
	pub const MOTION_MOVE: i32 = 2;
}


#[derive(Debug, Copy, Clone, PartialEq)]
pub enum GamepadAction {
	KeyDown(i32),
	KeyUp(i32),
	Motion { x: f32, y: f32 },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GamepadEvent {
	pub device_id: GamepadId,
	pub action: GamepadAction,
}

impl GamepadEvent {
	/// Decodes the raw values the android activity hands over.
	/// Returns None for actions that aren't key or motion events.
	pub fn from_raw(device_id: GamepadId, event_code: i32, control_code: i32, x: f32, y: f32) -> Option<GamepadEvent> {
		let action = match event_code {
			android_action::KEY_DOWN => GamepadAction::KeyDown(control_code),
			android_action::KEY_UP => GamepadAction::KeyUp(control_code),
			android_action::MOTION_MOVE => GamepadAction::Motion { x, y },
			_ => return None,
		};

		Some(GamepadEvent { device_id, action })
	}
}


/// Producer side of the gamepad event queue. Can be cloned and sent to any thread.
#[derive(Debug, Clone)]
pub struct GamepadEventSender {
	sender: SyncSender<GamepadEvent>,
}

impl GamepadEventSender {
	/// Queue an event for the next frame. Returns false if the queue is full and the event was dropped.
	pub fn send(&self, event: GamepadEvent) -> bool {
		match self.sender.try_send(event) {
			Ok(()) => true,
			Err(TrySendError::Full(_)) => false,

			// The input system is gone - nothing left to deliver to.
			Err(TrySendError::Disconnected(_)) => false,
		}
	}

	pub fn send_raw(&self, device_id: GamepadId, event_code: i32, control_code: i32, x: f32, y: f32) -> bool {
		match GamepadEvent::from_raw(device_id, event_code, control_code, x, y) {
			Some(event) => self.send(event),
			None => {
				log::trace!("Ignoring gamepad event with unknown action {event_code}");
				false
			}
		}
	}
}


/// Consumer side. Owned by the input system and only ever drained from the simulation thread.
#[derive(Debug)]
pub struct GamepadEventQueue {
	sender: SyncSender<GamepadEvent>,
	receiver: Receiver<GamepadEvent>,
	capacity: usize,
}

impl GamepadEventQueue {
	pub fn new(capacity: usize) -> GamepadEventQueue {
		let capacity = capacity.max(1);
		let (sender, receiver) = mpsc::sync_channel(capacity);

		GamepadEventQueue {
			sender,
			receiver,
			capacity,
		}
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	pub fn sender(&self) -> GamepadEventSender {
		GamepadEventSender {
			sender: self.sender.clone(),
		}
	}

	/// Takes at most `capacity` events, so per-frame work stays bounded even while producers keep pushing.
	pub fn drain(&self) -> impl Iterator<Item = GamepadEvent> + '_ {
		self.receiver.try_iter().take(self.capacity)
	}
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn decode_raw_events() {
		assert_eq!(
			GamepadEvent::from_raw(3, android_action::KEY_DOWN, 96, 0.0, 0.0),
			Some(GamepadEvent { device_id: 3, action: GamepadAction::KeyDown(96) })
		);

		assert_eq!(
			GamepadEvent::from_raw(3, android_action::MOTION_MOVE, 0, -0.5, 1.0),
			Some(GamepadEvent { device_id: 3, action: GamepadAction::Motion { x: -0.5, y: 1.0 } })
		);

		assert_eq!(GamepadEvent::from_raw(3, 42, 0, 0.0, 0.0), None);
	}

	#[test]
	fn overflow_drops_newest() {
		let queue = GamepadEventQueue::new(4);
		let sender = queue.sender();

		let accepted = (0..9)
			.filter(|&i| sender.send(GamepadEvent { device_id: i, action: GamepadAction::KeyDown(96) }))
			.count();

		assert_eq!(accepted, 4);

		let drained: Vec<_> = queue.drain().map(|event| event.device_id).collect();
		assert_eq!(drained, [0, 1, 2, 3]);

		assert_eq!(queue.drain().count(), 0);
	}

	#[test]
	fn send_from_other_thread() {
		let queue = GamepadEventQueue::new(8);
		let sender = queue.sender();

		std::thread::spawn(move || {
			for _ in 0..3 {
				sender.send_raw(1, android_action::KEY_UP, 97, 0.0, 0.0);
			}
		}).join().unwrap();

		assert_eq!(queue.drain().count(), 3);
	}
}
