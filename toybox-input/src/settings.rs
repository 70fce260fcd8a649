use serde::{Serialize, Deserialize};

use toybox_cfg::Config;

use crate::bridge::DEFAULT_MAX_EVENTS_PER_FRAME;
use crate::gamepad::DEFAULT_GAMEPAD_DEADZONE;


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// Size of the pointer table. Must cover the most fingers the platform can report at once.
	pub max_pointers: usize,

	pub gamepad_deadzone: f32,

	/// Capacity of the cross-thread gamepad event queue. Events past this within a frame are dropped.
	pub gamepad_events_per_frame: usize,

	/// Whether finger events drive the pointer table. Otherwise only the mouse does.
	pub touch_pointers: bool,

	/// Log frame delta time once a second.
	pub log_frame_rate: bool,
}

impl Default for Settings {
	fn default() -> Settings {
		Settings {
			max_pointers: 10,
			gamepad_deadzone: DEFAULT_GAMEPAD_DEADZONE,
			gamepad_events_per_frame: DEFAULT_MAX_EVENTS_PER_FRAME,
			touch_pointers: cfg!(any(target_os = "android", target_os = "ios")),
			log_frame_rate: false,
		}
	}
}

impl Settings {
	/// Read settings from the `input` section of `config`, falling back to defaults for anything missing.
	pub fn from_config(config: &Config) -> Settings {
		let mut settings = Settings::default();

		if let Some(max_pointers) = config.get_integer("input.max_pointers") {
			match usize::try_from(max_pointers) {
				Ok(max_pointers) if max_pointers > 0 => settings.max_pointers = max_pointers,
				_ => log::warn!("Ignoring invalid input.max_pointers: {max_pointers}"),
			}
		}

		if let Some(deadzone) = config.get_float("input.gamepad_deadzone") {
			settings.gamepad_deadzone = (deadzone as f32).clamp(0.0, 1.0);
		}

		if let Some(capacity) = config.get_integer("input.gamepad_events_per_frame") {
			match usize::try_from(capacity) {
				Ok(capacity) if capacity > 0 => settings.gamepad_events_per_frame = capacity,
				_ => log::warn!("Ignoring invalid input.gamepad_events_per_frame: {capacity}"),
			}
		}

		if let Some(touch_pointers) = config.get_bool("input.touch_pointers") {
			settings.touch_pointers = touch_pointers;
		}

		if let Some(log_frame_rate) = config.get_bool("input.log_frame_rate") {
			settings.log_frame_rate = log_frame_rate;
		}

		settings
	}
}



#[cfg(test)]
mod test {
	use super::*;
	use toybox_cfg::Table;

	#[test]
	fn read_from_config() {
		let base = Table::from_toml_str(r#"
			[input]
			max_pointers = 4
			gamepad_deadzone = 0.25
			touch_pointers = true
		"#).unwrap();

		let arguments = Table::from_args(["input.log_frame_rate=true", "input.gamepad_events_per_frame=-3"]);

		let settings = Settings::from_config(&Config::from_tables(base, arguments));
		assert_eq!(settings.max_pointers, 4);
		assert_eq!(settings.gamepad_deadzone, 0.25);
		assert!(settings.touch_pointers);
		assert!(settings.log_frame_rate);
		assert_eq!(settings.gamepad_events_per_frame, DEFAULT_MAX_EVENTS_PER_FRAME);
	}

	#[test]
	fn defaults_for_empty_config() {
		let settings = Settings::from_config(&Config::default());
		assert_eq!(settings, Settings::default());
	}
}
