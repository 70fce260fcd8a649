
pub mod prelude {}

pub mod table;
pub use table::{Table, Value};

use std::path::Path;


/// Runtime representation of hierarchical key-value storage, intended for settings, command line config, etc.
#[derive(Debug, Clone, Default)]
pub struct Config {
	/// Config loaded from disk.
	base: Table,

	/// Any config overrided by CLI args.
	arguments: Table,

	/// Config set during runtime that can be either committed to base or reverted.
	preview: Table,
}

impl Config {
	#[tracing::instrument(skip_all)]
	pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
		let path = path.as_ref();

		let mut config = Self::default();

		if path.exists() {
			config.base = Table::from_file(path)?;
		} else {
			log::info!("No config found at '{}', using defaults", path.display());
		}

		config.arguments = Table::from_cli();

		log::info!("Loaded config: {config:?}");

		Ok(config)
	}

	pub fn from_tables(base: Table, arguments: Table) -> Self {
		Config {
			base,
			arguments,
			preview: Table::new(),
		}
	}

	pub fn commit(&mut self) {
		self.base.merge_from(&self.preview);
		self.arguments.remove_values_in(&self.preview);
		self.preview = Table::new();
	}

	pub fn revert(&mut self) {
		self.preview = Table::new();
	}
}

impl Config {
	pub fn get_value(&self, key: &str) -> Option<&Value> {
		if let Some(value) = self.preview.get_value(key) {
			return Some(value)
		}

		if let Some(value) = self.arguments.get_value(key) {
			return Some(value)
		}

		self.base.get_value(key)
	}

	pub fn set_value(&mut self, key: &str, value: impl Into<Value>) {
		self.preview.set_value(key, value.into());
	}

	pub fn get_bool(&self, key: &str) -> Option<bool> {
		self.get_value(key).and_then(Value::as_bool)
	}

	pub fn get_integer(&self, key: &str) -> Option<i64> {
		self.get_value(key).and_then(Value::as_integer)
	}

	pub fn get_float(&self, key: &str) -> Option<f64> {
		self.get_value(key).and_then(Value::as_float)
	}

	pub fn get_str(&self, key: &str) -> Option<&str> {
		self.get_value(key).and_then(Value::as_str)
	}
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn override_precedence() {
		let base = Table::from_toml_str("[input]\nmax_pointers = 10\ngamepad_deadzone = 0.5").unwrap();
		let arguments = Table::from_args(["input.max_pointers=4"]);

		let mut config = Config::from_tables(base, arguments);
		assert_eq!(config.get_integer("input.max_pointers"), Some(4));
		assert_eq!(config.get_float("input.gamepad_deadzone"), Some(0.5));

		config.set_value("input.gamepad_deadzone", 0.75);
		assert_eq!(config.get_float("input.gamepad_deadzone"), Some(0.75));

		config.revert();
		assert_eq!(config.get_float("input.gamepad_deadzone"), Some(0.5));

		config.set_value("input.max_pointers", Value::Integer(2));
		config.commit();
		assert_eq!(config.get_integer("input.max_pointers"), Some(2));
	}
}
