use std::collections::HashMap;
use std::path::Path;


#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
	data: HashMap<String, Value>,
}


impl Table {
	pub fn new() -> Table {
		Table::default()
	}

	pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Table> {
		use anyhow::Context;

		let path = path.as_ref();
		let data = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read config file '{}'", path.display()))?;

		Table::from_toml_str(&data)
			.with_context(|| format!("Failed to parse config file '{}'", path.display()))
	}

	pub fn from_toml_str(data: &str) -> anyhow::Result<Table> {
		let raw: toml::Table = toml::from_str(data)?;
		Ok(Table::from_toml(&raw))
	}

	/// Parses `key=value` pairs, where keys may be dotted paths into subtables.
	/// Arguments without an '=' are treated as boolean flags set to true.
	pub fn from_args<I, S>(args: I) -> Table
		where I: IntoIterator<Item = S>
			, S: AsRef<str>
	{
		let mut table = Table::new();

		for arg in args {
			let arg = arg.as_ref().trim_start_matches('-');
			if arg.is_empty() {
				continue
			}

			match arg.split_once('=') {
				Some((key, value)) => table.set_value(key, Value::parse_argument(value)),
				None => table.set_value(arg, Value::Bool(true)),
			}
		}

		table
	}

	pub fn from_cli() -> Table {
		// Skip executable path
		Table::from_args(std::env::args().skip(1))
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	/// Copy or replace values present in `other`
	pub fn merge_from(&mut self, other: &Table) {
		for (key, value) in other.data.iter() {
			match (self.data.get_mut(key), value) {
				(Some(Value::Table(ours)), Value::Table(theirs)) => ours.merge_from(theirs),
				_ => {
					self.data.insert(key.clone(), value.clone());
				}
			}
		}
	}

	/// Recursively remove values from this table that are present in `other`
	pub fn remove_values_in(&mut self, other: &Table) {
		for (key, value) in other.data.iter() {
			let Some(ours) = self.data.get_mut(key) else {
				continue
			};

			match (ours, value) {
				(Value::Table(ours), Value::Table(theirs)) => {
					ours.remove_values_in(theirs);
					if ours.is_empty() {
						self.data.remove(key);
					}
				}

				_ => {
					self.data.remove(key);
				}
			}
		}
	}

	pub fn get_value(&self, key: &str) -> Option<&Value> {
		if let Some((key, tail)) = key.split_once('.') {
			let subtable = self.data.get(key)?
				.as_table()?;

			subtable.get_value(tail)
		} else {
			self.data.get(key)
		}
	}

	pub fn set_value(&mut self, key: &str, value: Value) {
		if let Some((key, tail)) = key.split_once('.') {
			let entry = self.data.entry(key.into())
				.or_insert(Value::Table(Default::default()));

			// Scalars are replaced by tables when a dotted key passes through them.
			if entry.as_table().is_none() {
				*entry = Value::Table(Default::default());
			}

			if let Some(subtable) = entry.as_table_mut() {
				subtable.set_value(tail, value);
			}

		} else {
			self.data.insert(key.into(), value);
		}
	}

	fn from_toml(raw: &toml::Table) -> Table {
		let mut table = Table::new();

		for (key, value) in raw.iter() {
			let value = match value {
				toml::Value::String(string) => Value::String(string.clone()),
				toml::Value::Integer(i) => Value::Integer(*i),
				toml::Value::Float(f) => Value::Float(*f),
				toml::Value::Boolean(b) => Value::Bool(*b),
				toml::Value::Table(subtable) => Value::Table(Table::from_toml(subtable)),
				other => {
					log::warn!("Ignoring unsupported config value '{key}': {other}");
					continue
				}
			};

			table.data.insert(key.clone(), value);
		}

		table
	}
}




#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	String(String),
	Table(Table),
	Bool(bool),
	Integer(i64),
	Float(f64),
}

impl Value {
	fn parse_argument(s: &str) -> Value {
		if let Ok(b) = s.parse::<bool>() {
			Value::Bool(b)
		} else if let Ok(i) = s.parse::<i64>() {
			Value::Integer(i)
		} else if let Ok(f) = s.parse::<f64>() {
			Value::Float(f)
		} else {
			Value::String(s.to_owned())
		}
	}

	pub fn as_table(&self) -> Option<&Table> {
		match self {
			Value::Table(tbl) => Some(tbl),
			_ => None
		}
	}

	pub fn as_table_mut(&mut self) -> Option<&mut Table> {
		match self {
			Value::Table(tbl) => Some(tbl),
			_ => None
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match *self {
			Value::Bool(b) => Some(b),
			_ => None
		}
	}

	pub fn as_integer(&self) -> Option<i64> {
		match *self {
			Value::Integer(i) => Some(i),
			_ => None
		}
	}

	/// Integers are widened, since toml and the command line don't distinguish `1` from `1.0`.
	pub fn as_float(&self) -> Option<f64> {
		match *self {
			Value::Float(f) => Some(f),
			Value::Integer(i) => Some(i as f64),
			_ => None
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(s) => Some(s),
			_ => None
		}
	}
}

impl From<bool> for Value {
	fn from(b: bool) -> Value { Value::Bool(b) }
}

impl From<i64> for Value {
	fn from(i: i64) -> Value { Value::Integer(i) }
}

impl From<f64> for Value {
	fn from(f: f64) -> Value { Value::Float(f) }
}

impl From<&str> for Value {
	fn from(s: &str) -> Value { Value::String(s.to_owned()) }
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn parse_toml() {
		let table = Table::from_toml_str(r#"
			name = "test"
			[input]
			max_pointers = 4
			gamepad_deadzone = 0.25
			touch_pointers = true
		"#).unwrap();

		assert_eq!(table.get_value("name").and_then(Value::as_str), Some("test"));
		assert_eq!(table.get_value("input.max_pointers").and_then(Value::as_integer), Some(4));
		assert_eq!(table.get_value("input.gamepad_deadzone").and_then(Value::as_float), Some(0.25));
		assert_eq!(table.get_value("input.touch_pointers").and_then(Value::as_bool), Some(true));
		assert!(table.get_value("input.missing").is_none());
		assert!(table.get_value("name.nested").is_none());
	}

	#[test]
	fn parse_args() {
		let table = Table::from_args(["--input.max_pointers=3", "fullscreen", "input.deadzone=0.1", "title=hello"]);

		assert_eq!(table.get_value("input.max_pointers"), Some(&Value::Integer(3)));
		assert_eq!(table.get_value("input.deadzone"), Some(&Value::Float(0.1)));
		assert_eq!(table.get_value("fullscreen"), Some(&Value::Bool(true)));
		assert_eq!(table.get_value("title"), Some(&Value::from("hello")));
	}

	#[test]
	fn merge_and_remove() {
		let mut base = Table::new();
		base.set_value("input.max_pointers", Value::Integer(10));
		base.set_value("input.log_frame_rate", false.into());

		let mut overrides = Table::new();
		overrides.set_value("input.max_pointers", Value::Integer(2));

		base.merge_from(&overrides);
		assert_eq!(base.get_value("input.max_pointers"), Some(&Value::Integer(2)));
		assert_eq!(base.get_value("input.log_frame_rate"), Some(&Value::Bool(false)));

		base.remove_values_in(&overrides);
		assert!(base.get_value("input.max_pointers").is_none());
		assert_eq!(base.get_value("input.log_frame_rate"), Some(&Value::Bool(false)));

		let snapshot = base.clone();
		base.remove_values_in(&snapshot);
		assert!(base.is_empty());
	}
}
