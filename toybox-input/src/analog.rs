use common::math::Vec2;


/// Maximum magnitude of raw joystick axis values.
pub const JOYSTICK_AXIS_RANGE: f32 = 32767.0;


/// Continuous control, normalised to [-1, 1].
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Axis {
	value: f32,
}

impl Axis {
	pub fn value(&self) -> f32 { self.value }

	pub fn update(&mut self, value: f32) {
		self.value = value.clamp(-1.0, 1.0);
	}

	/// Normalises a raw device value against the range the device reports.
	pub fn update_raw(&mut self, raw: i32, full_scale: f32) {
		self.update(raw as f32 / full_scale);
	}

	// Axes have no per-frame state, but are advanced alongside buttons regardless.
	pub fn advance_frame(&mut self) {}
}



/// The nine directions a hat switch can report.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum HatDirection {
	#[default]
	Centered,
	Up,
	RightUp,
	Right,
	RightDown,
	Down,
	LeftDown,
	Left,
	LeftUp,
}

impl HatDirection {
	pub const RAW_CENTERED: u8 = 0x00;
	pub const RAW_UP: u8 = 0x01;
	pub const RAW_RIGHT: u8 = 0x02;
	pub const RAW_DOWN: u8 = 0x04;
	pub const RAW_LEFT: u8 = 0x08;

	/// Decodes a raw hat bitmask. Returns None for impossible combinations, like up and down at once.
	pub fn from_raw(raw: u8) -> Option<HatDirection> {
		let direction = match raw {
			Self::RAW_CENTERED => HatDirection::Centered,
			Self::RAW_UP => HatDirection::Up,
			0x03 => HatDirection::RightUp,
			Self::RAW_RIGHT => HatDirection::Right,
			0x06 => HatDirection::RightDown,
			Self::RAW_DOWN => HatDirection::Down,
			0x0C => HatDirection::LeftDown,
			Self::RAW_LEFT => HatDirection::Left,
			0x09 => HatDirection::LeftUp,
			_ => return None,
		};

		Some(direction)
	}

	/// Like [`HatDirection::from_raw`], but reports unknown values and treats them as centered.
	pub fn from_raw_or_centered(raw: u8) -> HatDirection {
		HatDirection::from_raw(raw)
			.unwrap_or_else(|| {
				log::error!("Unknown hat direction value: {raw:#04x}");
				HatDirection::Centered
			})
	}

	pub fn to_raw(self) -> u8 {
		match self {
			HatDirection::Centered => Self::RAW_CENTERED,
			HatDirection::Up => Self::RAW_UP,
			HatDirection::RightUp => Self::RAW_RIGHT | Self::RAW_UP,
			HatDirection::Right => Self::RAW_RIGHT,
			HatDirection::RightDown => Self::RAW_RIGHT | Self::RAW_DOWN,
			HatDirection::Down => Self::RAW_DOWN,
			HatDirection::LeftDown => Self::RAW_LEFT | Self::RAW_DOWN,
			HatDirection::Left => Self::RAW_LEFT,
			HatDirection::LeftUp => Self::RAW_LEFT | Self::RAW_UP,
		}
	}

	/// Screen space direction - negative y is up.
	pub fn to_vector(self) -> Vec2 {
		let (x, y) = match self {
			HatDirection::Centered => (0.0, 0.0),
			HatDirection::Up => (0.0, -1.0),
			HatDirection::RightUp => (1.0, -1.0),
			HatDirection::Right => (1.0, 0.0),
			HatDirection::RightDown => (1.0, 1.0),
			HatDirection::Down => (0.0, 1.0),
			HatDirection::LeftDown => (-1.0, 1.0),
			HatDirection::Left => (-1.0, 0.0),
			HatDirection::LeftUp => (-1.0, -1.0),
		};

		Vec2::new(x, y)
	}
}


/// 8-way digital direction control.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Hat {
	direction: HatDirection,
}

impl Hat {
	pub fn direction(&self) -> HatDirection { self.direction }

	pub fn vector(&self) -> Vec2 {
		self.direction.to_vector()
	}

	pub fn update(&mut self, direction: HatDirection) {
		self.direction = direction;
	}

	pub fn advance_frame(&mut self) {}
}
