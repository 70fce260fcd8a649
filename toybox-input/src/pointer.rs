use common::math::Vec2i;


/// Platform identifier for a finger or mouse.
pub type PointerId = i64;

/// Id given to the mouse when it claims the primary pointer slot.
pub const MOUSE_POINTER_ID: PointerId = 0;


#[derive(Debug, Copy, Clone)]
pub struct Pointer {
	pub id: PointerId,

	/// Position in window pixels.
	pub position: Vec2i,

	/// Movement in window pixels accumulated this frame.
	pub delta: Vec2i,

	/// Whether this slot currently belongs to a finger or mouse.
	pub used: bool,
}

impl Pointer {
	fn new() -> Pointer {
		Pointer {
			id: MOUSE_POINTER_ID,
			position: Vec2i::zero(),
			delta: Vec2i::zero(),
			used: false,
		}
	}
}


/// Fixed size table of pointers.
/// The first slot is always the primary pointer - the mouse, or the first finger down -
/// which makes it easy to write code that treats mouse and touch input the same way.
#[derive(Debug, Clone)]
pub struct PointerTable {
	pointers: Vec<Pointer>,
}

impl PointerTable {
	pub fn new(max_pointers: usize) -> PointerTable {
		PointerTable {
			pointers: vec![Pointer::new(); max_pointers.max(1)],
		}
	}

	pub fn capacity(&self) -> usize {
		self.pointers.len()
	}

	pub fn get(&self, slot: usize) -> Option<&Pointer> {
		self.pointers.get(slot)
	}

	pub fn get_mut(&mut self, slot: usize) -> Option<&mut Pointer> {
		self.pointers.get_mut(slot)
	}

	pub fn primary(&self) -> &Pointer {
		&self.pointers[0]
	}

	pub fn primary_mut(&mut self) -> &mut Pointer {
		&mut self.pointers[0]
	}

	pub fn iter(&self) -> impl Iterator<Item = &Pointer> {
		self.pointers.iter()
	}

	pub fn as_slice(&self) -> &[Pointer] {
		&self.pointers
	}

	/// Find the slot that belongs to `id`, or claim the first free slot for it.
	/// Returns None only if every slot is in use.
	pub fn find_or_allocate(&mut self, id: PointerId) -> Option<usize> {
		if let Some(slot) = self.find(id) {
			return Some(slot)
		}

		let slot = self.pointers.iter().position(|pointer| !pointer.used)?;

		let pointer = &mut self.pointers[slot];
		pointer.id = id;
		pointer.used = true;

		Some(slot)
	}

	pub fn find(&self, id: PointerId) -> Option<usize> {
		self.pointers.iter()
			.position(|pointer| pointer.used && pointer.id == id)
	}

	/// Mark a slot as free for reuse. Position is kept so the last known location can still be queried.
	pub fn release(&mut self, slot: usize) {
		if let Some(pointer) = self.pointers.get_mut(slot) {
			pointer.used = false;
		}
	}

	pub fn advance_frame(&mut self) {
		for pointer in self.pointers.iter_mut() {
			pointer.delta = Vec2i::zero();
		}
	}
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn allocation_prefers_existing_slot() {
		let mut table = PointerTable::new(4);

		assert_eq!(table.find_or_allocate(100), Some(0));
		assert_eq!(table.find_or_allocate(200), Some(1));
		assert_eq!(table.find_or_allocate(100), Some(0));
		assert_eq!(table.find(200), Some(1));
		assert_eq!(table.find(300), None);
	}

	#[test]
	fn released_slots_are_reused() {
		let mut table = PointerTable::new(4);

		let a = table.find_or_allocate(1).unwrap();
		let b = table.find_or_allocate(2).unwrap();
		assert_eq!((a, b), (0, 1));

		table.release(a);
		assert_eq!(table.find(1), None);

		// First free slot is the primary slot again
		assert_eq!(table.find_or_allocate(3), Some(0));
		assert_eq!(table.get(0).unwrap().id, 3);
	}

	#[test]
	fn exhaustion() {
		let mut table = PointerTable::new(2);
		assert!(table.find_or_allocate(1).is_some());
		assert!(table.find_or_allocate(2).is_some());
		assert_eq!(table.find_or_allocate(3), None);

		// Existing ids still resolve when full
		assert_eq!(table.find_or_allocate(2), Some(1));
	}

	#[test]
	fn deltas_reset_each_frame() {
		let mut table = PointerTable::new(2);
		table.primary_mut().delta += Vec2i::new(3, -4);
		table.primary_mut().position = Vec2i::new(10, 10);

		table.advance_frame();
		assert_eq!(table.primary().delta.x, 0);
		assert_eq!(table.primary().delta.y, 0);
		assert_eq!(table.primary().position.x, 10);
	}
}
