use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use crate::object::value::ObjectId;

/// Set of composite identities currently on the active render path.
///
/// One tracker is created per top-level render call and shared by reference
/// through the whole recursive call tree. Membership uses reference identity,
/// never value equality: only a true ancestor on the current path counts as a
/// cycle, while a sibling reference to the same object is rendered in full.
/// Internal access is serialized so a tracker stays consistent even if a
/// caller breaks the one-tracker-per-call discipline across threads.
#[derive(Debug, Default)]
pub struct CycleTracker {
	in_progress: Mutex<HashSet<ObjectId>>,
}

impl CycleTracker {
	/// Create an empty tracker for one top-level render call.
	pub fn new() -> Self {
		Self::default()
	}

	/// Whether an identity is currently being rendered on this path.
	pub fn contains(&self, id: ObjectId) -> bool {
		self.lock().contains(&id)
	}

	/// Mark an identity as in progress.
	pub fn add(&self, id: ObjectId) {
		self.lock().insert(id);
	}

	/// Clear an identity after its rendering finished.
	pub fn remove(&self, id: ObjectId) {
		self.lock().remove(&id);
	}

	/// Mark an identity and return a guard that clears it on drop, so the
	/// tracked set is restored on every exit path including early errors.
	pub(crate) fn enter(&self, id: ObjectId) -> CycleGuard<'_> {
		self.add(id);
		CycleGuard { tracker: self, id }
	}

	fn lock(&self) -> MutexGuard<'_, HashSet<ObjectId>> {
		match self.in_progress.lock() {
			Ok(guard) => guard,
			Err(poisoned) => poisoned.into_inner(),
		}
	}
}

/// Scoped membership in a [`CycleTracker`].
pub(crate) struct CycleGuard<'a> {
	tracker: &'a CycleTracker,
	id: ObjectId,
}

impl Drop for CycleGuard<'_> {
	fn drop(&mut self) {
		self.tracker.remove(self.id);
	}
}

#[cfg(test)]
mod tests {
	use super::CycleTracker;
	use crate::object::schema::Registry;
	use crate::object::value::{Object, identity};

	#[test]
	fn add_contains_remove_round_trip() {
		let mut registry = Registry::new();
		let node = registry.register_class("demo.Node", None, &[], Vec::new()).expect("register");
		let object = Object::new(&registry, node).expect("instantiate");
		let id = identity(&object);

		let tracker = CycleTracker::new();
		assert!(!tracker.contains(id));
		tracker.add(id);
		assert!(tracker.contains(id));
		tracker.remove(id);
		assert!(!tracker.contains(id));
	}

	#[test]
	fn guard_clears_membership_on_drop() {
		let mut registry = Registry::new();
		let node = registry.register_class("demo.Node", None, &[], Vec::new()).expect("register");
		let object = Object::new(&registry, node).expect("instantiate");
		let id = identity(&object);

		let tracker = CycleTracker::new();
		{
			let _guard = tracker.enter(id);
			assert!(tracker.contains(id));
		}
		assert!(!tracker.contains(id));
	}
}
