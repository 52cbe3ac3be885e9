use std::sync::Arc;

use arc_swap::ArcSwapOption;

/// A value that can be read and replaced from any thread without locking.
///
/// Starts out empty, so it can back a `static`.
pub struct AtomicValue<T> {
	inner: ArcSwapOption<T>,
}

impl<T> AtomicValue<T> {
	/// Creates an empty cell.
	pub const fn new() -> Self {
		Self {
			inner: ArcSwapOption::const_empty(),
		}
	}

	/// Returns the current value, if any.
	pub fn load(&self) -> Option<Arc<T>> {
		self.inner.load_full()
	}

	/// Replaces the current value.
	pub fn store(&self, value: T) {
		self.inner.store(Some(Arc::new(value)));
	}

	/// Replaces the current value and returns the previous one.
	pub fn swap(&self, value: T) -> Option<Arc<T>> {
		self.inner.swap(Some(Arc::new(value)))
	}

	/// Empties the cell and returns the previous value.
	pub fn take(&self) -> Option<Arc<T>> {
		self.inner.swap(None)
	}
}

impl<T> Default for AtomicValue<T> {
	fn default() -> Self {
		Self::new()
	}
}
