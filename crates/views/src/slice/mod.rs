use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::backing::Backing;
use crate::codec::Populate;


/// A read-only view of a sequence.
///
/// Built from a borrow of the owner's storage, so it lives no longer than
/// the owner and the owner cannot mutate while it is alive. Elements are
/// handed out as shared references; interior mutability inside `T` is not
/// guarded against.
pub struct Slice<'a, T> {
	backing: Option<Backing<'a, [T]>>,
}

impl<'a, T> Slice<'a, T> {
	/// Returns a view with no backing sequence.
	pub const fn nil() -> Self {
		Self { backing: None }
	}

	/// Returns a view of `items`.
	pub const fn of(items: &'a [T]) -> Self {
		Self {
			backing: Some(Backing::Borrowed(items)),
		}
	}

	/// Reports whether there is no backing sequence.
	///
	/// A view of an empty sequence is not nil.
	#[inline]
	pub fn is_nil(&self) -> bool {
		self.backing.is_none()
	}

	/// Returns the number of elements.
	#[inline]
	pub fn len(&self) -> usize {
		self.items().len()
	}

	/// Reports whether the view has no elements, nil or not.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.items().is_empty()
	}

	/// Returns the element at index `i`.
	///
	/// # Panics
	///
	/// Panics if `i >= self.len()`.
	#[inline]
	pub fn at(&self, i: usize) -> &T {
		&self.items()[i]
	}

	/// Returns the element at index `i`, or `None` if out of bounds.
	#[inline]
	pub fn get(&self, i: usize) -> Option<&T> {
		self.items().get(i)
	}

	/// Iterates over the elements in order.
	pub fn iter(&self) -> std::slice::Iter<'_, T> {
		self.items().iter()
	}

	/// Appends every element to `dst` in order and returns it.
	pub fn append_to(&self, mut dst: Vec<T>) -> Vec<T>
	where
		T: Clone,
	{
		dst.extend_from_slice(self.items());
		dst
	}

	/// Returns a copy of the elements that the caller is free to mutate.
	pub fn to_vec(&self) -> Vec<T>
	where
		T: Clone,
	{
		self.append_to(Vec::with_capacity(self.len()))
	}

	/// Returns the index of the first element satisfying `f`.
	///
	/// Runs in O(n) time, use with care.
	pub fn index_func(&self, f: impl FnMut(&T) -> bool) -> Option<usize> {
		self.items().iter().position(f)
	}

	/// Reports whether any element satisfies `f`.
	///
	/// Runs in O(n) time, use with care.
	pub fn contains_func(&self, f: impl FnMut(&T) -> bool) -> bool {
		self.items().iter().any(f)
	}

	/// Reports whether the view contains `e`.
	///
	/// Runs in O(n) time, use with care.
	pub fn contains(&self, e: &T) -> bool
	where
		T: PartialEq,
	{
		self.items().contains(e)
	}

	/// Backing elements; empty when nil.
	#[inline]
	pub(crate) fn items(&self) -> &[T] {
		self.backing.as_deref().unwrap_or(&[])
	}
}

impl<T> Default for Slice<'_, T> {
	fn default() -> Self {
		Self::nil()
	}
}

impl<T> Clone for Slice<'_, T> {
	fn clone(&self) -> Self {
		Self {
			backing: self.backing.clone(),
		}
	}
}

impl<'a, T> From<&'a [T]> for Slice<'a, T> {
	fn from(items: &'a [T]) -> Self {
		Self::of(items)
	}
}

impl<'a, T> From<&'a Vec<T>> for Slice<'a, T> {
	fn from(items: &'a Vec<T>) -> Self {
		Self::of(items)
	}
}

impl<'a, T> From<Option<&'a [T]>> for Slice<'a, T> {
	fn from(items: Option<&'a [T]>) -> Self {
		items.map_or_else(Self::nil, Self::of)
	}
}

impl<'s, T> IntoIterator for &'s Slice<'_, T> {
	type Item = &'s T;
	type IntoIter = std::slice::Iter<'s, T>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl<T: fmt::Debug> fmt::Debug for Slice<'_, T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.backing.as_deref() {
			Some(items) => f.debug_list().entries(items).finish(),
			None => f.write_str("nil"),
		}
	}
}

impl<T: PartialEq> PartialEq for Slice<'_, T> {
	fn eq(&self, other: &Self) -> bool {
		self.backing.as_deref() == other.backing.as_deref()
	}
}

impl<T: Eq> Eq for Slice<'_, T> {}

impl<T: Serialize> Serialize for Slice<'_, T> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.backing.as_deref().serialize(serializer)
	}
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Slice<'_, T> {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let items = Option::<Vec<T>>::deserialize(deserializer)?;
		Ok(Self {
			backing: items.map(|v| Backing::Shared(Arc::from(v))),
		})
	}
}

impl<T> Populate for Slice<'_, T> {
	fn is_populated(&self) -> bool {
		!self.is_nil()
	}
}
