use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::backing::Backing;
use crate::codec::Populate;
use crate::struct_view::ViewCloner;


/// A read-only view of a sequence whose elements are handed out as views.
///
/// Unlike [`Slice`](crate::Slice), no accessor returns a raw `&T`, so
/// element types with their own read-only view keep that guarantee one
/// level down.
pub struct SliceOfViews<'a, T> {
	backing: Option<Backing<'a, [T]>>,
}

impl<'a, T: ViewCloner> SliceOfViews<'a, T> {
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
	#[inline]
	pub fn is_nil(&self) -> bool {
		self.backing.is_none()
	}

	/// Returns the number of elements.
	#[inline]
	pub fn len(&self) -> usize {
		self.items().len()
	}

	/// Reports whether there are no elements. A nil view is empty.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.items().is_empty()
	}

	/// Returns a view of the element at index `i`.
	///
	/// # Panics
	///
	/// Panics if `i >= self.len()`.
	pub fn at(&self, i: usize) -> T::View<'_> {
		self.items()[i].view()
	}

	/// Returns a view of the element at index `i`, or `None` if out of bounds.
	pub fn get(&self, i: usize) -> Option<T::View<'_>> {
		self.items().get(i).map(|x| x.view())
	}

	/// Iterates over element views in order.
	pub fn iter(&self) -> impl ExactSizeIterator<Item = T::View<'_>> + '_ {
		self.items().iter().map(|x| x.view())
	}

	/// Appends a view of every element to `dst` in order and returns it.
	pub fn append_to<'s>(&'s self, mut dst: Vec<T::View<'s>>) -> Vec<T::View<'s>> {
		dst.extend(self.iter());
		dst
	}

	/// Returns the element views as a new vector.
	pub fn to_vec(&self) -> Vec<T::View<'_>> {
		self.append_to(Vec::with_capacity(self.len()))
	}

	fn items(&self) -> &[T] {
		self.backing.as_deref().unwrap_or(&[])
	}
}

impl<T: ViewCloner> Default for SliceOfViews<'_, T> {
	fn default() -> Self {
		Self::nil()
	}
}

impl<T> Clone for SliceOfViews<'_, T> {
	fn clone(&self) -> Self {
		Self {
			backing: self.backing.clone(),
		}
	}
}

impl<'a, T: ViewCloner> From<&'a [T]> for SliceOfViews<'a, T> {
	fn from(items: &'a [T]) -> Self {
		Self::of(items)
	}
}

impl<'a, T: ViewCloner> From<&'a Vec<T>> for SliceOfViews<'a, T> {
	fn from(items: &'a Vec<T>) -> Self {
		Self::of(items)
	}
}

impl<'a, T: ViewCloner> From<Option<&'a [T]>> for SliceOfViews<'a, T> {
	fn from(items: Option<&'a [T]>) -> Self {
		items.map_or_else(Self::nil, Self::of)
	}
}

impl<T: fmt::Debug> fmt::Debug for SliceOfViews<'_, T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.backing.as_deref() {
			Some(items) => f.debug_list().entries(items).finish(),
			None => f.write_str("nil"),
		}
	}
}

impl<T: Serialize> Serialize for SliceOfViews<'_, T> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.backing.as_deref().serialize(serializer)
	}
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for SliceOfViews<'_, T> {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let items = Option::<Vec<T>>::deserialize(deserializer)?;
		Ok(Self {
			backing: items.map(|v| Backing::Shared(Arc::from(v))),
		})
	}
}

impl<T> Populate for SliceOfViews<'_, T> {
	fn is_populated(&self) -> bool {
		self.backing.is_some()
	}
}
