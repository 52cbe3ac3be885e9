use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash, RandomState};
use std::marker::PhantomData;
use std::ops::ControlFlow;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::backing::Backing;
use crate::codec::Populate;


/// A read-only view of a map.
///
/// Lookups return shared references or clones; entries are only reachable
/// through [`Map::range`], which can stop early. Iteration order is that of
/// the underlying [`HashMap`] and therefore unspecified.
pub struct Map<'a, K, V, S = RandomState> {
	backing: Option<Backing<'a, HashMap<K, V, S>>>,
}

impl<'a, K, V, S> Map<'a, K, V, S> {
	/// Returns a view with no backing map.
	pub const fn nil() -> Self {
		Self { backing: None }
	}

	/// Returns a view of `map`.
	pub const fn of(map: &'a HashMap<K, V, S>) -> Self {
		Self {
			backing: Some(Backing::Borrowed(map)),
		}
	}

	/// Reports whether there is no backing map.
	#[inline]
	pub fn is_nil(&self) -> bool {
		self.backing.is_none()
	}

	/// Returns the number of entries.
	#[inline]
	pub fn len(&self) -> usize {
		self.backing.as_deref().map_or(0, HashMap::len)
	}

	/// Reports whether there are no entries. A nil view is empty.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Calls `f` for every entry until it breaks.
	///
	/// Returns the break value, or `Continue` if every entry was visited.
	pub fn range<B>(&self, mut f: impl FnMut(&K, &V) -> ControlFlow<B>) -> ControlFlow<B> {
		let Some(map) = self.backing.as_deref() else {
			return ControlFlow::Continue(());
		};
		for (k, v) in map {
			if let ControlFlow::Break(b) = f(k, v) {
				return ControlFlow::Break(b);
			}
		}
		ControlFlow::Continue(())
	}
}

impl<K: Eq + Hash, V, S: BuildHasher> Map<'_, K, V, S> {
	/// Reports whether `k` has an entry.
	pub fn has<Q>(&self, k: &Q) -> bool
	where
		K: Borrow<Q>,
		Q: Hash + Eq + ?Sized,
	{
		self.get_ok(k).is_some()
	}

	/// Returns the value for `k`, or `V::default()` if there is none.
	///
	/// Use [`Map::get_ok`] to tell a missing key from a default value.
	pub fn get<Q>(&self, k: &Q) -> V
	where
		K: Borrow<Q>,
		Q: Hash + Eq + ?Sized,
		V: Clone + Default,
	{
		self.get_ok(k).cloned().unwrap_or_default()
	}

	/// Returns the value for `k`, or `None` if there is none.
	pub fn get_ok<Q>(&self, k: &Q) -> Option<&V>
	where
		K: Borrow<Q>,
		Q: Hash + Eq + ?Sized,
	{
		self.backing.as_deref()?.get(k)
	}
}

impl<K, V, S> Default for Map<'_, K, V, S> {
	fn default() -> Self {
		Self::nil()
	}
}

impl<K, V, S> Clone for Map<'_, K, V, S> {
	fn clone(&self) -> Self {
		Self {
			backing: self.backing.clone(),
		}
	}
}

impl<'a, K, V, S> From<&'a HashMap<K, V, S>> for Map<'a, K, V, S> {
	fn from(map: &'a HashMap<K, V, S>) -> Self {
		Self::of(map)
	}
}

impl<'a, K, V, S> From<Option<&'a HashMap<K, V, S>>> for Map<'a, K, V, S> {
	fn from(map: Option<&'a HashMap<K, V, S>>) -> Self {
		map.map_or_else(Self::nil, Self::of)
	}
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for Map<'_, K, V, S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.backing.as_deref() {
			Some(map) => f.debug_map().entries(map).finish(),
			None => f.write_str("nil"),
		}
	}
}

impl<K: Eq + Hash, V: PartialEq, S: BuildHasher> PartialEq for Map<'_, K, V, S> {
	fn eq(&self, other: &Self) -> bool {
		self.backing.as_deref() == other.backing.as_deref()
	}
}

impl<K: Serialize + Eq + Hash, V: Serialize, S: BuildHasher> Serialize for Map<'_, K, V, S> {
	fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
		self.backing.as_deref().serialize(serializer)
	}
}

impl<'de, K, V, S> Deserialize<'de> for Map<'_, K, V, S>
where
	K: Deserialize<'de> + Eq + Hash,
	V: Deserialize<'de>,
	S: BuildHasher + Default,
{
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let map = Option::<HashMap<K, V, S>>::deserialize(deserializer)?;
		Ok(Self {
			backing: map.map(|m| Backing::Shared(Arc::new(m))),
		})
	}
}

impl<K, V, S> Populate for Map<'_, K, V, S> {
	fn is_populated(&self) -> bool {
		!self.is_nil()
	}
}

/// A read-only view of a map whose values are converted on every read.
///
/// `wrap` turns a borrowed stored value into what callers see, typically a
/// view of it (a map of `Vec<T>` read as a map of [`Slice`](crate::Slice)),
/// so nothing converted is ever stored. `wrap` must be pure: it runs once
/// per value handed out and may run any number of times for the same entry.
///
/// `wrap` never runs for a missing key. [`MapFn::get`] returns
/// `V::default()` and [`MapFn::get_ok`] returns `None` instead.
pub struct MapFn<'a, K, T, V, F, S = RandomState> {
	backing: Option<&'a HashMap<K, T, S>>,
	wrap: F,
	_value: PhantomData<fn() -> V>,
}

impl<'a, K, T, V, F, S> MapFn<'a, K, T, V, F, S>
where
	F: Fn(&'a T) -> V,
{
	/// Returns a view with no backing map.
	pub fn nil(wrap: F) -> Self {
		Self {
			backing: None,
			wrap,
			_value: PhantomData,
		}
	}

	/// Returns a view of `map` converting values with `wrap`.
	pub fn of(map: &'a HashMap<K, T, S>, wrap: F) -> Self {
		Self {
			backing: Some(map),
			wrap,
			_value: PhantomData,
		}
	}

	/// Reports whether there is no backing map.
	#[inline]
	pub fn is_nil(&self) -> bool {
		self.backing.is_none()
	}

	/// Returns the number of entries.
	#[inline]
	pub fn len(&self) -> usize {
		self.backing.map_or(0, HashMap::len)
	}

	/// Reports whether there are no entries. A nil view is empty.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Calls `f` with every key and converted value until it breaks.
	pub fn range<B>(&self, mut f: impl FnMut(&'a K, V) -> ControlFlow<B>) -> ControlFlow<B> {
		let Some(map) = self.backing else {
			return ControlFlow::Continue(());
		};
		for (k, v) in map {
			if let ControlFlow::Break(b) = f(k, (self.wrap)(v)) {
				return ControlFlow::Break(b);
			}
		}
		ControlFlow::Continue(())
	}
}

impl<'a, K: Eq + Hash, T, V, F, S: BuildHasher> MapFn<'a, K, T, V, F, S>
where
	F: Fn(&'a T) -> V,
{
	/// Reports whether `k` has an entry. Does not call `wrap`.
	pub fn has<Q>(&self, k: &Q) -> bool
	where
		K: Borrow<Q>,
		Q: Hash + Eq + ?Sized,
	{
		self.backing.is_some_and(|m| m.contains_key(k))
	}

	/// Returns the converted value for `k`, or `V::default()` if there is none.
	pub fn get<Q>(&self, k: &Q) -> V
	where
		K: Borrow<Q>,
		Q: Hash + Eq + ?Sized,
		V: Default,
	{
		self.get_ok(k).unwrap_or_default()
	}

	/// Returns the converted value for `k`, or `None` if there is none.
	pub fn get_ok<Q>(&self, k: &Q) -> Option<V>
	where
		K: Borrow<Q>,
		Q: Hash + Eq + ?Sized,
	{
		self.backing?.get(k).map(&self.wrap)
	}
}

impl<K, T, V, F: Clone, S> Clone for MapFn<'_, K, T, V, F, S> {
	fn clone(&self) -> Self {
		Self {
			backing: self.backing,
			wrap: self.wrap.clone(),
			_value: PhantomData,
		}
	}
}

impl<K: fmt::Debug, T: fmt::Debug, V, F, S> fmt::Debug for MapFn<'_, K, T, V, F, S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.backing {
			Some(map) => f.debug_map().entries(map).finish(),
			None => f.write_str("nil"),
		}
	}
}

/// Writes the raw stored values; `wrap` is not applied.
impl<K, T, V, F, S> Serialize for MapFn<'_, K, T, V, F, S>
where
	K: Serialize + Eq + Hash,
	T: Serialize,
	S: BuildHasher,
{
	fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
		self.backing.serialize(serializer)
	}
}
