/// A read-only view of a value of type [`StructView::Owned`].
///
/// Typically a thin wrapper around `&'a Owned` whose accessors return
/// scalars, `&str`, or further views.
pub trait StructView {
	/// The viewed type.
	type Owned;

	/// Reports whether the view refers to a value.
	fn valid(&self) -> bool;

	/// Returns a deep copy of the viewed value.
	///
	/// Returns the absent value when [`StructView::valid`] is false.
	fn as_struct(&self) -> Self::Owned;
}

/// A type that can hand out a read-only view of itself and a deep copy.
///
/// Element types with nested mutable state implement this so containers
/// such as [`SliceOfViews`](crate::SliceOfViews) never hand them out raw.
pub trait ViewCloner: Sized {
	/// The view type.
	type View<'v>: StructView<Owned = Self>
	where
		Self: 'v;

	/// Returns a read-only view of `self`.
	fn view(&self) -> Self::View<'_>;

	/// Returns a deep copy of `self`.
	fn deep_clone(&self) -> Self;
}

/// An absent view is invalid and copies out as `None`.
impl<V: StructView> StructView for Option<V> {
	type Owned = Option<V::Owned>;

	fn valid(&self) -> bool {
		self.as_ref().is_some_and(|v| v.valid())
	}

	fn as_struct(&self) -> Option<V::Owned> {
		self.as_ref().map(|v| v.as_struct())
	}
}

/// `None` elements view as an invalid view and clone as `None`.
impl<T: ViewCloner> ViewCloner for Option<T> {
	type View<'v>
		= Option<T::View<'v>>
	where
		Self: 'v;

	fn view(&self) -> Self::View<'_> {
		self.as_ref().map(|v| v.view())
	}

	fn deep_clone(&self) -> Self {
		self.as_ref().map(|v| v.deep_clone())
	}
}
