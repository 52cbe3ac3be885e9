use std::ops::Deref;
use std::sync::Arc;

/// Handle to the collection a view reads through.
///
/// Views built by an owner borrow; views produced by decoding have no owner
/// and hold the decoded collection behind an `Arc` so cloning stays cheap.
pub(crate) enum Backing<'a, B: ?Sized> {
	Borrowed(&'a B),
	Shared(Arc<B>),
}

impl<B: ?Sized> Clone for Backing<'_, B> {
	fn clone(&self) -> Self {
		match self {
			Self::Borrowed(b) => Self::Borrowed(*b),
			Self::Shared(b) => Self::Shared(Arc::clone(b)),
		}
	}
}

impl<B: ?Sized> Deref for Backing<'_, B> {
	type Target = B;

	#[inline]
	fn deref(&self) -> &B {
		match self {
			Self::Borrowed(b) => b,
			Self::Shared(b) => b,
		}
	}
}
