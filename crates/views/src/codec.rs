use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};

use crate::error::{Result, ViewError};

/// One-shot decoding into a view.
///
/// A view serializes exactly like its backing collection, and a freshly
/// deserialized view owns what it decoded. `Populate` covers the in-place
/// case: filling a nil view that already sits inside a larger value. It
/// refuses to overwrite a view that has a backing collection.
pub trait Populate: Sized {
	/// Reports whether the view has a backing collection (empty counts).
	fn is_populated(&self) -> bool;

	/// Decodes `deserializer` into this view.
	///
	/// Fails with [`ViewError::AlreadyInitialized`], surfaced through the
	/// deserializer's error type, if the view is populated.
	fn populate<'de, D>(&mut self, deserializer: D) -> std::result::Result<(), D::Error>
	where
		Self: Deserialize<'de>,
		D: Deserializer<'de>,
	{
		if self.is_populated() {
			return Err(D::Error::custom(ViewError::AlreadyInitialized));
		}
		*self = Self::deserialize(deserializer)?;
		tracing::trace!(view = std::any::type_name::<Self>(), "populated view");
		Ok(())
	}

	/// Decodes a JSON payload into this view.
	///
	/// An empty payload is a successful no-op that leaves the view nil.
	fn populate_json(&mut self, bytes: &[u8]) -> Result<()>
	where
		Self: DeserializeOwned,
	{
		if self.is_populated() {
			return Err(ViewError::AlreadyInitialized);
		}
		if bytes.is_empty() {
			return Ok(());
		}
		*self = serde_json::from_slice(bytes)?;
		tracing::trace!(view = std::any::type_name::<Self>(), len = bytes.len(), "populated view from JSON");
		Ok(())
	}
}
