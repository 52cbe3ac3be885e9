use thiserror::Error;

/// Errors returned when decoding into a view.
#[derive(Debug, Error)]
pub enum ViewError {
	/// The view already has a backing collection.
	#[error("already initialized")]
	AlreadyInitialized,

	/// The payload is not valid JSON for the backing collection.
	#[error("invalid JSON payload: {0}")]
	Json(#[from] serde_json::Error),
}

/// Result type for view decoding.
pub type Result<T> = std::result::Result<T, ViewError>;
