use std::path::PathBuf;

use thiserror::Error;

/// Errors from preparing the daemon's state directory.
#[derive(Debug, Error)]
pub enum StateDirError {
	/// The directory or one of its parents could not be created.
	#[error("failed to create state directory {}: {source}", .path.display())]
	Create {
		/// Directory that was being created.
		path: PathBuf,
		/// The underlying I/O error.
		source: std::io::Error,
	},

	/// The path exists but is not a directory.
	#[error("expected {} to be a directory", .0.display())]
	NotADirectory(PathBuf),

	/// Permissions could not be read or restricted to the owner.
	#[error("failed to restrict permissions on {}: {source}", .path.display())]
	Permissions {
		/// Directory whose permissions were being set.
		path: PathBuf,
		/// The underlying I/O error.
		source: std::io::Error,
	},
}

/// Result type for state directory operations.
pub type Result<T> = std::result::Result<T, StateDirError>;
