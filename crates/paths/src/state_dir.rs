use std::fs;
use std::path::Path;

use crate::error::{Result, StateDirError};

/// Permission bits of the state directory: owner-only.
pub const STATE_DIR_MODE: u32 = 0o700;

/// Ensures `dir`, the daemon's state directory holding machine keys,
/// exists and is only accessible to the user the daemon runs as.
///
/// Missing parents are created with the same owner-only mode. An existing
/// directory with looser permissions is tightened. On non-Unix platforms
/// only the creation step applies.
pub fn mk_state_dir(dir: impl AsRef<Path>) -> Result<()> {
	let dir = dir.as_ref();
	if let Ok(meta) = fs::metadata(dir)
		&& !meta.is_dir()
	{
		return Err(StateDirError::NotADirectory(dir.to_path_buf()));
	}
	create_owner_only(dir).map_err(|source| StateDirError::Create {
		path: dir.to_path_buf(),
		source,
	})?;
	ensure_state_dir_perms(dir)
}

#[cfg(unix)]
fn create_owner_only(dir: &Path) -> std::io::Result<()> {
	use std::os::unix::fs::DirBuilderExt;

	fs::DirBuilder::new()
		.recursive(true)
		.mode(STATE_DIR_MODE)
		.create(dir)
}

#[cfg(not(unix))]
fn create_owner_only(dir: &Path) -> std::io::Result<()> {
	fs::create_dir_all(dir)
}

#[cfg(unix)]
fn ensure_state_dir_perms(dir: &Path) -> Result<()> {
	use std::os::unix::fs::PermissionsExt;

	let perms_err = |source| StateDirError::Permissions {
		path: dir.to_path_buf(),
		source,
	};
	let meta = fs::metadata(dir).map_err(perms_err)?;
	if !meta.is_dir() {
		return Err(StateDirError::NotADirectory(dir.to_path_buf()));
	}
	let mode = meta.permissions().mode() & 0o777;
	if mode == STATE_DIR_MODE {
		return Ok(());
	}
	tracing::warn!(path = %dir.display(), mode = format_args!("{mode:o}"), "restricting state directory to owner");
	fs::set_permissions(dir, fs::Permissions::from_mode(STATE_DIR_MODE)).map_err(perms_err)
}

#[cfg(not(unix))]
fn ensure_state_dir_perms(dir: &Path) -> Result<()> {
	if !dir.is_dir() {
		return Err(StateDirError::NotADirectory(dir.to_path_buf()));
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn creates_missing_parents() {
		let root = tempfile::tempdir().unwrap();
		let dir = root.path().join("a").join("b").join("state");
		mk_state_dir(&dir).unwrap();
		assert!(dir.is_dir());
	}

	#[test]
	fn file_as_parent_fails_to_create() {
		let root = tempfile::tempdir().unwrap();
		let file = root.path().join("state");
		fs::write(&file, b"not a dir").unwrap();
		assert!(matches!(
			mk_state_dir(file.join("nested")),
			Err(StateDirError::Create { .. })
		));
	}

	#[test]
	fn existing_directory_is_fine() {
		let root = tempfile::tempdir().unwrap();
		mk_state_dir(root.path()).unwrap();
		mk_state_dir(root.path()).unwrap();
	}

	#[test]
	fn file_in_the_way_fails() {
		let root = tempfile::tempdir().unwrap();
		let path = root.path().join("state");
		fs::write(&path, b"not a dir").unwrap();
		assert!(matches!(
			mk_state_dir(&path),
			Err(StateDirError::NotADirectory(p)) if p == path
		));
	}

	#[cfg(unix)]
	#[test]
	fn new_directory_is_owner_only() {
		use std::os::unix::fs::PermissionsExt;

		let root = tempfile::tempdir().unwrap();
		let dir = root.path().join("state");
		mk_state_dir(&dir).unwrap();
		let mode = fs::metadata(&dir).unwrap().permissions().mode() & 0o777;
		assert_eq!(mode, STATE_DIR_MODE);
	}

	#[cfg(unix)]
	#[test]
	fn loose_permissions_are_tightened() {
		use std::os::unix::fs::PermissionsExt;

		let root = tempfile::tempdir().unwrap();
		let dir = root.path().join("state");
		fs::create_dir(&dir).unwrap();
		fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).unwrap();

		mk_state_dir(&dir).unwrap();
		let mode = fs::metadata(&dir).unwrap().permissions().mode() & 0o777;
		assert_eq!(mode, STATE_DIR_MODE);
	}
}
