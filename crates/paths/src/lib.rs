//! Platform and user-specific default paths for the warden daemon.
//!
//! # Resolution
//!
//! - [`default_daemon_socket`]: `WARDEN_SOCKET`, then the platform default.
//! - [`default_state_file`]: `WARDEN_STATE_FILE`, then a resolver installed
//!   with [`set_state_file_resolver`], then the platform default.
//!
//! Either may resolve to an empty path when the platform has no sensible
//! default; callers must then require an explicit path.

use std::path::PathBuf;

/// Lock-free single-value cell.
pub mod atomic;
/// Default socket and state file locations.
pub mod defaults;
/// Linux distribution detection.
pub mod distro;
/// Error types for state directory setup.
pub mod error;
/// Owner-only state directory setup.
pub mod state_dir;

pub use atomic::AtomicValue;
pub use defaults::{
	SOCKET_ENV, STATE_FILE_ENV, default_daemon_socket, default_state_file, set_state_file_resolver,
};
pub use distro::Distro;
pub use error::{Result, StateDirError};
pub use state_dir::mk_state_dir;

/// Directory the embedding app (mobile or sandboxed desktop) grants the
/// daemon read/write access to. Unset on ordinary hosts.
pub static APP_SHARED_DIR: AtomicValue<PathBuf> = AtomicValue::new();
