use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::atomic::AtomicValue;
use crate::distro::Distro;

#[cfg(test)]
mod tests;

/// Environment variable overriding [`default_daemon_socket`].
pub const SOCKET_ENV: &str = "WARDEN_SOCKET";

/// Environment variable overriding [`default_state_file`].
pub const STATE_FILE_ENV: &str = "WARDEN_STATE_FILE";

const WINDOWS_PIPE: &str = r"\\.\pipe\ProtectedPrefix\Administrators\Warden\wardend";

static STATE_FILE_RESOLVER: AtomicValue<fn() -> PathBuf> = AtomicValue::new();

/// Returns the path of the daemon's control socket.
///
/// On Windows this is a named pipe. Returns a relative `wardend.sock` when no
/// system location applies.
pub fn default_daemon_socket() -> PathBuf {
	if let Some(path) = env_path(SOCKET_ENV) {
		return path;
	}
	let path = socket_path_for(
		std::env::consts::OS,
		Distro::get(),
		Path::new("/var/run").is_dir(),
	);
	tracing::debug!(path = %path.display(), "resolved default daemon socket");
	path
}

/// Returns the path of the daemon's persisted state file.
///
/// Returns an empty path when there is no reasonable default.
pub fn default_state_file() -> PathBuf {
	if let Some(path) = env_path(STATE_FILE_ENV) {
		return path;
	}
	if let Some(resolve) = STATE_FILE_RESOLVER.load() {
		return (*resolve)();
	}
	let path = platform_state_file();
	tracing::debug!(path = %path.display(), "resolved default state file");
	path
}

/// Installs `resolve` as the state file resolver, replacing the platform
/// default. The environment override still takes precedence.
pub fn set_state_file_resolver(resolve: fn() -> PathBuf) {
	STATE_FILE_RESOLVER.store(resolve);
}

fn env_path(name: &str) -> Option<PathBuf> {
	let value = std::env::var_os(name).filter(|v| !v.is_empty())?;
	tracing::debug!(env = name, path = ?value, "using path override from environment");
	Some(PathBuf::from(value))
}

/// Platform default socket for `os` (as in [`std::env::consts::OS`]).
pub(crate) fn socket_path_for(os: &str, distro: Distro, var_run_is_dir: bool) -> PathBuf {
	match os {
		"windows" => return PathBuf::from(WINDOWS_PIPE),
		"macos" => return PathBuf::from("/var/run/wardend.socket"),
		_ => {}
	}
	match distro {
		Distro::Synology { dsm_major: Some(6) } => {
			return PathBuf::from("/var/packages/Warden/etc/wardend.sock");
		}
		// DSM 7 and later, or an unreadable version.
		Distro::Synology { .. } => return PathBuf::from("/var/packages/Warden/var/wardend.sock"),
		Distro::Gokrazy => return PathBuf::from("/perm/wardend/wardend.sock"),
		Distro::Qnap => return PathBuf::from("/tmp/warden/wardend.sock"),
		Distro::Other => {}
	}
	if var_run_is_dir {
		return PathBuf::from("/var/run/warden/wardend.sock");
	}
	PathBuf::from("wardend.sock")
}

/// System-wide state file location for `os`, before writability checks.
#[cfg_attr(not(unix), allow(dead_code))]
pub(crate) fn system_state_path(os: &str) -> Option<PathBuf> {
	let path = match os {
		"linux" => "/var/lib/warden/wardend.state",
		"freebsd" | "openbsd" => "/var/db/warden/wardend.state",
		"macos" => "/Library/Warden/wardend.state",
		_ => return None,
	};
	Some(PathBuf::from(path))
}

#[cfg_attr(not(windows), allow(dead_code))]
pub(crate) fn windows_state_file(program_data: Option<OsString>) -> PathBuf {
	PathBuf::from(program_data.unwrap_or_default())
		.join("Warden")
		.join("server-state.conf")
}

#[cfg(windows)]
fn platform_state_file() -> PathBuf {
	windows_state_file(std::env::var_os("ProgramData"))
}

#[cfg(unix)]
fn platform_state_file() -> PathBuf {
	unix_state_file(Distro::get(), std::env::consts::OS)
}

#[cfg(not(any(unix, windows)))]
fn platform_state_file() -> PathBuf {
	PathBuf::new()
}

#[cfg(unix)]
fn unix_state_file(distro: Distro, os: &str) -> PathBuf {
	if distro == Distro::Gokrazy {
		return PathBuf::from("/perm/wardend/wardend.state");
	}
	let Some(path) = system_state_path(os) else {
		return PathBuf::new();
	};
	writable_or_user_state_file(path, rustix::process::getuid().is_root(), dirs::config_dir)
}

/// Keeps `system` when it, its directory, or that directory's parent is
/// writable. Otherwise non-root users get a file under `config_dir()` and
/// root gets an empty path.
#[cfg(unix)]
pub(crate) fn writable_or_user_state_file(
	system: PathBuf,
	is_root: bool,
	config_dir: impl FnOnce() -> Option<PathBuf>,
) -> PathBuf {
	let writable = |p: &Path| rustix::fs::access(p, rustix::fs::Access::WRITE_OK).is_ok();
	if system.ancestors().take(3).any(writable) {
		return system;
	}
	if is_root {
		return PathBuf::new();
	}
	match config_dir() {
		Some(dir) => dir.join("warden").join("wardend.state"),
		None => {
			tracing::warn!(system = %system.display(), "no writable state location and no user config directory");
			PathBuf::new()
		}
	}
}
