use pretty_assertions::assert_eq;
use rstest::rstest;
use serial_test::serial;

use super::*;

#[rstest]
#[case::windows("windows", Distro::Other, true, WINDOWS_PIPE)]
#[case::macos("macos", Distro::Other, true, "/var/run/wardend.socket")]
#[case::dsm6("linux", Distro::Synology { dsm_major: Some(6) }, true, "/var/packages/Warden/etc/wardend.sock")]
#[case::dsm7("linux", Distro::Synology { dsm_major: Some(7) }, true, "/var/packages/Warden/var/wardend.sock")]
#[case::dsm_unknown("linux", Distro::Synology { dsm_major: None }, true, "/var/packages/Warden/var/wardend.sock")]
#[case::gokrazy("linux", Distro::Gokrazy, true, "/perm/wardend/wardend.sock")]
#[case::qnap("linux", Distro::Qnap, false, "/tmp/warden/wardend.sock")]
#[case::linux("linux", Distro::Other, true, "/var/run/warden/wardend.sock")]
#[case::no_var_run("freebsd", Distro::Other, false, "wardend.sock")]
fn socket_paths(
	#[case] os: &str,
	#[case] distro: Distro,
	#[case] var_run_is_dir: bool,
	#[case] expected: &str,
) {
	assert_eq!(socket_path_for(os, distro, var_run_is_dir), PathBuf::from(expected));
}

#[rstest]
#[case("linux", Some("/var/lib/warden/wardend.state"))]
#[case("openbsd", Some("/var/db/warden/wardend.state"))]
#[case("macos", Some("/Library/Warden/wardend.state"))]
#[case("plan9", None)]
fn system_state_paths(#[case] os: &str, #[case] expected: Option<&str>) {
	assert_eq!(system_state_path(os), expected.map(PathBuf::from));
}

#[test]
fn windows_state_under_program_data() {
	assert_eq!(
		windows_state_file(Some(OsString::from("C:/ProgramData"))),
		Path::new("C:/ProgramData").join("Warden").join("server-state.conf")
	);
	assert_eq!(
		windows_state_file(None),
		Path::new("Warden").join("server-state.conf")
	);
}

#[cfg(unix)]
#[test]
fn gokrazy_state_lives_on_perm() {
	assert_eq!(
		unix_state_file(Distro::Gokrazy, "linux"),
		PathBuf::from("/perm/wardend/wardend.state")
	);
}

#[cfg(unix)]
#[test]
fn unknown_os_has_no_state_file() {
	assert_eq!(unix_state_file(Distro::Other, "plan9"), PathBuf::new());
}

#[cfg(unix)]
#[test]
fn writable_system_location_is_kept() {
	let root = tempfile::tempdir().unwrap();
	std::fs::create_dir(root.path().join("lib")).unwrap();
	let system = root.path().join("lib").join("warden").join("wardend.state");
	assert_eq!(
		writable_or_user_state_file(system.clone(), false, || None),
		system
	);
}

#[cfg(unix)]
#[rstest]
#[case::user_falls_back_to_config(false, Some("/home/ada/.config"), "/home/ada/.config/warden/wardend.state")]
#[case::root_gets_nothing(true, Some("/root/.config"), "")]
#[case::no_config_dir(false, None, "")]
fn unwritable_system_location(
	#[case] is_root: bool,
	#[case] config_dir: Option<&str>,
	#[case] expected: &str,
) {
	let root = tempfile::tempdir().unwrap();
	let system = root.path().join("missing").join("lib").join("warden").join("wardend.state");
	assert_eq!(
		writable_or_user_state_file(system, is_root, || config_dir.map(PathBuf::from)),
		PathBuf::from(expected)
	);
}

fn set_env(name: &str, value: Option<&str>) {
	// SAFETY: every caller is `#[serial]`, so no other test reads or writes
	// the environment concurrently.
	unsafe {
		match value {
			Some(value) => std::env::set_var(name, value),
			None => std::env::remove_var(name),
		}
	}
}

fn custom_state_file() -> PathBuf {
	PathBuf::from("/custom/wardend.state")
}

#[test]
#[serial]
fn installed_resolver_wins_over_platform_default() {
	set_env(STATE_FILE_ENV, None);
	set_state_file_resolver(custom_state_file);
	assert_eq!(default_state_file(), custom_state_file());
}

#[test]
#[serial]
fn state_file_env_wins_over_resolver() {
	set_state_file_resolver(custom_state_file);
	set_env(STATE_FILE_ENV, Some("/env/wardend.state"));
	let resolved = default_state_file();
	set_env(STATE_FILE_ENV, None);
	assert_eq!(resolved, PathBuf::from("/env/wardend.state"));
}

#[test]
#[serial]
fn empty_state_file_env_is_ignored() {
	set_state_file_resolver(custom_state_file);
	set_env(STATE_FILE_ENV, Some(""));
	let resolved = default_state_file();
	set_env(STATE_FILE_ENV, None);
	assert_eq!(resolved, custom_state_file());
}

#[test]
#[serial]
fn socket_env_overrides_platform_default() {
	set_env(SOCKET_ENV, Some("/run/custom/wardend.sock"));
	let resolved = default_daemon_socket();
	set_env(SOCKET_ENV, None);
	assert_eq!(resolved, PathBuf::from("/run/custom/wardend.sock"));
}

#[test]
#[serial]
fn empty_socket_env_is_ignored() {
	set_env(SOCKET_ENV, Some(""));
	let resolved = default_daemon_socket();
	set_env(SOCKET_ENV, None);
	let platform = socket_path_for(
		std::env::consts::OS,
		Distro::get(),
		Path::new("/var/run").is_dir(),
	);
	assert_eq!(resolved, platform);
	assert!(!resolved.as_os_str().is_empty());
}
