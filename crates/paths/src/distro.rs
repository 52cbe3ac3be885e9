use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Linux distributions whose default paths differ from the usual layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distro {
	/// Synology DSM, with its major version when it could be read.
	Synology { dsm_major: Option<u32> },
	/// QNAP QTS.
	Qnap,
	/// gokrazy appliances (only `/perm` is writable).
	Gokrazy,
	/// Anything else, including non-Linux hosts.
	Other,
}

const SYNOLOGY_MARKER: &str = "usr/syno/bin/synogetkeyvalue";
const SYNOLOGY_VERSION: &str = "etc.defaults/VERSION";
const QNAP_MARKER: &str = "etc/config/uLinux.conf";
const GOKRAZY_MARKER: &str = "gokrazy";

impl Distro {
	/// Returns the distribution of the running host, detected once.
	pub fn get() -> Self {
		static DISTRO: OnceLock<Distro> = OnceLock::new();
		*DISTRO.get_or_init(|| {
			let distro = if cfg!(target_os = "linux") {
				Self::detect(Path::new("/"))
			} else {
				Self::Other
			};
			tracing::debug!(?distro, "detected distribution");
			distro
		})
	}

	/// Detects the distribution from marker files under `root`.
	pub fn detect(root: &Path) -> Self {
		if root.join(SYNOLOGY_MARKER).exists() {
			let dsm_major = fs::read_to_string(root.join(SYNOLOGY_VERSION))
				.ok()
				.and_then(|contents| parse_dsm_major_version(&contents));
			return Self::Synology { dsm_major };
		}
		if root.join(QNAP_MARKER).exists() {
			return Self::Qnap;
		}
		if root.join(GOKRAZY_MARKER).is_dir() {
			return Self::Gokrazy;
		}
		Self::Other
	}
}

/// Extracts `majorversion` from the contents of a DSM `VERSION` file.
///
/// Lines look like `majorversion="7"`; quotes are optional.
pub fn parse_dsm_major_version(contents: &str) -> Option<u32> {
	contents.lines().find_map(|line| {
		let (key, value) = line.split_once('=')?;
		if key.trim() != "majorversion" {
			return None;
		}
		value.trim().trim_matches('"').parse().ok()
	})
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("majorversion=\"7\"\nminorversion=\"2\"\n", Some(7))]
	#[case("productversion=\"6.2.4\"\nmajorversion=6\n", Some(6))]
	#[case("minorversion=\"2\"\n", None)]
	#[case("majorversion=\"seven\"\n", None)]
	fn dsm_version(#[case] contents: &str, #[case] expected: Option<u32>) {
		assert_eq!(parse_dsm_major_version(contents), expected);
	}

	fn touch(root: &Path, rel: &str, contents: &str) {
		let path = root.join(rel);
		fs::create_dir_all(path.parent().unwrap()).unwrap();
		fs::write(path, contents).unwrap();
	}

	#[test]
	fn detects_synology_with_version() {
		let root = tempfile::tempdir().unwrap();
		touch(root.path(), SYNOLOGY_MARKER, "");
		touch(root.path(), SYNOLOGY_VERSION, "majorversion=\"6\"\n");
		assert_eq!(Distro::detect(root.path()), Distro::Synology { dsm_major: Some(6) });
	}

	#[test]
	fn detects_synology_without_version() {
		let root = tempfile::tempdir().unwrap();
		touch(root.path(), SYNOLOGY_MARKER, "");
		assert_eq!(Distro::detect(root.path()), Distro::Synology { dsm_major: None });
	}

	#[test]
	fn detects_qnap_and_gokrazy() {
		let qnap = tempfile::tempdir().unwrap();
		touch(qnap.path(), QNAP_MARKER, "");
		assert_eq!(Distro::detect(qnap.path()), Distro::Qnap);

		let gokrazy = tempfile::tempdir().unwrap();
		fs::create_dir(gokrazy.path().join(GOKRAZY_MARKER)).unwrap();
		assert_eq!(Distro::detect(gokrazy.path()), Distro::Gokrazy);
	}

	#[test]
	fn plain_root_is_other() {
		let root = tempfile::tempdir().unwrap();
		assert_eq!(Distro::detect(root.path()), Distro::Other);
	}
}
