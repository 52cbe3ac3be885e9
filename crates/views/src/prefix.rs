use std::fmt;
use std::net::IpAddr;

use ipnet::IpNet;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::Populate;
use crate::slice::Slice;

/// A read-only view of a list of network prefixes.
///
/// Adds route queries to [`Slice`]; the queries themselves live in
/// [`warden_netaddr`].
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PrefixSlice<'a> {
	inner: Slice<'a, IpNet>,
}

impl<'a> PrefixSlice<'a> {
	/// Returns a view with no backing list.
	pub const fn nil() -> Self {
		Self { inner: Slice::nil() }
	}

	/// Returns a view of `prefixes`.
	pub const fn of(prefixes: &'a [IpNet]) -> Self {
		Self {
			inner: Slice::of(prefixes),
		}
	}

	/// Reports whether there is no backing list.
	#[inline]
	pub fn is_nil(&self) -> bool {
		self.inner.is_nil()
	}

	/// Returns the number of prefixes.
	#[inline]
	pub fn len(&self) -> usize {
		self.inner.len()
	}

	/// Reports whether there are no prefixes. A nil view is empty.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	/// Returns the prefix at index `i`.
	///
	/// # Panics
	///
	/// Panics if `i >= self.len()`.
	#[inline]
	pub fn at(&self, i: usize) -> IpNet {
		*self.inner.at(i)
	}

	/// Returns the prefix at index `i`, or `None` if out of bounds.
	#[inline]
	pub fn get(&self, i: usize) -> Option<IpNet> {
		self.inner.get(i).copied()
	}

	/// Iterates over the prefixes in order.
	pub fn iter(&self) -> impl ExactSizeIterator<Item = IpNet> + '_ {
		self.inner.iter().copied()
	}

	/// Appends every prefix to `dst` in order and returns it.
	pub fn append_to(&self, dst: Vec<IpNet>) -> Vec<IpNet> {
		self.inner.append_to(dst)
	}

	/// Returns a copy of the prefixes.
	pub fn to_vec(&self) -> Vec<IpNet> {
		self.inner.to_vec()
	}

	/// Returns the underlying generic view.
	pub fn inner(&self) -> &Slice<'a, IpNet> {
		&self.inner
	}

	/// Reports whether any prefix contains `ip`.
	pub fn contains_ip(&self, ip: IpAddr) -> bool {
		warden_netaddr::prefixes_contain_ip(self.inner.items(), ip)
	}

	/// Reports whether `f` holds for any prefix.
	pub fn contains_func(&self, f: impl FnMut(&IpNet) -> bool) -> bool {
		warden_netaddr::prefixes_contain_func(self.inner.items(), f)
	}

	/// Reports whether both default routes are present, i.e. the list
	/// advertises an exit node.
	pub fn contains_exit_routes(&self) -> bool {
		warden_netaddr::contains_exit_routes(self.inner.items())
	}
}

impl<'a> From<&'a [IpNet]> for PrefixSlice<'a> {
	fn from(prefixes: &'a [IpNet]) -> Self {
		Self::of(prefixes)
	}
}

impl<'a> From<&'a Vec<IpNet>> for PrefixSlice<'a> {
	fn from(prefixes: &'a Vec<IpNet>) -> Self {
		Self::of(prefixes)
	}
}

impl<'a> From<Option<&'a [IpNet]>> for PrefixSlice<'a> {
	fn from(prefixes: Option<&'a [IpNet]>) -> Self {
		Self {
			inner: Slice::from(prefixes),
		}
	}
}

impl<'a> From<Slice<'a, IpNet>> for PrefixSlice<'a> {
	fn from(inner: Slice<'a, IpNet>) -> Self {
		Self { inner }
	}
}

impl fmt::Debug for PrefixSlice<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&self.inner, f)
	}
}

impl Serialize for PrefixSlice<'_> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.inner.serialize(serializer)
	}
}

impl<'de> Deserialize<'de> for PrefixSlice<'_> {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		Slice::deserialize(deserializer).map(|inner| Self { inner })
	}
}

impl Populate for PrefixSlice<'_> {
	fn is_populated(&self) -> bool {
		!self.is_nil()
	}
}

#[cfg(test)]
mod tests {
	use std::net::Ipv4Addr;

	use pretty_assertions::assert_eq;
	use rstest::rstest;

	use super::*;
	use crate::ViewError;

	fn nets(list: &[&str]) -> Vec<IpNet> {
		list.iter().map(|s| s.parse().unwrap()).collect()
	}

	#[rstest]
	#[case("10.5.5.5", true)]
	#[case("192.168.1.9", true)]
	#[case("8.8.8.8", false)]
	fn contains_ip(#[case] ip: &str, #[case] expected: bool) {
		let owned = nets(&["10.0.0.0/8", "192.168.1.0/24"]);
		let view = PrefixSlice::of(&owned);
		assert_eq!(view.contains_ip(ip.parse().unwrap()), expected);
	}

	#[test]
	fn nil_contains_nothing() {
		let view = PrefixSlice::nil();
		assert!(view.is_nil());
		assert!(!view.contains_ip(IpAddr::V4(Ipv4Addr::LOCALHOST)));
		assert!(!view.contains_exit_routes());
		assert!(!view.contains_func(|_| true));
	}

	#[test]
	fn exit_routes() {
		let owned = nets(&["100.64.0.0/10", "0.0.0.0/0", "::/0"]);
		assert!(PrefixSlice::of(&owned).contains_exit_routes());
		assert!(!PrefixSlice::of(&owned[..2]).contains_exit_routes());
	}

	#[test]
	fn contains_func() {
		let owned = nets(&["10.0.0.0/8", "fd00::/8"]);
		let view = PrefixSlice::of(&owned);
		assert!(view.contains_func(|p| matches!(p, IpNet::V6(_))));
		assert!(!view.contains_func(|p| p.prefix_len() > 8));
	}

	#[test]
	fn accessors_delegate() {
		let owned = nets(&["10.0.0.0/8", "192.168.1.0/24"]);
		let view = PrefixSlice::of(&owned);
		assert_eq!(view.len(), 2);
		assert_eq!(view.at(1), owned[1]);
		assert_eq!(view.get(2), None);
		assert_eq!(view.iter().collect::<Vec<_>>(), owned);
		assert_eq!(view.to_vec(), owned);
		assert_eq!(view.append_to(nets(&["::/0"])).len(), 3);
		assert_eq!(view.inner(), &Slice::of(&owned));
	}

	#[test]
	fn json_is_transparent() {
		let owned = nets(&["10.0.0.0/8", "fd7a:115c:a1e0::/48"]);
		let json = serde_json::to_string(&PrefixSlice::of(&owned)).unwrap();
		assert_eq!(json, r#"["10.0.0.0/8","fd7a:115c:a1e0::/48"]"#);

		let mut back = PrefixSlice::nil();
		back.populate_json(json.as_bytes()).unwrap();
		assert_eq!(back.to_vec(), owned);
		assert!(matches!(
			back.populate_json(json.as_bytes()),
			Err(ViewError::AlreadyInitialized)
		));
	}
}
