//! Queries over lists of network prefixes.
//!
//! Routing tables and advertised routes are carried around as plain
//! `[IpNet]` lists. The helpers here answer the handful of questions callers
//! ask of such a list (does it cover an address, does it advertise an exit
//! node) without building any index, so every query is a linear scan.

use std::net::IpAddr;

use ipnet::{IpNet, Ipv4Net, Ipv6Net};


/// Returns the IPv4 default route, `0.0.0.0/0`.
#[inline]
pub fn all_ipv4() -> IpNet {
	IpNet::V4(Ipv4Net::default())
}

/// Returns the IPv6 default route, `::/0`.
#[inline]
pub fn all_ipv6() -> IpNet {
	IpNet::V6(Ipv6Net::default())
}

/// Returns both default routes, IPv4 first.
///
/// A node that advertises this pair offers itself as an exit node.
pub fn exit_routes() -> [IpNet; 2] {
	[all_ipv4(), all_ipv6()]
}

/// Reports whether `prefix` is one of the two default routes.
pub fn is_exit_route(prefix: &IpNet) -> bool {
	*prefix == all_ipv4() || *prefix == all_ipv6()
}

/// Reports whether any prefix in `prefixes` contains `ip`.
///
/// IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`) are matched against IPv4
/// prefixes.
pub fn prefixes_contain_ip(prefixes: &[IpNet], ip: IpAddr) -> bool {
	let ip = ip.to_canonical();
	prefixes.iter().any(|p| p.contains(&ip))
}

/// Reports whether `f` holds for any prefix in `prefixes`.
pub fn prefixes_contain_func(prefixes: &[IpNet], f: impl FnMut(&IpNet) -> bool) -> bool {
	prefixes.iter().any(f)
}

/// Reports whether `prefixes` advertises exit-node routes.
///
/// Both the IPv4 and the IPv6 default route must be present; one alone is
/// treated as an ordinary route.
pub fn contains_exit_routes(prefixes: &[IpNet]) -> bool {
	let (mut v4, mut v6) = (false, false);
	for p in prefixes {
		if *p == all_ipv4() {
			v4 = true;
		} else if *p == all_ipv6() {
			v6 = true;
		}
	}
	v4 && v6
}

/// Returns a copy of `prefixes` with the default routes removed.
pub fn filter_exit_routes(prefixes: &[IpNet]) -> Vec<IpNet> {
	prefixes
		.iter()
		.filter(|p| !is_exit_route(p))
		.copied()
		.collect()
}
