//! Local IPv4 address lookup.

use std::net::Ipv4Addr;

/// An IPv4 address assigned to this host, other than `127.0.0.1`.
///
/// When several interfaces qualify, the last one enumerated wins.
pub fn ipv4() -> Option<Ipv4Addr> {
    last_non_localhost(interface_ipv4s())
}

fn last_non_localhost<I: IntoIterator<Item = Ipv4Addr>>(addresses: I) -> Option<Ipv4Addr> {
    addresses
        .into_iter()
        .filter(|addr| *addr != Ipv4Addr::LOCALHOST)
        .last()
}

#[cfg(unix)]
fn interface_ipv4s() -> Vec<Ipv4Addr> {
    match nix::ifaddrs::getifaddrs() {
        Ok(interfaces) => interfaces
            .filter_map(|ifaddr| ifaddr.address)
            .filter_map(|addr| addr.as_sockaddr_in().map(|sin| Ipv4Addr::from(sin.ip())))
            .collect(),
        Err(e) => {
            tracing::warn!(error = %e, "cannot enumerate network interfaces");
            Vec::new()
        }
    }
}

#[cfg(not(unix))]
fn interface_ipv4s() -> Vec<Ipv4Addr> {
    Vec::new()
}
