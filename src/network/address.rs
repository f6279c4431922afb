use std::net::{IpAddr, SocketAddr};

use tracing::debug;

use crate::network::network_error::{NetworkError, NetworkResult};

/// An empty host means 'all interfaces' when binding and 'this host' when sending
pub fn effective_host(host: &str) -> &str {
    if host.is_empty() {
        "0.0.0.0"
    }
    else {
        host
    }
}

/// Resolves `host:port` to all of its socket addresses, failing if there are none
pub async fn resolve(host: &str, port: u16) -> NetworkResult<Vec<SocketAddr>> {
    let addrs = match tokio::net::lookup_host((effective_host(host), port)).await {
        Ok(addrs) => addrs.collect::<Vec<_>>(),
        Err(source) => {
            debug!("could not resolve {}:{}: {}", host, port, source);
            return Err(NetworkError::Address { host: host.to_string(), port, source });
        }
    };

    if addrs.is_empty() {
        return Err(NetworkError::Address {
            host: host.to_string(),
            port,
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "host resolved to no addresses"),
        });
    }
    Ok(addrs)
}

/// Picks the address to send to from a resolved list.
///
/// Without a local socket, IPv4 is preferred. An IPv4 socket can only reach IPv4 addresses. An
///  IPv6 socket bound to all interfaces is dual-stack and reaches IPv4 through mapped addresses,
///  which are preferred there as well; one bound to a specific address prefers IPv6.
pub fn select_addr(addrs: &[SocketAddr], local: Option<SocketAddr>) -> Option<SocketAddr> {
    let first_v4 = addrs.iter().find(|a| a.is_ipv4()).copied();
    let first_v6 = addrs.iter().find(|a| a.is_ipv6()).copied();

    match local {
        None => first_v4.or(first_v6),
        Some(SocketAddr::V4(_)) => first_v4,
        Some(SocketAddr::V6(local)) => {
            let mapped_v4 = first_v4.map(to_ipv6_mapped);
            if local.ip().is_unspecified() {
                mapped_v4.or(first_v6)
            }
            else {
                first_v6.or(mapped_v4)
            }
        }
    }
}

fn to_ipv6_mapped(addr: SocketAddr) -> SocketAddr {
    match addr.ip() {
        IpAddr::V4(ip) => SocketAddr::new(IpAddr::V6(ip.to_ipv6_mapped()), addr.port()),
        IpAddr::V6(_) => addr,
    }
}

/// The error for a host whose addresses are all unreachable from the local socket
pub fn no_reachable_addr(host: &str, port: u16) -> NetworkError {
    NetworkError::Address {
        host: host.to_string(),
        port,
        source: std::io::Error::new(std::io::ErrorKind::AddrNotAvailable, "no resolved address matches the socket's address family"),
    }
}
