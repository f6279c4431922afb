use std::net::SocketAddr;

use bytes::Bytes;
use tracing::debug;

use crate::network::address::{no_reachable_addr, resolve, select_addr};
use crate::network::network_config::NetworkConfig;
use crate::network::network_error::{NetworkError, NetworkResult};
use crate::network::udp::udp_socket::UdpSocket;

/// A UDP socket that sends to a single, fixed server address.
///
/// The local socket is bound to an ephemeral port only so the OS can send from it; nobody is
///  expected to send to it, and receiving is not supported.
pub struct UdpClientSocket {
    socket: UdpSocket,
    server_addr: SocketAddr,
    config: NetworkConfig,
}

impl UdpClientSocket {
    /// Resolves the server, preferring an IPv4 address, and binds an ephemeral local port of the
    ///  same address family
    pub async fn create(host: &str, port: u16, config: &NetworkConfig) -> NetworkResult<UdpClientSocket> {
        config.validate()?;

        let addrs = resolve(host, port).await?;
        let server_addr = select_addr(&addrs, None)
            .ok_or_else(|| no_reachable_addr(host, port))?;

        let local_addr = if server_addr.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
        let raw_socket = match tokio::net::UdpSocket::bind(local_addr).await {
            Ok(s) => s,
            Err(source) => {
                debug!("could not create UDP client socket: {}", source);
                return Err(NetworkError::Bind { host: local_addr.to_string(), port: 0, source });
            }
        };
        debug!("UDP client socket sending to {:?}", server_addr);

        Ok(UdpClientSocket {
            socket: UdpSocket::new(Box::new(raw_socket), config.connection_timeout),
            server_addr,
            config: config.clone(),
        })
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Sends `data` to the server in chunks, see [UdpSocket::send_to]
    pub async fn send(&self, data: &[u8]) -> NetworkResult<()> {
        self.socket.send_chunks(data, self.server_addr, self.config.chunk_size, self.config.send_delay).await
    }

    /// Client sockets do not listen, so this fails right away without touching the network
    pub async fn recv(&mut self, _expected_size: usize) -> NetworkResult<Bytes> {
        Err(NetworkError::RecvNotSupported)
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;
    use super::*;

    #[tokio::test]
    async fn test_create_resolves_server_addr() {
        let client = UdpClientSocket::create("127.0.0.1", 5000, &NetworkConfig::default()).await.unwrap();
        assert_eq!(client.server_addr(), "127.0.0.1:5000".parse::<SocketAddr>().unwrap());
        assert_ne!(client.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn test_create_prefers_ipv4() {
        let client = UdpClientSocket::create("localhost", 5000, &NetworkConfig::default()).await.unwrap();
        assert!(client.server_addr().is_ipv4());
        assert!(client.local_addr().unwrap().is_ipv4());
    }

    #[tokio::test]
    async fn test_recv_not_supported() {
        let mut client = UdpClientSocket::create("127.0.0.1", 5000, &NetworkConfig::default()).await.unwrap();
        assert!(matches!(client.recv(10).await, Err(NetworkError::RecvNotSupported)));
    }

    #[tokio::test]
    async fn test_create_invalid_host() {
        let result = UdpClientSocket::create("no-such-host.invalid", 5000, &NetworkConfig::default()).await;
        assert!(matches!(result, Err(NetworkError::Address { .. })));
    }

    #[tokio::test]
    async fn test_create_invalid_config() {
        let config = NetworkConfig {
            chunk_size: 0,
            ..NetworkConfig::with_timeout(Duration::from_secs(1))
        };
        let result = UdpClientSocket::create("127.0.0.1", 5000, &config).await;
        assert!(matches!(result, Err(NetworkError::InvalidConfig(_))));
    }
}
