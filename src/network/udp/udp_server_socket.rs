use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};

use bytes::Bytes;
use tracing::{debug, info};

use crate::network::network_config::NetworkConfig;
use crate::network::network_error::{NetworkError, NetworkResult};
use crate::network::udp::udp_socket::UdpSocket;

/// A UDP socket bound to a well-known port, receiving chunked transfers from clients
pub struct UdpServerSocket {
    socket: UdpSocket,
    config: NetworkConfig,
}

impl UdpServerSocket {
    /// Binds to `host:port`. An empty `host` listens on all interfaces, dual-stack where the
    ///  host supports IPv6 and IPv4 only otherwise.
    pub async fn create(host: &str, port: u16, config: &NetworkConfig) -> NetworkResult<UdpServerSocket> {
        config.validate()?;

        let raw_socket = match Self::bind(host, port).await {
            Ok(s) => s,
            Err(source) => {
                debug!("could not bind UDP socket to {}:{}: {}", host, port, source);
                return Err(NetworkError::Bind { host: host.to_string(), port, source });
            }
        };

        if host.is_empty() {
            info!("listening for external data on {:?}", raw_socket.local_addr());
        }
        else {
            info!("listening for internal data on {:?}", raw_socket.local_addr());
        }

        Ok(UdpServerSocket {
            socket: UdpSocket::new(Box::new(raw_socket), config.connection_timeout),
            config: config.clone(),
        })
    }

    async fn bind(host: &str, port: u16) -> std::io::Result<tokio::net::UdpSocket> {
        if !host.is_empty() {
            return tokio::net::UdpSocket::bind((host, port)).await;
        }

        match tokio::net::UdpSocket::bind((Ipv6Addr::UNSPECIFIED, port)).await {
            Ok(s) => Ok(s),
            Err(e) => {
                debug!("no dual-stack socket on port {} ({}), falling back to IPv4", port, e);
                tokio::net::UdpSocket::bind((Ipv4Addr::UNSPECIFIED, port)).await
            }
        }
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// see [UdpSocket::recv]
    pub async fn recv(&mut self, expected_size: usize) -> NetworkResult<Bytes> {
        self.socket.recv(expected_size).await
    }

    /// Sends `data` to `host:port` with the configured chunk size and send delay
    pub async fn send_to(&self, data: &[u8], host: &str, port: u16) -> NetworkResult<()> {
        self.socket.send_to(data, host, port, self.config.chunk_size, self.config.send_delay).await
    }

    pub fn socket(&self) -> &UdpSocket {
        &self.socket
    }
}
