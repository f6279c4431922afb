use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use bytes::Bytes;
use tokio::net::TcpStream;
use tracing::{debug, info};

use crate::network::address::resolve;
use crate::network::network_config::NetworkConfig;
use crate::network::network_error::{NetworkError, NetworkResult};
use crate::network::tcp::tcp_socket::TcpSocket;

/// The connecting side of a TCP connection
pub struct TcpClientSocket {
    socket: TcpSocket,
}

impl TcpClientSocket {
    /// Connects to `host:port`, trying all addresses the host resolves to.
    ///
    /// Resolution failures ([NetworkError::Address]), connection failures
    ///  ([NetworkError::Connect]) and exceeding the configured timeout ([NetworkError::Timeout])
    ///  are reported separately and never retried.
    pub async fn connect(host: &str, port: u16, config: &NetworkConfig) -> NetworkResult<TcpClientSocket> {
        config.validate()?;

        let addrs = resolve(host, port).await?;

        let stream = Self::await_connection(host, port, config.connection_timeout, TcpStream::connect(addrs.as_slice())).await?;
        info!("connected to {}:{}", host, port);

        Ok(TcpClientSocket {
            socket: TcpSocket::new(stream, config.connection_timeout),
        })
    }

    async fn await_connection(host: &str, port: u16, timeout: Duration, connecting: impl Future<Output = std::io::Result<TcpStream>>) -> NetworkResult<TcpStream> {
        match tokio::time::timeout(timeout, connecting).await {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(source)) => {
                debug!("could not connect to {}:{}: {}", host, port, source);
                Err(NetworkError::Connect { host: host.to_string(), port, source })
            }
            Err(_) => {
                debug!("connecting to {}:{} timed out", host, port);
                Err(NetworkError::Timeout(timeout))
            }
        }
    }

    /// Wraps a stream that is already connected
    pub fn from_stream(stream: TcpStream, config: &NetworkConfig) -> NetworkResult<TcpClientSocket> {
        config.validate()?;
        Ok(TcpClientSocket {
            socket: TcpSocket::new(stream, config.connection_timeout),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    pub fn peer_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.peer_addr()
    }

    /// see [TcpSocket::send]
    pub async fn send(&mut self, data: &[u8]) -> NetworkResult<()> {
        self.socket.send(data).await
    }

    /// see [TcpSocket::recv]
    pub async fn recv(&mut self, buf_size: usize) -> NetworkResult<Bytes> {
        self.socket.recv(buf_size).await
    }

    pub async fn close(self) -> NetworkResult<()> {
        self.socket.close().await
    }

    pub fn into_inner(self) -> TcpSocket {
        self.socket
    }
}
