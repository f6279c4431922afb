use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::network::address::effective_host;
use crate::network::network_config::NetworkConfig;
use crate::network::network_error::{NetworkError, NetworkResult};
use crate::network::tcp::tcp_socket::TcpSocket;

/// A listening TCP socket handing out one [TcpSocket] per accepted connection
pub struct TcpServerSocket {
    listener: TcpListener,
    timeout: Duration,
}

impl TcpServerSocket {
    /// Binds to `host:port` and starts listening. An empty `host` listens on all interfaces.
    pub async fn create(host: &str, port: u16, config: &NetworkConfig) -> NetworkResult<TcpServerSocket> {
        config.validate()?;

        let listener = match TcpListener::bind((effective_host(host), port)).await {
            Ok(l) => l,
            Err(source) => {
                debug!("could not bind TCP socket to {}:{}: {}", host, port, source);
                return Err(NetworkError::Bind { host: host.to_string(), port, source });
            }
        };
        info!("listening for connections on {:?}", listener.local_addr());

        Ok(TcpServerSocket {
            listener,
            timeout: config.connection_timeout,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Waits for the next incoming connection, at most for the configured timeout
    pub async fn accept(&self) -> NetworkResult<TcpSocket> {
        match tokio::time::timeout(self.timeout, self.listener.accept()).await {
            Ok(Ok((stream, peer_addr))) => {
                info!("accepted connection from {:?}", peer_addr);
                Ok(TcpSocket::new(stream, self.timeout))
            }
            Ok(Err(e)) => {
                debug!("could not accept connection: {}", e);
                Err(NetworkError::Accept(e))
            }
            Err(_) => {
                debug!("no connection within {:?}", self.timeout);
                Err(NetworkError::Timeout(self.timeout))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use crate::network::tcp::tcp_client_socket::TcpClientSocket;
    use super::*;

    #[tokio::test]
    async fn test_accept() {
        let config = NetworkConfig::with_timeout(Duration::from_secs(5));
        let server = TcpServerSocket::create("127.0.0.1", 0, &config).await.unwrap();
        let port = server.local_addr().unwrap().port();

        let (client, accepted) = tokio::join!(
            TcpClientSocket::connect("localhost", port, &config),
            server.accept(),
        );
        let mut client = client.unwrap();
        let mut accepted = accepted.unwrap();
        assert_eq!(accepted.peer_addr().unwrap(), client.local_addr().unwrap());

        client.send(&[5u8; 10_000]).await.unwrap();
        assert_eq!(accepted.recv(10_000).await.unwrap().as_ref(), &[5u8; 10_000][..]);
    }

    #[tokio::test]
    async fn test_accept_timeout() {
        let config = NetworkConfig::with_timeout(Duration::from_millis(100));
        let server = TcpServerSocket::create("127.0.0.1", 0, &config).await.unwrap();

        assert!(matches!(server.accept().await, Err(NetworkError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_bind_port_in_use() {
        let config = NetworkConfig::default();
        let server = TcpServerSocket::create("127.0.0.1", 0, &config).await.unwrap();
        let port = server.local_addr().unwrap().port();

        assert!(matches!(TcpServerSocket::create("127.0.0.1", port, &config).await, Err(NetworkError::Bind { .. })));
    }

    #[tokio::test]
    async fn test_bind_invalid_address() {
        let config = NetworkConfig::default();
        assert!(matches!(TcpServerSocket::create("256.1.1.1", 0, &config).await, Err(NetworkError::Bind { .. })));
    }
}
