use std::net::SocketAddr;

use async_trait::async_trait;
#[cfg(test)] use mockall::automock;
use tracing::trace;

/// The raw datagram operations [super::udp_socket::UdpSocket] builds on, introduced to
///  facilitate mocking the I/O part away for testing
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DatagramTransport: Send + Sync + 'static {
    async fn send_datagram(&self, to: SocketAddr, buf: &[u8]) -> std::io::Result<usize>;

    async fn recv_datagram(&self, buf: &mut [u8]) -> std::io::Result<(usize, SocketAddr)>;

    fn local_addr(&self) -> std::io::Result<SocketAddr>;
}

#[async_trait]
impl DatagramTransport for tokio::net::UdpSocket {
    async fn send_datagram(&self, to: SocketAddr, buf: &[u8]) -> std::io::Result<usize> {
        trace!("UDP socket: sending {} bytes to {:?}", buf.len(), to);
        self.send_to(buf, to).await
    }

    async fn recv_datagram(&self, buf: &mut [u8]) -> std::io::Result<(usize, SocketAddr)> {
        self.recv_from(buf).await
    }

    fn local_addr(&self) -> std::io::Result<SocketAddr> {
        tokio::net::UdpSocket::local_addr(self)
    }
}
