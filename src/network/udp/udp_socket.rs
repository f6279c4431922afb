use std::net::SocketAddr;
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use tracing::{debug, trace, warn};

use crate::network::address::{no_reachable_addr, resolve, select_addr};
use crate::network::network_error::{NetworkError, NetworkResult};
use crate::network::udp::datagram_transport::DatagramTransport;

/// The largest payload a single UDP datagram can carry (IPv4)
pub const MAX_DATAGRAM_SIZE: usize = 65_507;

/// The receive buffer starts at most this large and grows as data arrives
const MAX_INITIAL_CAPACITY: usize = 4 * MAX_DATAGRAM_SIZE;

/// A UDP socket that can send buffers of arbitrary size by splitting them into datagrams, and
///  reassemble them on the receiving side.
///
/// There is no header, sequence number or acknowledgement: chunks are sent in order, and the
///  receiver relies on the transport delivering them in order from a single sender. Sender and
///  receiver must agree on the total size out of band, e.g. through a fixed record length or a
///  preceding metadata record.
pub struct UdpSocket {
    transport: Box<dyn DatagramTransport>,
    recv_timeout: Duration,
}

impl UdpSocket {
    pub(crate) fn new(transport: Box<dyn DatagramTransport>, recv_timeout: Duration) -> UdpSocket {
        UdpSocket {
            transport,
            recv_timeout,
        }
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.transport.local_addr()
    }

    /// Sends `data` to `host:port` in chunks of at most `chunk_size` bytes, pausing `send_delay`
    ///  after each chunk.
    ///
    /// The target is the first resolved address this socket's address family can reach.
    ///
    /// Sending stops at the first failing chunk. The chunks sent up to that point are not
    ///  recalled, so the receiver may see an incomplete prefix.
    pub async fn send_to(&self, data: &[u8], host: &str, port: u16, chunk_size: usize, send_delay: Duration) -> NetworkResult<()> {
        let addrs = resolve(host, port).await?;
        let to = select_addr(&addrs, self.local_addr().ok())
            .ok_or_else(|| no_reachable_addr(host, port))?;
        self.send_chunks(data, to, chunk_size, send_delay).await
    }

    pub(crate) async fn send_chunks(&self, data: &[u8], to: SocketAddr, chunk_size: usize, send_delay: Duration) -> NetworkResult<()> {
        if chunk_size == 0 {
            return Err(NetworkError::InvalidConfig("chunk size must be positive".to_string()));
        }

        trace!("sending {} bytes to {:?} in chunks of up to {} bytes", data.len(), to, chunk_size);

        for chunk in data.chunks(chunk_size) {
            if let Err(e) = self.transport.send_datagram(to, chunk).await {
                debug!("could not send chunk of {} bytes to {:?}: {}", chunk.len(), to, e);
                return Err(NetworkError::Send(e));
            }
            tokio::time::sleep(send_delay).await;
        }
        Ok(())
    }

    /// Receives datagrams until exactly `expected_size` bytes are collected.
    ///
    /// The sender of the first datagram is the only accepted sender for the rest of the call;
    ///  datagrams from other addresses are logged and dropped. Each wait for a datagram is bounded
    ///  by the socket's timeout, so a sender that sends less than `expected_size` surfaces as
    ///  [NetworkError::Timeout].
    pub async fn recv(&mut self, expected_size: usize) -> NetworkResult<Bytes> {
        let mut data = BytesMut::with_capacity(expected_size.min(MAX_INITIAL_CAPACITY));
        let mut expected_sender: Option<SocketAddr> = None;
        let mut packet_buf = vec![0u8; MAX_DATAGRAM_SIZE];

        while data.len() < expected_size {
            let (num_read, from) = match tokio::time::timeout(self.recv_timeout, self.transport.recv_datagram(&mut packet_buf)).await {
                Ok(Ok(x)) => x,
                Ok(Err(e)) => {
                    debug!("could not receive data: {}", e);
                    return Err(NetworkError::Recv(e));
                }
                Err(_) => {
                    debug!("timed out after receiving {} of {} bytes", data.len(), expected_size);
                    return Err(NetworkError::Timeout(self.recv_timeout));
                }
            };

            match expected_sender {
                None => expected_sender = Some(from),
                Some(sender) if sender != from => {
                    warn!("data received from multiple addresses: {:?} and {:?} - dropping {} bytes from the latter", sender, from, num_read);
                    continue;
                }
                Some(_) => {}
            }

            if data.len() + num_read > expected_size {
                return Err(NetworkError::Overrun {
                    expected: expected_size,
                    received: data.len() + num_read,
                });
            }

            trace!("received {} bytes from {:?}", num_read, from);
            data.extend_from_slice(&packet_buf[..num_read]);
        }

        Ok(data.freeze())
    }
}
