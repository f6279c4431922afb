use std::net::SocketAddr;
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, trace};

use crate::network::network_error::{NetworkError, NetworkResult};

/// Upper bound for a single read from the stream
const MAX_READ_SIZE: usize = 4096;

/// The receive buffer starts at most this large and grows as data arrives
const MAX_INITIAL_CAPACITY: usize = 16 * MAX_READ_SIZE;

/// A connected TCP stream with exact-length receives.
///
/// The wrapper owns the stream: [TcpSocket::close] shuts it down explicitly, and dropping the
///  wrapper releases it otherwise.
pub struct TcpSocket {
    stream: TcpStream,
    read_timeout: Duration,
}

impl TcpSocket {
    pub(crate) fn new(stream: TcpStream, read_timeout: Duration) -> TcpSocket {
        TcpSocket {
            stream,
            read_timeout,
        }
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.stream.local_addr()
    }

    pub fn peer_addr(&self) -> std::io::Result<SocketAddr> {
        self.stream.peer_addr()
    }

    /// Hands all of `data` to the OS, or fails
    pub async fn send(&mut self, data: &[u8]) -> NetworkResult<()> {
        trace!("sending {} bytes", data.len());
        if let Err(e) = self.stream.write_all(data).await {
            debug!("could not send data: {}", e);
            return Err(NetworkError::Send(e));
        }
        Ok(())
    }

    /// Reads exactly `buf_size` bytes.
    ///
    /// If the peer closes the connection before that, this fails with
    ///  [NetworkError::ConnectionClosed] - there are no short reads.
    pub async fn recv(&mut self, buf_size: usize) -> NetworkResult<Bytes> {
        let mut message = BytesMut::with_capacity(buf_size.min(MAX_INITIAL_CAPACITY));
        let mut chunk = [0u8; MAX_READ_SIZE];

        while message.len() < buf_size {
            let read_len = (buf_size - message.len()).min(MAX_READ_SIZE);

            let num_read = match tokio::time::timeout(self.read_timeout, self.stream.read(&mut chunk[..read_len])).await {
                Ok(Ok(n)) => n,
                Ok(Err(e)) => {
                    debug!("could not receive data: {}", e);
                    return Err(NetworkError::Recv(e));
                }
                Err(_) => {
                    debug!("timed out after receiving {} of {} bytes", message.len(), buf_size);
                    return Err(NetworkError::Timeout(self.read_timeout));
                }
            };

            if num_read == 0 {
                debug!("socket connection broken after {} of {} bytes", message.len(), buf_size);
                return Err(NetworkError::ConnectionClosed {
                    expected: buf_size,
                    received: message.len(),
                });
            }
            message.extend_from_slice(&chunk[..num_read]);
        }

        Ok(message.freeze())
    }

    /// Shuts the connection down and releases the socket. A failure is reported, but the socket
    ///  is released either way.
    pub async fn close(mut self) -> NetworkResult<()> {
        if let Err(e) = self.stream.shutdown().await {
            debug!("could not close socket: {}", e);
            return Err(NetworkError::Close(e));
        }
        Ok(())
    }
}
