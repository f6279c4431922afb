use std::time::Duration;

/// Errors of the socket wrappers. None of these are retried inside this crate; retry policy is
///  up to the caller.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("invalid network configuration: {0}")]
    InvalidConfig(String),

    #[error("could not resolve address {host}:{port}: {source}")]
    Address {
        host: String,
        port: u16,
        source: std::io::Error,
    },

    #[error("could not bind to {host}:{port}: {source}")]
    Bind {
        host: String,
        port: u16,
        source: std::io::Error,
    },

    #[error("could not connect to {host}:{port}: {source}")]
    Connect {
        host: String,
        port: u16,
        source: std::io::Error,
    },

    #[error("could not accept connection: {0}")]
    Accept(std::io::Error),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("could not send data: {0}")]
    Send(std::io::Error),

    #[error("could not receive data: {0}")]
    Recv(std::io::Error),

    /// The peer closed a stream connection before the requested number of bytes arrived
    #[error("connection closed by peer after {received} of {expected} bytes")]
    ConnectionClosed {
        expected: usize,
        received: usize,
    },

    /// A datagram did not fit into the remaining space of a size-bounded receive, i.e. the sender
    ///  and receiver disagree on the transfer size
    #[error("received {received} bytes, exceeding the expected {expected} bytes")]
    Overrun {
        expected: usize,
        received: usize,
    },

    #[error("could not close socket: {0}")]
    Close(std::io::Error),

    #[error("client sockets can not receive data as they are not bound to a port")]
    RecvNotSupported,
}

pub type NetworkResult<T> = Result<T, NetworkError>;
