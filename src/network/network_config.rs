use std::time::Duration;

use crate::network::network_error::NetworkError;

/// Settings shared by all socket wrappers. The defaults are tuned for a companion computer talking
///  to a ground station over a local link.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    /// Upper bound for every blocking step: establishing a connection, accepting one, and each
    ///  individual read / datagram receive. Must be non-zero.
    pub connection_timeout: Duration,

    /// Maximum payload of a single datagram when a buffer is sent in chunks. This must fit into
    ///  the receiver's socket buffer; on small devices it may need to be reduced.
    pub chunk_size: usize,

    /// Pause after each chunk so a slow receiver's socket buffer is not overrun
    pub send_delay: Duration,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            connection_timeout: Duration::from_secs(60),
            chunk_size: 32 * 1024,
            send_delay: Duration::from_micros(100),
        }
    }
}

impl NetworkConfig {
    pub fn with_timeout(connection_timeout: Duration) -> NetworkConfig {
        NetworkConfig {
            connection_timeout,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), NetworkError> {
        if self.connection_timeout.is_zero() {
            return Err(NetworkError::InvalidConfig("connection timeout must be positive".to_string()));
        }
        if self.chunk_size == 0 {
            return Err(NetworkError::InvalidConfig("chunk size must be positive".to_string()));
        }
        Ok(())
    }
}
