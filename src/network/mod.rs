//! Blocking-with-timeout socket wrappers for moving encoded telemetry between the airside and the
//!  ground station.
//!
//! * TCP: ordered and reliable, the wrappers add exact-length receives and explicit close
//! * UDP: size-bounded and unordered, the wrappers add chunking with pacing on the sending side
//!    and reassembly to an agreed size on the receiving side
//!
//! Neither adds retransmission, encryption or any framing of its own. Every blocking step is
//!  bounded by [network_config::NetworkConfig::connection_timeout]; expiry is reported, never
//!  retried.

pub mod address;
pub mod network_config;
pub mod network_error;
pub mod tcp;
pub mod udp;

pub use network_config::NetworkConfig;
pub use network_error::{NetworkError, NetworkResult};
pub use tcp::tcp_client_socket::TcpClientSocket;
pub use tcp::tcp_server_socket::TcpServerSocket;
pub use tcp::tcp_socket::TcpSocket;
pub use udp::udp_client_socket::UdpClientSocket;
pub use udp::udp_server_socket::UdpServerSocket;
pub use udp::udp_socket::UdpSocket;
