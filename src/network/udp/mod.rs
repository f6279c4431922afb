pub mod datagram_transport;
pub mod udp_client_socket;
pub mod udp_server_socket;
pub mod udp_socket;
