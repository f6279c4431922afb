pub mod tcp_client_socket;
pub mod tcp_server_socket;
pub mod tcp_socket;
