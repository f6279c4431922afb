//! Compact telemetry records and the socket plumbing that carries them.
//!
//! [encoding] turns positions and metadata into short, base64-armored records tagged with the
//!  worker that produced them; [network] moves arbitrary byte buffers over TCP, or over UDP in
//!  paced chunks that are reassembled on the receiving side.

pub mod encoding;
pub mod network;
