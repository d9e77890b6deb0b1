//! webrtc-rs backed implementations of the client's capability traits.

mod media;
mod peer_connection;

pub use media::*;
pub use peer_connection::*;
