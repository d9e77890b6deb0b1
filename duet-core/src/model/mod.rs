mod connection;
mod payload;
mod room;
mod signaling;

pub use connection::ConnectionId;
pub use payload::{IceCandidate, SdpType, SessionDescription};
pub use room::{Role, RoomId};
pub use signaling::{ClientMessage, IceServerConfig, ServerMessage, SignalKind};
