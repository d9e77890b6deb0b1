use duet_core::{ConnectionId, ServerMessage};

/// Implemented by whatever owns the client sockets so the relay can reach
/// the members of a room.
///
/// Delivery is fire-and-forget: a message for a connection that is already
/// gone is dropped without telling the sender.
pub trait SignalOutput: Send + Sync {
    /// Queues `msg` for one connection.
    fn deliver(&self, connection_id: &ConnectionId, msg: ServerMessage);
}
