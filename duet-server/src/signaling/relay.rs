use crate::room::{JoinOutcome, LeaveOutcome, RoomRegistry};
use crate::signaling::SignalOutput;
use duet_core::{ClientMessage, ConnectionId, RoomId, ServerMessage, SignalKind};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Routes client messages to the other members of the sender's room.
///
/// Payloads are forwarded as-is; nothing is validated, deduplicated or
/// acknowledged. Every call runs to completion without waiting on anything.
#[derive(Clone)]
pub struct Relay {
    registry: RoomRegistry,
    output: Arc<dyn SignalOutput>,
}

impl Relay {
    pub fn new(output: Arc<dyn SignalOutput>) -> Self {
        Self::with_registry(RoomRegistry::new(), output)
    }

    pub fn with_registry(registry: RoomRegistry, output: Arc<dyn SignalOutput>) -> Self {
        Self { registry, output }
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    pub fn dispatch(&self, connection_id: &ConnectionId, msg: ClientMessage) {
        match msg {
            ClientMessage::JoinRoom(room_id) => {
                self.join(connection_id, room_id);
            }
            other => {
                if let Some((kind, payload)) = other.into_signal() {
                    self.relay(connection_id, kind, payload);
                }
            }
        }
    }

    pub fn join(&self, connection_id: &ConnectionId, room_id: RoomId) -> JoinOutcome {
        let outcome = self.registry.join(connection_id, room_id);

        if let Some(previous) = &outcome.previous {
            info!("{} moved out of room '{}'", connection_id, previous.room_id);
            self.notify_left(previous);
        }

        if !outcome.rejoined {
            info!(
                "{} joined room '{}' as {:?} ({} already there)",
                connection_id,
                outcome.room_id,
                outcome.role,
                outcome.peers.len()
            );
            for peer in &outcome.peers {
                self.output.deliver(peer, ServerMessage::UserConnected);
            }
        }

        self.output.deliver(
            connection_id,
            ServerMessage::RoomJoined {
                room_id: outcome.room_id.clone(),
                role: outcome.role,
            },
        );

        outcome
    }

    /// Forwards to everyone else in the sender's room and returns how many
    /// deliveries were attempted. A sender without a room is ignored.
    pub fn relay(&self, connection_id: &ConnectionId, kind: SignalKind, payload: Value) -> usize {
        let Some((room_id, peers)) = self.registry.peers_of(connection_id) else {
            debug!("Dropping {} from {}: not in a room", kind, connection_id);
            return 0;
        };

        debug!(
            "Relaying {} from {} to {} peer(s) in '{}'",
            kind,
            connection_id,
            peers.len(),
            room_id
        );

        for peer in &peers {
            self.output
                .deliver(peer, kind.into_server_message(payload.clone()));
        }

        peers.len()
    }

    pub fn leave(&self, connection_id: &ConnectionId) -> Option<LeaveOutcome> {
        let outcome = self.registry.leave(connection_id)?;
        info!("{} left room '{}'", connection_id, outcome.room_id);
        self.notify_left(&outcome);
        Some(outcome)
    }

    fn notify_left(&self, outcome: &LeaveOutcome) {
        for peer in &outcome.remaining {
            self.output.deliver(peer, ServerMessage::UserDisconnected);
        }
    }
}
