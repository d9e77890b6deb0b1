use crate::model::connection::ConnectionId;
use crate::model::room::{Role, RoomId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}

impl IceServerConfig {
    pub fn stun(url: impl Into<String>) -> Self {
        Self {
            urls: vec![url.into()],
            username: None,
            credential: None,
        }
    }
}

/// Messages a client sends to the relay.
///
/// Negotiation payloads stay as raw JSON: the relay forwards them without
/// looking inside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientMessage {
    JoinRoom(RoomId),
    Offer(Value),
    Answer(Value),
    IceCandidate(Value),
}

impl ClientMessage {
    /// Splits a relayable message into its kind and payload. `join-room` is
    /// handled by the relay itself and yields `None`.
    pub fn into_signal(self) -> Option<(SignalKind, Value)> {
        match self {
            ClientMessage::JoinRoom(_) => None,
            ClientMessage::Offer(payload) => Some((SignalKind::Offer, payload)),
            ClientMessage::Answer(payload) => Some((SignalKind::Answer, payload)),
            ClientMessage::IceCandidate(payload) => Some((SignalKind::IceCandidate, payload)),
        }
    }
}

/// Messages the relay sends to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerMessage {
    Welcome {
        connection_id: ConnectionId,
    },
    IceConfig {
        ice_servers: Vec<IceServerConfig>,
    },
    RoomJoined {
        room_id: RoomId,
        role: Role,
    },
    UserConnected,
    UserDisconnected,
    Offer(Value),
    Answer(Value),
    IceCandidate(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    Offer,
    Answer,
    IceCandidate,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Offer => "offer",
            SignalKind::Answer => "answer",
            SignalKind::IceCandidate => "ice-candidate",
        }
    }

    pub fn into_client_message(self, payload: Value) -> ClientMessage {
        match self {
            SignalKind::Offer => ClientMessage::Offer(payload),
            SignalKind::Answer => ClientMessage::Answer(payload),
            SignalKind::IceCandidate => ClientMessage::IceCandidate(payload),
        }
    }

    pub fn into_server_message(self, payload: Value) -> ServerMessage {
        match self {
            SignalKind::Offer => ServerMessage::Offer(payload),
            SignalKind::Answer => ServerMessage::Answer(payload),
            SignalKind::IceCandidate => ServerMessage::IceCandidate(payload),
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
