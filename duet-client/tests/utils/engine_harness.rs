use crate::utils::{MockMediaProvider, MockPeerFactory};
use duet_client::{
    EngineConfig, EngineEvent, NegotiationEngine, NegotiationError, PeerEvent, TaggedPeerEvent,
};
use duet_core::{ClientMessage, IceCandidate, Role, RoomId, ServerMessage, SessionDescription};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;

pub const TEST_ROOM: &str = "abc123";

pub type TestEngine = NegotiationEngine<MockMediaProvider, MockPeerFactory>;

/// One engine wired to mocks, with its outbound messages captured.
pub struct EngineHarness {
    pub engine: TestEngine,
    pub peer_events: mpsc::UnboundedReceiver<TaggedPeerEvent>,
    pub outbound: mpsc::UnboundedReceiver<ClientMessage>,
    pub media: MockMediaProvider,
    pub peers: MockPeerFactory,
}

impl EngineHarness {
    pub fn new(name: &str) -> Self {
        Self::with(MockMediaProvider::new(), MockPeerFactory::new(name))
    }

    pub fn with(media: MockMediaProvider, peers: MockPeerFactory) -> Self {
        let (tx, outbound) = mpsc::unbounded_channel();
        let (engine, peer_events) = NegotiationEngine::new(
            media.clone(),
            peers.clone(),
            Arc::new(tx),
            EngineConfig::default(),
        );

        Self {
            engine,
            peer_events,
            outbound,
            media,
            peers,
        }
    }

    /// Joined `TEST_ROOM` with the given role; join traffic already drained.
    pub async fn joined(name: &str, role: Role) -> Self {
        Self::joined_with(MockPeerFactory::new(name), role).await
    }

    pub async fn joined_with(peers: MockPeerFactory, role: Role) -> Self {
        let mut harness = Self::with(MockMediaProvider::new(), peers);
        harness
            .engine
            .join_room(RoomId::from(TEST_ROOM))
            .await
            .unwrap();
        harness
            .engine
            .handle_signal(ServerMessage::RoomJoined {
                room_id: RoomId::from(TEST_ROOM),
                role,
            })
            .await
            .unwrap();
        harness.sent();
        harness
    }

    /// Drains everything the engine has sent so far.
    pub fn sent(&mut self) -> Vec<ClientMessage> {
        let mut sent = Vec::new();
        while let Ok(msg) = self.outbound.try_recv() {
            sent.push(msg);
        }
        sent
    }

    /// Feeds `event` as if the current peer connection raised it.
    pub fn raise(&mut self, event: PeerEvent) -> Result<Option<EngineEvent>, NegotiationError> {
        let generation = self.engine.generation();
        self.engine
            .handle_peer_event(TaggedPeerEvent { generation, event })
    }

    /// Feeds every queued peer-connection event to the engine, in order.
    pub fn pump_peer_events(&mut self) {
        while let Ok(tagged) = self.peer_events.try_recv() {
            self.engine.handle_peer_event(tagged).unwrap();
        }
    }

    pub async fn deliver(&mut self, msg: ServerMessage) {
        self.engine.handle_signal(msg).await.unwrap();
    }
}

/// Turns what one client sent into what the relay hands the other one.
pub fn relayed(msg: ClientMessage) -> ServerMessage {
    let (kind, payload) = msg.into_signal().expect("not a relayed message");
    kind.into_server_message(payload)
}

pub fn offer(sdp: &str) -> ServerMessage {
    ServerMessage::Offer(to_value(&SessionDescription::offer(sdp)))
}

pub fn answer(sdp: &str) -> ServerMessage {
    ServerMessage::Answer(to_value(&SessionDescription::answer(sdp)))
}

pub fn candidate(candidate: &str) -> ServerMessage {
    ServerMessage::IceCandidate(to_value(&IceCandidate::new(candidate)))
}

fn to_value<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap()
}
