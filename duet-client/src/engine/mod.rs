use crate::error::NegotiationError;
use crate::media::LocalMedia;
use crate::provider::{
    MediaConstraints, MediaProvider, PeerConnectionFactory, RemoteTrackInfo, SignalSink,
    TaggedPeerEvent,
};
use duet_core::utils::{DEFAULT_STUN_ADDR, DEFAULT_STUN_ADDR_2};
use duet_core::{ClientMessage, IceCandidate, IceServerConfig, Role, RoomId};
use std::sync::Arc;
use tokio::sync::mpsc;

mod acquire_media_impl;
mod controls_impl;
mod create_pc_impl;
mod handle_remote_answer_impl;
mod handle_remote_candidate_impl;
mod handle_remote_offer_impl;
mod handle_signal_impl;
mod init_connection_impl;

/// Remote candidates held while there is no remote description to apply
/// them to. Anything beyond this is dropped.
pub const MAX_PENDING_CANDIDATES: usize = 64;

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Used until the server sends its own list; public STUN if both are empty.
    pub ice_servers: Option<Vec<IceServerConfig>>,
    pub constraints: MediaConstraints,
}

/// Progress of one negotiation. `Connected` means both descriptions are
/// exchanged; whether media actually flows is up to the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationState {
    Idle,
    AwaitingLocalMedia,
    Ready,
    OfferSent,
    AwaitingOffer,
    Connected,
}

/// What the engine surfaces to whoever renders the call.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    RoomJoined { room_id: RoomId, role: Role },
    PeerJoined,
    PeerLeft,
    RemoteTrack(RemoteTrackInfo),
    Negotiated,
    Alert(String),
}

/// Offer/answer/candidate state machine for one client.
///
/// All state is owned here and mutated through `&mut self`; the only thing
/// shared with the peer connection's callbacks is the event queue handed out
/// by [`NegotiationEngine::new`].
pub struct NegotiationEngine<M, F>
where
    M: MediaProvider,
    F: PeerConnectionFactory<M::Track>,
{
    media_provider: M,
    factory: F,
    signal: Arc<dyn SignalSink>,
    peer_events: mpsc::UnboundedSender<TaggedPeerEvent>,
    config: EngineConfig,
    state: NegotiationState,
    role: Option<Role>,
    room_id: Option<RoomId>,
    media: Option<LocalMedia<M::Track>>,
    pc: Option<F::Connection>,
    /// Bumped for every peer connection built; events from older ones are stale.
    generation: u64,
    remote_description_set: bool,
    pending_candidates: Vec<IceCandidate>,
}

impl<M, F> NegotiationEngine<M, F>
where
    M: MediaProvider,
    F: PeerConnectionFactory<M::Track>,
{
    pub fn new(
        media_provider: M,
        factory: F,
        signal: Arc<dyn SignalSink>,
        config: EngineConfig,
    ) -> (Self, mpsc::UnboundedReceiver<TaggedPeerEvent>) {
        let (peer_events, peer_events_rx) = mpsc::unbounded_channel();

        let engine = Self {
            media_provider,
            factory,
            signal,
            peer_events,
            config,
            state: NegotiationState::Idle,
            role: None,
            room_id: None,
            media: None,
            pc: None,
            generation: 0,
            remote_description_set: false,
            pending_candidates: Vec::new(),
        };

        (engine, peer_events_rx)
    }

    pub fn state(&self) -> NegotiationState {
        self.state
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn room_id(&self) -> Option<&RoomId> {
        self.room_id.as_ref()
    }

    pub fn local_media(&self) -> Option<&LocalMedia<M::Track>> {
        self.media.as_ref()
    }

    pub fn has_peer_connection(&self) -> bool {
        self.pc.is_some()
    }

    /// Generation of the current peer connection, 0 before the first one.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pending_candidates(&self) -> usize {
        self.pending_candidates.len()
    }

    pub fn set_ice_servers(&mut self, ice_servers: Vec<IceServerConfig>) {
        self.config.ice_servers = Some(ice_servers);
    }

    /// Acquires local media, then asks the relay for a seat in `room_id`.
    /// Nothing is sent if media cannot be acquired.
    pub async fn join_room(&mut self, room_id: RoomId) -> Result<(), NegotiationError> {
        self.acquire_media().await?;
        self.room_id = Some(room_id.clone());
        self.send(ClientMessage::JoinRoom(room_id))
    }

    fn ice_servers(&self) -> Vec<IceServerConfig> {
        match &self.config.ice_servers {
            Some(servers) if !servers.is_empty() => servers.clone(),
            _ => vec![IceServerConfig {
                urls: vec![DEFAULT_STUN_ADDR.to_owned(), DEFAULT_STUN_ADDR_2.to_owned()],
                username: None,
                credential: None,
            }],
        }
    }

    fn send(&self, msg: ClientMessage) -> Result<(), NegotiationError> {
        self.signal.send(msg)?;
        Ok(())
    }
}
