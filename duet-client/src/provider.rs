//! Seams to the capabilities the engine drives but does not implement:
//! local media capture, the peer connection itself, and the signaling pipe.

use crate::error::SignalError;
use async_trait::async_trait;
use duet_core::{ClientMessage, IceCandidate, IceServerConfig, SessionDescription};
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    Audio,
    Video,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaConstraints {
    pub video: bool,
    pub audio: bool,
}

impl Default for MediaConstraints {
    fn default() -> Self {
        Self {
            video: true,
            audio: true,
        }
    }
}

/// A captured local track. Enablement is a local switch; flipping it never
/// touches the negotiated session.
pub trait LocalTrack: Send + Sync + 'static {
    fn kind(&self) -> TrackKind;

    fn is_enabled(&self) -> bool;

    fn set_enabled(&self, enabled: bool);

    /// Releases the underlying capture.
    fn stop(&self);
}

#[async_trait]
pub trait MediaProvider: Send + Sync + 'static {
    type Track: LocalTrack;

    async fn acquire(&self, constraints: MediaConstraints) -> anyhow::Result<Vec<Self::Track>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTrackInfo {
    pub id: String,
    pub stream_id: String,
    pub kind: TrackKind,
}

/// Callbacks of a live peer connection, funneled into the engine's queue.
#[derive(Debug, Clone, PartialEq)]
pub enum PeerEvent {
    LocalCandidate(IceCandidate),
    RemoteTrack(RemoteTrackInfo),
}

/// A [`PeerEvent`] stamped with the generation of the connection that
/// raised it.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedPeerEvent {
    pub generation: u64,
    pub event: PeerEvent,
}

/// Handed to each new peer connection; everything it sends carries that
/// connection's generation.
#[derive(Debug, Clone)]
pub struct PeerEventSender {
    generation: u64,
    tx: mpsc::UnboundedSender<TaggedPeerEvent>,
}

impl PeerEventSender {
    pub fn new(generation: u64, tx: mpsc::UnboundedSender<TaggedPeerEvent>) -> Self {
        Self { generation, tx }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns `false` once the engine is gone.
    pub fn send(&self, event: PeerEvent) -> bool {
        self.tx
            .send(TaggedPeerEvent {
                generation: self.generation,
                event,
            })
            .is_ok()
    }
}

#[async_trait]
pub trait PeerConnection<T: LocalTrack>: Send + Sync + 'static {
    async fn add_track(&self, track: &T) -> anyhow::Result<()>;

    async fn create_offer(&self) -> anyhow::Result<SessionDescription>;

    async fn create_answer(&self) -> anyhow::Result<SessionDescription>;

    async fn set_local_description(&self, desc: SessionDescription) -> anyhow::Result<()>;

    async fn set_remote_description(&self, desc: SessionDescription) -> anyhow::Result<()>;

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> anyhow::Result<()>;

    async fn close(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait PeerConnectionFactory<T: LocalTrack>: Send + Sync + 'static {
    type Connection: PeerConnection<T>;

    /// Builds a connection whose candidate and track callbacks feed `events`.
    async fn create(
        &self,
        ice_servers: &[IceServerConfig],
        events: PeerEventSender,
    ) -> anyhow::Result<Self::Connection>;
}

/// Outbound half of the transport channel.
pub trait SignalSink: Send + Sync {
    fn send(&self, msg: ClientMessage) -> Result<(), SignalError>;
}

impl SignalSink for mpsc::UnboundedSender<ClientMessage> {
    fn send(&self, msg: ClientMessage) -> Result<(), SignalError> {
        mpsc::UnboundedSender::send(self, msg).map_err(|_| SignalError::Closed)
    }
}
