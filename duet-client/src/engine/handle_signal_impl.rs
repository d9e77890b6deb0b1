use crate::engine::{EngineEvent, NegotiationEngine};
use crate::error::NegotiationError;
use crate::provider::{MediaProvider, PeerConnectionFactory, PeerEvent, TaggedPeerEvent};
use duet_core::{ClientMessage, ServerMessage};
use tracing::{debug, info};

impl<M, F> NegotiationEngine<M, F>
where
    M: MediaProvider,
    F: PeerConnectionFactory<M::Track>,
{
    /// Advances the negotiation with one message from the relay. Messages
    /// must be fed one at a time, each awaited before the next.
    pub async fn handle_signal(&mut self, msg: ServerMessage) -> Result<(), NegotiationError> {
        match msg {
            ServerMessage::Welcome { connection_id } => {
                debug!("Relay assigned connection id {}", connection_id);
                Ok(())
            }

            ServerMessage::IceConfig { ice_servers } => {
                info!("Received ICE config: {} server(s)", ice_servers.len());
                self.set_ice_servers(ice_servers);
                Ok(())
            }

            ServerMessage::RoomJoined { room_id, role } => {
                info!("Joined room '{}' as {:?}", room_id, role);
                self.room_id = Some(room_id);
                self.begin(role).await
            }

            ServerMessage::UserConnected => {
                info!("Peer joined the room");
                self.on_peer_joined().await
            }

            ServerMessage::UserDisconnected => {
                info!("Peer left the room");
                self.on_peer_left().await
            }

            ServerMessage::Offer(payload) => {
                info!("Received offer");
                let offer = serde_json::from_value(payload)?;
                self.handle_remote_offer(offer).await
            }

            ServerMessage::Answer(payload) => {
                info!("Received answer");
                let answer = serde_json::from_value(payload)?;
                self.handle_remote_answer(answer).await
            }

            ServerMessage::IceCandidate(payload) => {
                let candidate = serde_json::from_value(payload)?;
                self.handle_remote_candidate(candidate).await
            }
        }
    }

    /// Reacts to a callback of the live peer connection. Local candidates go
    /// out immediately, one message each. Events raised by a connection that
    /// has since been closed or replaced are dropped.
    pub fn handle_peer_event(
        &mut self,
        tagged: TaggedPeerEvent,
    ) -> Result<Option<EngineEvent>, NegotiationError> {
        if self.pc.is_none() || tagged.generation != self.generation {
            debug!(
                "Dropping event of discarded peer connection #{} (current #{})",
                tagged.generation, self.generation
            );
            return Ok(None);
        }

        match tagged.event {
            PeerEvent::LocalCandidate(candidate) => {
                self.send(ClientMessage::IceCandidate(serde_json::to_value(&candidate)?))?;
                Ok(None)
            }
            PeerEvent::RemoteTrack(track) => {
                info!("Remote {:?} track '{}' arrived", track.kind, track.id);
                Ok(Some(EngineEvent::RemoteTrack(track)))
            }
        }
    }
}
