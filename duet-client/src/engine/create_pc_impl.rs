use crate::engine::NegotiationEngine;
use crate::error::NegotiationError;
use crate::provider::{MediaProvider, PeerConnection, PeerConnectionFactory, PeerEventSender};
use tracing::{debug, warn};

impl<M, F> NegotiationEngine<M, F>
where
    M: MediaProvider,
    F: PeerConnectionFactory<M::Track>,
{
    pub(crate) async fn create_pc(&mut self) -> Result<(), NegotiationError> {
        let Some(media) = &self.media else {
            return Err(NegotiationError::NoLocalMedia);
        };

        let ice_servers = self.ice_servers();
        self.generation += 1;
        let events = PeerEventSender::new(self.generation, self.peer_events.clone());
        let pc = self
            .factory
            .create(&ice_servers, events)
            .await
            .map_err(NegotiationError::CreatePeerConnection)?;

        for track in media.tracks() {
            if let Err(e) = pc.add_track(track).await {
                if let Err(close_err) = pc.close().await {
                    warn!("Failed to close half-built peer connection: {:#}", close_err);
                }
                return Err(NegotiationError::CreatePeerConnection(e));
            }
        }

        debug!(
            "Peer connection #{} created with {} track(s), {} ICE server entr(ies)",
            self.generation,
            media.tracks().len(),
            ice_servers.len()
        );

        self.pc = Some(pc);
        self.remote_description_set = false;
        Ok(())
    }

    /// Closes and forgets the current peer connection along with anything
    /// buffered for it.
    pub(crate) async fn teardown_pc(&mut self) {
        if let Some(pc) = self.pc.take() {
            if let Err(e) = pc.close().await {
                warn!("Error closing peer connection: {:#}", e);
            }
        }

        if !self.pending_candidates.is_empty() {
            debug!(
                "Discarding {} buffered candidate(s)",
                self.pending_candidates.len()
            );
            self.pending_candidates.clear();
        }
        self.remote_description_set = false;
    }
}
