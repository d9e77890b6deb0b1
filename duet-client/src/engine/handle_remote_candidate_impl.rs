use crate::engine::{MAX_PENDING_CANDIDATES, NegotiationEngine};
use crate::error::NegotiationError;
use crate::provider::{MediaProvider, PeerConnection, PeerConnectionFactory};
use duet_core::IceCandidate;
use tracing::{debug, warn};

impl<M, F> NegotiationEngine<M, F>
where
    M: MediaProvider,
    F: PeerConnectionFactory<M::Track>,
{
    /// Applies a remote candidate, or holds on to it until there is a peer
    /// connection with a remote description to apply it to.
    pub async fn handle_remote_candidate(
        &mut self,
        candidate: IceCandidate,
    ) -> Result<(), NegotiationError> {
        match self.pc.as_ref() {
            Some(pc) if self.remote_description_set => {
                debug!("Adding ICE: {}", candidate.candidate);
                pc.add_ice_candidate(candidate)
                    .await
                    .map_err(NegotiationError::Candidate)
            }
            _ if self.pending_candidates.len() >= MAX_PENDING_CANDIDATES => {
                warn!(
                    "Candidate buffer full ({}), dropping {}",
                    MAX_PENDING_CANDIDATES, candidate.candidate
                );
                Ok(())
            }
            _ => {
                debug!("Buffering ICE until the remote description is set");
                self.pending_candidates.push(candidate);
                Ok(())
            }
        }
    }

    pub(super) async fn apply_candidates(pc: &F::Connection, candidates: Vec<IceCandidate>) {
        if candidates.is_empty() {
            return;
        }

        debug!("Flushing {} buffered candidate(s)", candidates.len());
        for candidate in candidates {
            if let Err(e) = pc.add_ice_candidate(candidate).await {
                warn!("Error adding buffered ICE candidate: {:#}", e);
            }
        }
    }
}
