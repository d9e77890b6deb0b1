use crate::engine::{NegotiationEngine, NegotiationState};
use crate::error::NegotiationError;
use crate::provider::{MediaProvider, PeerConnection, PeerConnectionFactory};
use anyhow::anyhow;
use duet_core::{SdpType, SessionDescription};
use tracing::info;

impl<M, F> NegotiationEngine<M, F>
where
    M: MediaProvider,
    F: PeerConnectionFactory<M::Track>,
{
    pub async fn handle_remote_answer(
        &mut self,
        answer: SessionDescription,
    ) -> Result<(), NegotiationError> {
        if self.state != NegotiationState::OfferSent {
            return Err(NegotiationError::OutOfOrder {
                message: "answer",
                state: self.state,
            });
        }

        if answer.kind != SdpType::Answer {
            return Err(NegotiationError::Description(anyhow!(
                "expected an answer, got {:?}",
                answer.kind
            )));
        }

        let pc = self.pc.as_ref().ok_or(NegotiationError::NoPeerConnection)?;
        pc.set_remote_description(answer)
            .await
            .map_err(NegotiationError::Description)?;
        self.remote_description_set = true;

        let pending = std::mem::take(&mut self.pending_candidates);
        Self::apply_candidates(pc, pending).await;

        info!("Remote description set (answer)");
        self.state = NegotiationState::Connected;

        Ok(())
    }
}
