use crate::engine::{NegotiationEngine, NegotiationState};
use crate::error::NegotiationError;
use crate::provider::{MediaProvider, PeerConnection, PeerConnectionFactory};
use anyhow::anyhow;
use duet_core::{ClientMessage, Role, SdpType, SessionDescription};
use tracing::info;

impl<M, F> NegotiationEngine<M, F>
where
    M: MediaProvider,
    F: PeerConnectionFactory<M::Track>,
{
    /// Responder side: apply the offer, answer it, and send the answer.
    pub async fn handle_remote_offer(
        &mut self,
        offer: SessionDescription,
    ) -> Result<(), NegotiationError> {
        match self.state {
            NegotiationState::Ready | NegotiationState::AwaitingOffer => {}
            NegotiationState::OfferSent => return Err(NegotiationError::Glare),
            state => {
                return Err(NegotiationError::OutOfOrder {
                    message: "offer",
                    state,
                });
            }
        }

        if offer.kind != SdpType::Offer {
            return Err(NegotiationError::Description(anyhow!(
                "expected an offer, got {:?}",
                offer.kind
            )));
        }

        if self.pc.is_none() {
            self.create_pc().await?;
        }
        let pc = self.pc.as_ref().ok_or(NegotiationError::NoPeerConnection)?;

        pc.set_remote_description(offer)
            .await
            .map_err(NegotiationError::Description)?;
        self.remote_description_set = true;

        let pending = std::mem::take(&mut self.pending_candidates);
        Self::apply_candidates(pc, pending).await;

        let answer = pc
            .create_answer()
            .await
            .map_err(NegotiationError::CreateAnswer)?;
        pc.set_local_description(answer.clone())
            .await
            .map_err(NegotiationError::Description)?;

        info!("Sending answer");
        self.send(ClientMessage::Answer(serde_json::to_value(&answer)?))?;

        if self.role.is_none() {
            self.role = Some(Role::Joiner);
        }
        self.state = NegotiationState::Connected;

        Ok(())
    }
}
