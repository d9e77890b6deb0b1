use crate::engine::{NegotiationEngine, NegotiationState};
use crate::error::NegotiationError;
use crate::provider::{MediaProvider, PeerConnection, PeerConnectionFactory};
use duet_core::{ClientMessage, Role};
use tracing::{debug, info};

impl<M, F> NegotiationEngine<M, F>
where
    M: MediaProvider,
    F: PeerConnectionFactory<M::Track>,
{
    /// Takes up the role the relay assigned. The initiator builds its peer
    /// connection right away and waits for someone to offer to; the joiner
    /// waits for that offer.
    pub async fn begin(&mut self, role: Role) -> Result<(), NegotiationError> {
        if self.media.is_none() {
            return Err(NegotiationError::NoLocalMedia);
        }

        if self.role == Some(role)
            && !matches!(
                self.state,
                NegotiationState::Idle | NegotiationState::AwaitingLocalMedia | NegotiationState::Ready
            )
        {
            debug!("Already negotiating as {:?}", role);
            return Ok(());
        }

        self.role = Some(role);

        match role {
            Role::Initiator => {
                if self.pc.is_none() {
                    self.create_pc().await?;
                }
                self.state = NegotiationState::Ready;
                info!("Waiting for a peer to join");
            }
            Role::Joiner => {
                self.state = NegotiationState::AwaitingOffer;
                info!("Waiting for an offer");
            }
        }

        Ok(())
    }

    /// Initiator side: create the offer, apply it locally and send it.
    pub async fn start_offer(&mut self) -> Result<(), NegotiationError> {
        if self.role != Some(Role::Initiator) || self.state != NegotiationState::Ready {
            return Err(NegotiationError::OutOfOrder {
                message: "offer request",
                state: self.state,
            });
        }

        if self.pc.is_none() {
            self.create_pc().await?;
        }
        let pc = self.pc.as_ref().ok_or(NegotiationError::NoPeerConnection)?;

        let offer = pc
            .create_offer()
            .await
            .map_err(NegotiationError::CreateOffer)?;
        pc.set_local_description(offer.clone())
            .await
            .map_err(NegotiationError::CreateOffer)?;

        info!("Sending offer");
        self.send(ClientMessage::Offer(serde_json::to_value(&offer)?))?;
        self.state = NegotiationState::OfferSent;

        Ok(())
    }

    pub async fn on_peer_joined(&mut self) -> Result<(), NegotiationError> {
        match (self.role, self.state) {
            (Some(Role::Initiator), NegotiationState::Ready) => self.start_offer().await,
            (role, state) => {
                debug!("Peer joined while {:?} as {:?}; nothing to send", state, role);
                Ok(())
            }
        }
    }

    /// The other side is gone. Drop the half of the call that belonged to
    /// it and, being the only member left, get ready to offer to whoever
    /// joins next.
    pub async fn on_peer_left(&mut self) -> Result<(), NegotiationError> {
        self.teardown_pc().await;

        if self.media.is_none() {
            self.state = NegotiationState::Idle;
            return Ok(());
        }

        self.state = NegotiationState::Ready;
        self.begin(Role::Initiator).await
    }
}
