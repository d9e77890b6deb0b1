use crate::engine::{NegotiationEngine, NegotiationState};
use crate::error::NegotiationError;
use crate::media::LocalMedia;
use crate::provider::{MediaProvider, PeerConnectionFactory};
use tracing::{error, info};

impl<M, F> NegotiationEngine<M, F>
where
    M: MediaProvider,
    F: PeerConnectionFactory<M::Track>,
{
    /// Obtains the local capture. Media is acquired once per engine and
    /// reused by every negotiation it runs.
    pub async fn acquire_media(&mut self) -> Result<(), NegotiationError> {
        if self.media.is_some() {
            if self.state == NegotiationState::Idle {
                self.state = NegotiationState::Ready;
            }
            return Ok(());
        }

        self.state = NegotiationState::AwaitingLocalMedia;

        match self.media_provider.acquire(self.config.constraints).await {
            Ok(tracks) => {
                info!("Acquired {} local track(s)", tracks.len());
                self.media = Some(LocalMedia::new(tracks));
                self.state = NegotiationState::Ready;
                Ok(())
            }
            Err(e) => {
                error!("Error accessing media devices: {:#}", e);
                self.state = NegotiationState::Idle;
                Err(NegotiationError::Media(e))
            }
        }
    }
}
