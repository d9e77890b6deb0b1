use crate::engine::NegotiationState;
use crate::provider::TrackKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignalError {
    #[error("signaling channel closed")]
    Closed,
}

#[derive(Debug, Error)]
pub enum NegotiationError {
    #[error("failed to acquire local media: {0:#}")]
    Media(anyhow::Error),

    #[error("local media has not been acquired")]
    NoLocalMedia,

    #[error("no {0:?} track was captured")]
    MissingTrack(TrackKind),

    #[error("no peer connection")]
    NoPeerConnection,

    #[error("failed to create peer connection: {0:#}")]
    CreatePeerConnection(anyhow::Error),

    #[error("failed to create offer: {0:#}")]
    CreateOffer(anyhow::Error),

    #[error("failed to create answer: {0:#}")]
    CreateAnswer(anyhow::Error),

    #[error("session description rejected: {0:#}")]
    Description(anyhow::Error),

    #[error("ICE candidate rejected: {0:#}")]
    Candidate(anyhow::Error),

    #[error("unexpected {message} while {state:?}")]
    OutOfOrder {
        message: &'static str,
        state: NegotiationState,
    },

    #[error("received an offer while our own offer is outstanding")]
    Glare,

    #[error("malformed signaling payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error(transparent)]
    Signal(#[from] SignalError),
}

impl NegotiationError {
    /// Failures the user has to be told about. Everything else is logged and
    /// the negotiation stays where it was.
    pub fn is_blocking(&self) -> bool {
        matches!(
            self,
            NegotiationError::Media(_) | NegotiationError::CreateOffer(_)
        )
    }
}
