use crate::engine::NegotiationEngine;
use crate::error::NegotiationError;
use crate::provider::{LocalTrack, MediaProvider, PeerConnectionFactory, TrackKind};
use tracing::info;

impl<M, F> NegotiationEngine<M, F>
where
    M: MediaProvider,
    F: PeerConnectionFactory<M::Track>,
{
    /// Mute/unmute controls only work once local media exists.
    pub fn controls_enabled(&self) -> bool {
        self.media.is_some()
    }

    pub fn toggle_audio(&self) -> Result<bool, NegotiationError> {
        self.toggle(TrackKind::Audio)
    }

    pub fn toggle_video(&self) -> Result<bool, NegotiationError> {
        self.toggle(TrackKind::Video)
    }

    pub fn is_enabled(&self, kind: TrackKind) -> Option<bool> {
        self.media.as_ref()?.track(kind).map(|track| track.is_enabled())
    }

    // Local only: no renegotiation, nothing goes over the wire.
    fn toggle(&self, kind: TrackKind) -> Result<bool, NegotiationError> {
        let media = self.media.as_ref().ok_or(NegotiationError::NoLocalMedia)?;
        let enabled = media
            .toggle(kind)
            .ok_or(NegotiationError::MissingTrack(kind))?;

        info!("{:?} {}", kind, if enabled { "enabled" } else { "disabled" });
        Ok(enabled)
    }
}
