use crate::provider::{LocalTrack, TrackKind};
use tracing::debug;

/// Local capture held for the lifetime of a negotiation engine.
///
/// Dropping it stops every track, so discarding the engine releases the
/// camera and microphone.
pub struct LocalMedia<T: LocalTrack> {
    tracks: Vec<T>,
}

impl<T: LocalTrack> LocalMedia<T> {
    pub fn new(tracks: Vec<T>) -> Self {
        Self { tracks }
    }

    pub fn tracks(&self) -> &[T] {
        &self.tracks
    }

    pub fn track(&self, kind: TrackKind) -> Option<&T> {
        self.tracks.iter().find(|track| track.kind() == kind)
    }

    /// Flips the first track of `kind` and returns its new state, or `None`
    /// if no such track was captured.
    pub fn toggle(&self, kind: TrackKind) -> Option<bool> {
        let track = self.track(kind)?;
        let enabled = !track.is_enabled();
        track.set_enabled(enabled);
        Some(enabled)
    }
}

impl<T: LocalTrack> Drop for LocalMedia<T> {
    fn drop(&mut self) {
        debug!("Releasing {} local track(s)", self.tracks.len());
        for track in &self.tracks {
            track.stop();
        }
    }
}
