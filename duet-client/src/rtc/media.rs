use crate::provider::{LocalTrack, MediaConstraints, MediaProvider, TrackKind};
use anyhow::{Result, bail};
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use webrtc::api::media_engine::{MIME_TYPE_OPUS, MIME_TYPE_VP8};
use webrtc::media::Sample;
use webrtc::rtp_transceiver::rtp_codec::RTCRtpCodecCapability;
use webrtc::track::track_local::TrackLocal;
use webrtc::track::track_local::track_local_static_sample::TrackLocalStaticSample;

/// Local track the application feeds with encoded samples.
///
/// While disabled (muted) samples are dropped; the track stays negotiated.
pub struct RtcTrack {
    kind: TrackKind,
    track: Arc<TrackLocalStaticSample>,
    enabled: AtomicBool,
    stopped: AtomicBool,
}

impl RtcTrack {
    pub fn new(kind: TrackKind, stream_id: &str) -> Self {
        let (mime_type, id) = match kind {
            TrackKind::Audio => (MIME_TYPE_OPUS, "audio"),
            TrackKind::Video => (MIME_TYPE_VP8, "video"),
        };

        let track = Arc::new(TrackLocalStaticSample::new(
            RTCRtpCodecCapability {
                mime_type: mime_type.to_owned(),
                ..Default::default()
            },
            id.to_owned(),
            stream_id.to_owned(),
        ));

        Self {
            kind,
            track,
            enabled: AtomicBool::new(true),
            stopped: AtomicBool::new(false),
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    pub(crate) fn as_track_local(&self) -> Arc<dyn TrackLocal + Send + Sync> {
        self.track.clone()
    }

    /// Writes one encoded frame. Returns `false` when the frame was dropped
    /// because the track is muted.
    pub async fn write_sample(&self, data: Bytes, duration: Duration) -> Result<bool> {
        if self.is_stopped() {
            bail!("{:?} track is stopped", self.kind);
        }
        if !self.is_enabled() {
            return Ok(false);
        }

        self.track
            .write_sample(&Sample {
                data,
                duration,
                ..Default::default()
            })
            .await?;
        Ok(true)
    }
}

impl LocalTrack for RtcTrack {
    fn kind(&self) -> TrackKind {
        self.kind
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }

    fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }
}

/// Hands out one Opus and/or one VP8 sample track per acquisition.
#[derive(Debug, Clone)]
pub struct StaticMediaProvider {
    stream_id: String,
}

impl StaticMediaProvider {
    pub fn new(stream_id: impl Into<String>) -> Self {
        Self {
            stream_id: stream_id.into(),
        }
    }
}

impl Default for StaticMediaProvider {
    fn default() -> Self {
        Self::new("duet")
    }
}

#[async_trait]
impl MediaProvider for StaticMediaProvider {
    type Track = RtcTrack;

    async fn acquire(&self, constraints: MediaConstraints) -> Result<Vec<RtcTrack>> {
        if !constraints.audio && !constraints.video {
            bail!("no media requested");
        }

        let mut tracks = Vec::new();
        if constraints.audio {
            tracks.push(RtcTrack::new(TrackKind::Audio, &self.stream_id));
        }
        if constraints.video {
            tracks.push(RtcTrack::new(TrackKind::Video, &self.stream_id));
        }
        Ok(tracks)
    }
}
