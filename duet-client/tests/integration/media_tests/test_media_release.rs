use duet_core::{Role, ServerMessage};

use crate::integration::init_tracing;
use crate::utils::{EngineHarness, PeerCall};

#[tokio::test]
async fn test_dropping_the_engine_stops_every_track() {
    init_tracing();

    let alice = EngineHarness::joined("alice", Role::Initiator).await;
    let media = alice.media.clone();
    assert_eq!(media.track_count(), 2);
    assert!(!media.all_released());

    drop(alice);

    assert!(media.all_released());
}

#[tokio::test]
async fn test_media_is_acquired_once_per_engine() {
    init_tracing();

    let mut alice = EngineHarness::joined("alice", Role::Initiator).await;
    alice.deliver(ServerMessage::UserDisconnected).await;
    alice.deliver(ServerMessage::UserConnected).await;

    assert_eq!(alice.media.acquisitions(), 1);
    assert!(!alice.media.all_released());
}

#[tokio::test]
async fn test_every_track_is_attached_to_the_connection() {
    init_tracing();

    let alice = EngineHarness::joined("alice", Role::Initiator).await;
    let calls = alice.peers.calls();

    assert!(calls.contains(&PeerCall::AddTrack(0, duet_client::TrackKind::Audio)));
    assert!(calls.contains(&PeerCall::AddTrack(0, duet_client::TrackKind::Video)));
}
