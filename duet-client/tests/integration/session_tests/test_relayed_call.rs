use duet_client::{EngineEvent, NegotiationError};
use duet_core::{Role, RoomId};

use crate::integration::init_tracing;
use crate::utils::{MockMediaProvider, MockPeerFactory, RelayHarness, TEST_ROOM, eventually};

#[tokio::test]
async fn test_two_sessions_negotiate_through_the_relay() {
    init_tracing();

    let harness = RelayHarness::new();

    let mut alice = harness
        .connect(
            TEST_ROOM,
            MockMediaProvider::new(),
            MockPeerFactory::new("alice").trickling(),
        )
        .await
        .unwrap();
    let joined = alice
        .wait_for(|e| matches!(e, EngineEvent::RoomJoined { .. }))
        .await;
    assert_eq!(
        joined,
        EngineEvent::RoomJoined {
            room_id: RoomId::from(TEST_ROOM),
            role: Role::Initiator,
        }
    );

    let mut bob = harness
        .connect(
            TEST_ROOM,
            MockMediaProvider::new(),
            MockPeerFactory::new("bob").trickling(),
        )
        .await
        .unwrap();
    let joined = bob
        .wait_for(|e| matches!(e, EngineEvent::RoomJoined { .. }))
        .await;
    assert!(matches!(
        joined,
        EngineEvent::RoomJoined {
            role: Role::Joiner,
            ..
        }
    ));

    alice.wait_for(|e| *e == EngineEvent::PeerJoined).await;
    alice.wait_for(|e| *e == EngineEvent::Negotiated).await;
    bob.wait_for(|e| *e == EngineEvent::Negotiated).await;

    let (alice_peers, bob_peers) = (alice.peers.clone(), bob.peers.clone());
    assert!(eventually(|| alice_peers.candidates_added() == vec!["bob-0"]).await);
    assert!(eventually(|| bob_peers.candidates_added() == vec!["alice-0"]).await);
}

#[tokio::test]
async fn test_denied_media_raises_an_alert_and_never_joins() {
    init_tracing();

    let harness = RelayHarness::new();

    let (err, mut handle) = match harness
        .connect(
            TEST_ROOM,
            MockMediaProvider::denying(),
            MockPeerFactory::new("carol"),
        )
        .await
    {
        Ok(_) => panic!("join should have failed"),
        Err(failure) => failure,
    };

    assert!(matches!(err, NegotiationError::Media(_)));
    assert!(matches!(
        handle.wait_for(|e| matches!(e, EngineEvent::Alert(_))).await,
        EngineEvent::Alert(_)
    ));
    assert_eq!(harness.relay.registry().room_count(), 0);
}
