use duet_client::{NegotiationState, PeerEvent};
use duet_core::{ClientMessage, IceCandidate, Role, SdpType, SessionDescription};

use crate::integration::init_tracing;
use crate::utils::{EngineHarness, PeerCall, candidate, relayed};

#[tokio::test]
async fn test_initiator_waits_for_a_peer_before_offering() {
    init_tracing();

    let alice = EngineHarness::joined("alice", Role::Initiator).await;

    assert_eq!(alice.engine.state(), NegotiationState::Ready);
    assert_eq!(alice.engine.role(), Some(Role::Initiator));
    assert!(alice.engine.has_peer_connection());
    assert_eq!(alice.peers.created(), 1);
    assert!(alice.peers.position(&PeerCall::CreateOffer(0)).is_none());
}

#[tokio::test]
async fn test_joiner_waits_for_the_offer_without_a_connection() {
    init_tracing();

    let bob = EngineHarness::joined("bob", Role::Joiner).await;

    assert_eq!(bob.engine.state(), NegotiationState::AwaitingOffer);
    assert!(!bob.engine.has_peer_connection());
}

#[tokio::test]
async fn test_both_sides_reach_connected() {
    init_tracing();

    let mut alice = EngineHarness::joined("alice", Role::Initiator).await;
    let mut bob = EngineHarness::joined("bob", Role::Joiner).await;

    alice.deliver(duet_core::ServerMessage::UserConnected).await;
    assert_eq!(alice.engine.state(), NegotiationState::OfferSent);

    let sent = alice.sent();
    assert_eq!(sent.len(), 1);
    let ClientMessage::Offer(payload) = &sent[0] else {
        panic!("expected an offer, got {:?}", sent[0]);
    };
    let desc: SessionDescription = serde_json::from_value(payload.clone()).unwrap();
    assert_eq!(desc, SessionDescription::offer("alice-offer-0"));

    bob.deliver(relayed(sent[0].clone())).await;
    assert_eq!(bob.engine.state(), NegotiationState::Connected);
    assert_eq!(bob.engine.role(), Some(Role::Joiner));

    let reply = bob.sent();
    assert_eq!(reply.len(), 1);
    assert!(matches!(reply[0], ClientMessage::Answer(_)));
    assert!(
        bob.peers.position(&PeerCall::SetRemote(0, SdpType::Offer))
            < bob.peers.position(&PeerCall::CreateAnswer(0))
    );

    alice.deliver(relayed(reply[0].clone())).await;
    assert_eq!(alice.engine.state(), NegotiationState::Connected);
    assert!(alice.peers.position(&PeerCall::SetRemote(0, SdpType::Answer)).is_some());
}

#[tokio::test]
async fn test_candidates_do_not_move_the_state() {
    init_tracing();

    let mut alice = EngineHarness::joined("alice", Role::Initiator).await;
    let mut bob = EngineHarness::joined("bob", Role::Joiner).await;
    alice.deliver(duet_core::ServerMessage::UserConnected).await;
    let offer = alice.sent().remove(0);
    bob.deliver(relayed(offer)).await;
    let answer = bob.sent().remove(0);
    alice.deliver(relayed(answer)).await;

    for c in ["c1", "c2", "c3"] {
        alice.deliver(candidate(c)).await;
        bob.deliver(candidate(c)).await;
    }

    assert_eq!(alice.engine.state(), NegotiationState::Connected);
    assert_eq!(bob.engine.state(), NegotiationState::Connected);
    assert_eq!(alice.peers.candidates_added(), vec!["c1", "c2", "c3"]);
    assert_eq!(bob.peers.candidates_added(), vec!["c1", "c2", "c3"]);
}

#[tokio::test]
async fn test_local_candidates_are_sent_one_by_one() {
    init_tracing();

    let mut alice = EngineHarness::joined("alice", Role::Initiator).await;

    for c in ["l1", "l2"] {
        let notice = alice
            .raise(PeerEvent::LocalCandidate(IceCandidate::new(c)))
            .unwrap();
        assert!(notice.is_none());
    }

    let sent = alice.sent();
    assert_eq!(sent.len(), 2);
    for (msg, expected) in sent.iter().zip(["l1", "l2"]) {
        let ClientMessage::IceCandidate(payload) = msg else {
            panic!("expected a candidate, got {:?}", msg);
        };
        let c: IceCandidate = serde_json::from_value(payload.clone()).unwrap();
        assert_eq!(c.candidate, expected);
    }
}

#[tokio::test]
async fn test_local_candidate_without_connection_is_dropped() {
    init_tracing();

    let mut bob = EngineHarness::joined("bob", Role::Joiner).await;

    bob.raise(PeerEvent::LocalCandidate(IceCandidate::new("stale")))
        .unwrap();

    assert!(bob.sent().is_empty());
}
