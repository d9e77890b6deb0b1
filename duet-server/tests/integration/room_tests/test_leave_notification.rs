use duet_core::{ConnectionId, RoomId, ServerMessage};

use crate::integration::{create_test_relay, init_tracing};

#[test]
fn test_remaining_member_gets_one_leave_notice() {
    init_tracing();

    let (relay, output) = create_test_relay();
    let a = ConnectionId::new();
    let b = ConnectionId::new();
    relay.join(&a, RoomId::from("abc123"));
    relay.join(&b, RoomId::from("abc123"));

    let outcome = relay.leave(&a).expect("a was in a room");

    assert_eq!(outcome.remaining, vec![b.clone()]);
    assert_eq!(output.count_for(&b, &ServerMessage::UserDisconnected), 1);
    assert_eq!(output.count_for(&a, &ServerMessage::UserDisconnected), 0);
}

#[test]
fn test_leaving_twice_notifies_once() {
    init_tracing();

    let (relay, output) = create_test_relay();
    let a = ConnectionId::new();
    let b = ConnectionId::new();
    relay.join(&a, RoomId::from("abc123"));
    relay.join(&b, RoomId::from("abc123"));

    relay.leave(&a);
    assert!(relay.leave(&a).is_none());

    assert_eq!(output.count_for(&b, &ServerMessage::UserDisconnected), 1);
}
