use duet_core::{ConnectionId, RoomId};
use duet_server::RoomRegistry;

use crate::integration::init_tracing;

const CONNECTIONS: usize = 64;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_joins_then_leaves_leave_no_room_behind() {
    init_tracing();

    let registry = RoomRegistry::new();
    let room_id = RoomId::from("busy");
    let ids: Vec<ConnectionId> = (0..CONNECTIONS).map(|_| ConnectionId::new()).collect();

    let joins: Vec<_> = ids
        .iter()
        .cloned()
        .map(|id| {
            let registry = registry.clone();
            let room_id = room_id.clone();
            tokio::spawn(async move {
                registry.join(&id, room_id);
            })
        })
        .collect();
    for join in joins {
        join.await.unwrap();
    }

    assert_eq!(registry.members(&room_id).len(), CONNECTIONS);

    let leaves: Vec<_> = ids
        .iter()
        .cloned()
        .map(|id| {
            let registry = registry.clone();
            tokio::spawn(async move { registry.leave(&id) })
        })
        .collect();
    for leave in leaves {
        assert!(leave.await.unwrap().is_some());
    }

    assert_eq!(registry.room_count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_interleaved_join_and_leave_keeps_survivors() {
    init_tracing();

    let registry = RoomRegistry::new();
    let room_id = RoomId::from("churn");
    let anchor = ConnectionId::new();
    registry.join(&anchor, room_id.clone());

    let tasks: Vec<_> = (0..CONNECTIONS)
        .map(|_| {
            let registry = registry.clone();
            let room_id = room_id.clone();
            tokio::spawn(async move {
                let id = ConnectionId::new();
                registry.join(&id, room_id);
                tokio::task::yield_now().await;
                registry.leave(&id);
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(registry.members(&room_id), vec![anchor]);
    assert_eq!(registry.room_count(), 1);
}
