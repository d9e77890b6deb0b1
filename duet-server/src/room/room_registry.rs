use crate::room::Room;
use dashmap::DashMap;
use duet_core::{ConnectionId, Role, RoomId};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    pub room_id: RoomId,
    pub role: Role,
    /// Members that were already in the room.
    pub peers: Vec<ConnectionId>,
    /// Set when joining moved the connection out of another room.
    pub previous: Option<LeaveOutcome>,
    /// The connection was already a member; nothing changed.
    pub rejoined: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveOutcome {
    pub room_id: RoomId,
    pub remaining: Vec<ConnectionId>,
}

/// Room id -> members, plus the reverse index connection -> room.
///
/// Rooms are created on first join and dropped as soon as the last member
/// leaves. Mutations of one room happen under its dashmap shard lock, so
/// concurrent joins and leaves from different connections stay consistent.
#[derive(Clone, Default)]
pub struct RoomRegistry {
    rooms: Arc<DashMap<RoomId, Room>>,
    memberships: Arc<DashMap<ConnectionId, RoomId>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn join(&self, connection_id: &ConnectionId, room_id: RoomId) -> JoinOutcome {
        let current = self
            .memberships
            .get(connection_id)
            .map(|entry| entry.value().clone());

        let previous = match current {
            Some(current) if current == room_id => {
                let existing = self
                    .rooms
                    .get(&room_id)
                    .and_then(|room| Some((room.role_of(connection_id)?, room.others(connection_id))));

                if let Some((role, peers)) = existing {
                    debug!("{} is already in room '{}'", connection_id, room_id);
                    return JoinOutcome {
                        room_id,
                        role,
                        peers,
                        previous: None,
                        rejoined: true,
                    };
                }
                None
            }
            Some(_) => self.leave(connection_id),
            None => None,
        };

        let (role, peers) = {
            let mut room = self.rooms.entry(room_id.clone()).or_insert_with(|| {
                info!("Creating room '{}'", room_id);
                Room::default()
            });
            let peers = room.others(connection_id);
            let role = room.admit(connection_id.clone());
            (role, peers)
        };

        self.memberships
            .insert(connection_id.clone(), room_id.clone());

        JoinOutcome {
            room_id,
            role,
            peers,
            previous,
            rejoined: false,
        }
    }

    pub fn leave(&self, connection_id: &ConnectionId) -> Option<LeaveOutcome> {
        let (_, room_id) = self.memberships.remove(connection_id)?;

        let remaining = {
            let mut room = self.rooms.get_mut(&room_id)?;
            room.remove(connection_id);
            room.members()
        };

        if self
            .rooms
            .remove_if(&room_id, |_, room| room.is_empty())
            .is_some()
        {
            info!("Room '{}' is empty, discarding it", room_id);
        }

        Some(LeaveOutcome { room_id, remaining })
    }

    /// Room of a connection together with everyone else in it.
    pub fn peers_of(&self, connection_id: &ConnectionId) -> Option<(RoomId, Vec<ConnectionId>)> {
        let room_id = self.memberships.get(connection_id)?.value().clone();
        let peers = self.rooms.get(&room_id)?.others(connection_id);
        Some((room_id, peers))
    }

    pub fn room_of(&self, connection_id: &ConnectionId) -> Option<RoomId> {
        self.memberships
            .get(connection_id)
            .map(|entry| entry.value().clone())
    }

    pub fn members(&self, room_id: &RoomId) -> Vec<ConnectionId> {
        self.rooms
            .get(room_id)
            .map(|room| room.members())
            .unwrap_or_default()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn contains_room(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }
}
