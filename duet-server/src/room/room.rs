use duet_core::{ConnectionId, Role};
use std::collections::HashMap;

/// Membership of a single room. Only the registry holds these.
#[derive(Debug, Default)]
pub struct Room {
    members: HashMap<ConnectionId, Role>,
}

impl Room {
    /// Adds a member and returns the role it was given: the first member of
    /// an empty room initiates, everyone else joins.
    pub(crate) fn admit(&mut self, connection_id: ConnectionId) -> Role {
        let role = if self.members.is_empty() {
            Role::Initiator
        } else {
            Role::Joiner
        };
        self.members.insert(connection_id, role);
        role
    }

    /// Removes a member. A sole survivor is promoted to initiator so the
    /// next joiner gets offered to.
    pub(crate) fn remove(&mut self, connection_id: &ConnectionId) -> bool {
        let removed = self.members.remove(connection_id).is_some();

        if self.members.len() == 1 {
            for role in self.members.values_mut() {
                *role = Role::Initiator;
            }
        }

        removed
    }

    pub fn role_of(&self, connection_id: &ConnectionId) -> Option<Role> {
        self.members.get(connection_id).copied()
    }

    pub fn others(&self, connection_id: &ConnectionId) -> Vec<ConnectionId> {
        self.members
            .keys()
            .filter(|id| *id != connection_id)
            .cloned()
            .collect()
    }

    pub fn members(&self) -> Vec<ConnectionId> {
        self.members.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
