use duet_core::{ConnectionId, ServerMessage};
use duet_server::SignalOutput;
use std::sync::{Arc, Mutex};

/// Mock SignalOutput that captures every delivery.
#[derive(Clone, Default)]
pub struct MockSignalOutput {
    delivered: Arc<Mutex<Vec<(ConnectionId, ServerMessage)>>>,
}

impl MockSignalOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything delivered to one connection, in delivery order.
    pub fn received_by(&self, connection_id: &ConnectionId) -> Vec<ServerMessage> {
        self.delivered
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| id == connection_id)
            .map(|(_, msg)| msg.clone())
            .collect()
    }

    pub fn count_for(&self, connection_id: &ConnectionId, msg: &ServerMessage) -> usize {
        self.received_by(connection_id)
            .iter()
            .filter(|m| *m == msg)
            .count()
    }

    pub fn total(&self) -> usize {
        self.delivered.lock().unwrap().len()
    }

    pub fn clear(&self) {
        self.delivered.lock().unwrap().clear();
    }
}

impl SignalOutput for MockSignalOutput {
    fn deliver(&self, connection_id: &ConnectionId, msg: ServerMessage) {
        self.delivered
            .lock()
            .unwrap()
            .push((connection_id.clone(), msg));
    }
}
