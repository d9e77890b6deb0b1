use crate::signaling::SignalOutput;
use axum::extract::ws::Message;
use dashmap::DashMap;
use duet_core::{ConnectionId, IceServerConfig, ServerMessage};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error};

struct SignalingInner {
    connections: DashMap<ConnectionId, mpsc::UnboundedSender<Message>>,
    ice_servers: Vec<IceServerConfig>,
}

/// Outbound half of every live WebSocket, keyed by connection id.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
}

impl SignalingService {
    pub fn new(ice_servers: Vec<IceServerConfig>) -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                connections: DashMap::new(),
                ice_servers,
            }),
        }
    }

    pub fn get_ice_servers(&self) -> Vec<IceServerConfig> {
        self.inner.ice_servers.clone()
    }

    pub fn add_connection(&self, connection_id: ConnectionId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.connections.insert(connection_id, tx);
    }

    pub fn remove_connection(&self, connection_id: &ConnectionId) {
        self.inner.connections.remove(connection_id);
    }

    pub fn connection_count(&self) -> usize {
        self.inner.connections.len()
    }

    pub fn send_signal(&self, connection_id: &ConnectionId, msg: ServerMessage) {
        let Some(connection) = self.inner.connections.get(connection_id) else {
            debug!("Dropping signal for departed connection {}", connection_id);
            return;
        };

        match serde_json::to_string(&msg) {
            Ok(json) => {
                if connection.send(Message::Text(json.into())).is_err() {
                    debug!("Outbound queue of {} is closed", connection_id);
                }
            }
            Err(e) => error!("Failed to serialize signal message: {}", e),
        }
    }
}

impl SignalOutput for SignalingService {
    fn deliver(&self, connection_id: &ConnectionId, msg: ServerMessage) {
        self.send_signal(connection_id, msg);
    }
}
