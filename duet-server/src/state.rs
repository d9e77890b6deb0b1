use crate::signaling::{Relay, SignalingService};
use duet_core::IceServerConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub signaling: SignalingService,
    pub relay: Relay,
}

impl AppState {
    pub fn new(ice_servers: Vec<IceServerConfig>) -> Self {
        let signaling = SignalingService::new(ice_servers);
        let relay = Relay::new(Arc::new(signaling.clone()));

        Self { signaling, relay }
    }
}
