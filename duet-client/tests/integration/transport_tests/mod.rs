
use anyhow::Result;
use duet_client::SignalChannel;
use duet_core::utils::DEFAULT_STUN_ADDR;
use duet_core::{IceServerConfig, ServerMessage};
use duet_server::{AppState, serve};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::timeout;

use crate::utils::EVENT_TIMEOUT_MS;

/// Runs the real signaling server on an ephemeral port and returns its
/// WebSocket URL.
pub async fn spawn_server() -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = AppState::new(vec![IceServerConfig::stun(DEFAULT_STUN_ADDR)]);

    tokio::spawn(serve(listener, state));

    Ok(format!("ws://{}/ws", addr))
}

pub async fn next_message(channel: &mut SignalChannel) -> ServerMessage {
    timeout(
        Duration::from_millis(EVENT_TIMEOUT_MS),
        channel.inbound.recv(),
    )
    .await
    .expect("timed out waiting for the relay")
    .expect("signaling channel closed")
}
