use crate::engine::{EngineEvent, NegotiationEngine, NegotiationState};
use crate::error::NegotiationError;
use crate::provider::{MediaProvider, PeerConnectionFactory, TaggedPeerEvent};
use duet_core::{RoomId, ServerMessage};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Drives a [`NegotiationEngine`] from the relay's messages and the peer
/// connection's callbacks, and reports progress to the UI side.
pub struct ClientSession<M, F>
where
    M: MediaProvider,
    F: PeerConnectionFactory<M::Track>,
{
    engine: NegotiationEngine<M, F>,
    inbound: mpsc::Receiver<ServerMessage>,
    peer_events: mpsc::UnboundedReceiver<TaggedPeerEvent>,
    events: mpsc::UnboundedSender<EngineEvent>,
}

impl<M, F> ClientSession<M, F>
where
    M: MediaProvider,
    F: PeerConnectionFactory<M::Track>,
{
    pub fn new(
        engine: NegotiationEngine<M, F>,
        peer_events: mpsc::UnboundedReceiver<TaggedPeerEvent>,
        inbound: mpsc::Receiver<ServerMessage>,
        events: mpsc::UnboundedSender<EngineEvent>,
    ) -> Self {
        Self {
            engine,
            inbound,
            peer_events,
            events,
        }
    }

    pub fn engine(&self) -> &NegotiationEngine<M, F> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut NegotiationEngine<M, F> {
        &mut self.engine
    }

    pub async fn join_room(&mut self, room_id: RoomId) -> Result<(), NegotiationError> {
        self.engine.join_room(room_id).await.inspect_err(|e| {
            self.report(e);
        })
    }

    /// Runs until the relay connection goes away. The engine, and with it the
    /// local media, is dropped on return.
    pub async fn run(mut self) {
        info!("Client session started");

        loop {
            tokio::select! {
                msg = self.inbound.recv() => {
                    match msg {
                        Some(m) => self.handle_server_message(m).await,
                        None => {
                            info!("Signaling channel closed. Ending session.");
                            break;
                        }
                    }
                }

                evt = self.peer_events.recv() => {
                    // The engine holds a sender, so this never yields None
                    // while the session is alive.
                    if let Some(e) = evt {
                        self.handle_peer_event(e);
                    }
                }
            }
        }

        info!("Client session finished");
    }

    pub async fn handle_server_message(&mut self, msg: ServerMessage) {
        let notice = match &msg {
            ServerMessage::RoomJoined { room_id, role } => Some(EngineEvent::RoomJoined {
                room_id: room_id.clone(),
                role: *role,
            }),
            ServerMessage::UserConnected => Some(EngineEvent::PeerJoined),
            ServerMessage::UserDisconnected => Some(EngineEvent::PeerLeft),
            _ => None,
        };
        if let Some(notice) = notice {
            self.emit(notice);
        }

        let before = self.engine.state();
        if let Err(e) = self.engine.handle_signal(msg).await {
            self.report(&e);
        }

        let after = self.engine.state();
        if after == NegotiationState::Connected && before != NegotiationState::Connected {
            self.emit(EngineEvent::Negotiated);
        }
    }

    pub fn handle_peer_event(&mut self, event: TaggedPeerEvent) {
        match self.engine.handle_peer_event(event) {
            Ok(Some(notice)) => self.emit(notice),
            Ok(None) => {}
            Err(e) => self.report(&e),
        }
    }

    fn report(&self, e: &NegotiationError) {
        if e.is_blocking() {
            error!("{}", e);
            self.emit(EngineEvent::Alert(e.to_string()));
        } else {
            warn!("{}", e);
        }
    }

    fn emit(&self, event: EngineEvent) {
        let _ = self.events.send(event);
    }
}
