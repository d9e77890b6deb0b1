use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use duet::RoomId;
use duet::client::{
    ClientSession, EngineConfig, EngineEvent, MediaConstraints, NegotiationEngine, SignalChannel,
    rtc::{RtcPeerFactory, StaticMediaProvider},
};
use duet::model::IceServerConfig;
use duet::server::{AppState, ServerConfig, serve};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "duet", version, about = "Two-peer video call signaling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the signaling server.
    Serve(ServerConfig),

    /// Open a new room and wait for someone to join it.
    Create(ClientConfig),

    /// Join an existing room.
    Join {
        #[command(flatten)]
        client: ClientConfig,

        #[arg(long)]
        room: String,
    },
}

#[derive(Debug, Clone, Args)]
struct ClientConfig {
    /// Signaling server WebSocket URL.
    #[arg(long, env = "DUET_URL", default_value = "ws://127.0.0.1:3000/ws")]
    url: String,

    /// Used when the server does not send its own ICE servers.
    #[arg(long = "ice-server", value_delimiter = ',')]
    ice_urls: Vec<String>,

    #[arg(long)]
    no_video: bool,

    #[arg(long)]
    no_audio: bool,
}

impl ClientConfig {
    fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            ice_servers: (!self.ice_urls.is_empty()).then(|| {
                vec![IceServerConfig {
                    urls: self.ice_urls.clone(),
                    username: None,
                    credential: None,
                }]
            }),
            constraints: MediaConstraints {
                video: !self.no_video,
                audio: !self.no_audio,
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Commands::Serve(config) => run_server(config).await,
        Commands::Create(client) => {
            let room = RoomId::generate();
            println!("{} {}", "Room ID:".green().bold(), room.as_str().bold());
            run_peer(client, room).await
        }
        Commands::Join { client, room } => run_peer(client, RoomId::from(room)).await,
    }
}

async fn run_server(config: ServerConfig) -> Result<()> {
    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    let state = AppState::new(config.ice_servers());

    tokio::select! {
        result = serve(listener, state) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down");
            Ok(())
        }
    }
}

async fn run_peer(config: ClientConfig, room: RoomId) -> Result<()> {
    let channel = SignalChannel::connect(&config.url).await?;
    println!("{} {}", "Connected to".cyan(), config.url);

    let (engine, peer_events) = NegotiationEngine::new(
        StaticMediaProvider::default(),
        RtcPeerFactory,
        Arc::new(channel.outbound),
        config.engine_config(),
    );
    let (events_tx, events) = mpsc::unbounded_channel();
    let mut session = ClientSession::new(engine, peer_events, channel.inbound, events_tx);

    tokio::spawn(print_events(events));

    session
        .join_room(room)
        .await
        .context("Failed to join the room")?;

    tokio::select! {
        _ = session.run() => {
            println!("{}", "Signaling connection closed".yellow());
        }
        _ = tokio::signal::ctrl_c() => {
            println!("{}", "Hanging up".yellow());
        }
    }

    Ok(())
}

async fn print_events(mut events: mpsc::UnboundedReceiver<EngineEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            EngineEvent::RoomJoined { room_id, role } => {
                println!("{} '{}' as {:?}", "Joined room".green(), room_id, role);
            }
            EngineEvent::PeerJoined => println!("{}", "Peer joined".green()),
            EngineEvent::PeerLeft => println!("{}", "Peer left".yellow()),
            EngineEvent::RemoteTrack(track) => {
                println!("{} {:?} ({})", "Receiving".cyan(), track.kind, track.id);
            }
            EngineEvent::Negotiated => println!("{}", "Call negotiated".green().bold()),
            EngineEvent::Alert(text) => println!("{} {}", "Alert:".red().bold(), text),
        }
    }
}
