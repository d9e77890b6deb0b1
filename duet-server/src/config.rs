use clap::Args;
use duet_core::IceServerConfig;
use duet_core::utils::{DEFAULT_PORT, DEFAULT_STUN_ADDR};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Signaling server settings. Every flag can also come from the environment.
#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
    /// Address to listen on.
    #[arg(long, env = "DUET_BIND", default_value = "0.0.0.0")]
    pub bind: IpAddr,

    /// Port to listen on.
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// STUN/TURN URLs handed to every client on connect.
    #[arg(
        long = "ice-server",
        env = "DUET_ICE_SERVERS",
        value_delimiter = ',',
        default_value = DEFAULT_STUN_ADDR
    )]
    pub ice_urls: Vec<String>,

    /// Username applied to `turn:`/`turns:` URLs.
    #[arg(long, env = "TURN_USERNAME")]
    pub turn_username: Option<String>,

    /// Credential applied to `turn:`/`turns:` URLs.
    #[arg(long, env = "TURN_CREDENTIAL")]
    pub turn_credential: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            ice_urls: vec![DEFAULT_STUN_ADDR.to_owned()],
            turn_username: None,
            turn_credential: None,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    /// STUN URLs go out as one credential-less entry, TURN URLs as a second
    /// entry carrying the configured credentials.
    pub fn ice_servers(&self) -> Vec<IceServerConfig> {
        let (turn, stun): (Vec<String>, Vec<String>) = self
            .ice_urls
            .iter()
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty())
            .partition(|url| url.starts_with("turn:") || url.starts_with("turns:"));

        let mut servers = Vec::new();
        if !stun.is_empty() {
            servers.push(IceServerConfig {
                urls: stun,
                username: None,
                credential: None,
            });
        }
        if !turn.is_empty() {
            servers.push(IceServerConfig {
                urls: turn,
                username: self.turn_username.clone(),
                credential: self.turn_credential.clone(),
            });
        }
        servers
    }
}
