pub const DEFAULT_STUN_ADDR: &str = "stun:stun.l.google.com:19302";
pub const DEFAULT_STUN_ADDR_2: &str = "stun:stun1.l.google.com:19302";

/// Port the signaling server listens on when nothing else is configured.
pub const DEFAULT_PORT: u16 = 3000;
