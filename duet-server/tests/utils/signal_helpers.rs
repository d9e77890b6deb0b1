use duet_core::ServerMessage;
use serde_json::{Value, json};

/// Timeout for a single expected signal (ms).
pub const SIGNAL_TIMEOUT_MS: u64 = 5000;

/// How long to listen before concluding nothing else is coming (ms).
pub const SILENCE_WINDOW_MS: u64 = 300;

pub fn offer_payload(sdp: &str) -> Value {
    json!({ "type": "offer", "sdp": sdp })
}

pub fn answer_payload(sdp: &str) -> Value {
    json!({ "type": "answer", "sdp": sdp })
}

pub fn candidate_payload(candidate: &str) -> Value {
    json!({ "candidate": candidate, "sdpMid": "0", "sdpMLineIndex": 0 })
}

pub fn is_relayed(msg: &ServerMessage) -> bool {
    matches!(
        msg,
        ServerMessage::Offer(_) | ServerMessage::Answer(_) | ServerMessage::IceCandidate(_)
    )
}
