mod config;
mod room;
mod router;
mod signaling;
mod state;

pub use config::*;
pub use room::*;
pub use router::*;
pub use signaling::*;
pub use state::*;
