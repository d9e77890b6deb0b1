mod engine;
mod error;
mod media;
mod provider;
mod session;
mod ws_channel;

#[cfg(feature = "rtc")]
pub mod rtc;

pub use engine::*;
pub use error::*;
pub use media::*;
pub use provider::*;
pub use session::*;
pub use ws_channel::*;
