//! Gateway adapter
//!
//! The in-process state cache and the line-delimited JSON transport.

mod local;
mod state_cache;

pub use local::{pump_events, LocalGateway, OutgoingMessage};
pub use state_cache::StateCache;
