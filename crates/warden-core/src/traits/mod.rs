//! Ports - the interfaces the domain needs from its external collaborators
//!
//! The domain defines what it needs; `warden-store` and the bot's gateway adapter
//! provide the implementations.

mod gateway;
mod store;

pub use gateway::GatewayClient;
pub use store::{DocumentStore, RepoResult};
