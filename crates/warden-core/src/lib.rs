//! # warden-core
//!
//! Domain layer containing the guild document model, gateway snapshot entities,
//! the store and gateway ports, and domain errors.
//! This crate has zero dependencies on infrastructure (Redis, gateway transport, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Channel, ChannelType, Greeting, Guild, GuildDocument, GuildMember, MemberRecord, Message,
    ModerationEntry, ModerationKind, User, DEFAULT_PREFIX, SCHEMA_VERSION,
};
pub use error::DomainError;
pub use traits::{DocumentStore, GatewayClient, RepoResult};
pub use value_objects::{Snowflake, SnowflakeParseError};
