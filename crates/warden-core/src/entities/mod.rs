//! Domain entities - the guild document model and gateway snapshots

mod channel;
mod document;
mod guild;
mod member;
mod message;
mod user;

pub use channel::{Channel, ChannelType};
pub use document::{
    Greeting, GuildDocument, MemberRecord, ModerationEntry, ModerationKind, DEFAULT_PREFIX,
    SCHEMA_VERSION,
};
pub use guild::Guild;
pub use member::GuildMember;
pub use message::Message;
pub use user::User;
