//! Gateway event types
//!
//! Defines the event type names the bot consumes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gateway event types
///
/// These are the event names sent in the `t` field of dispatch messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GatewayEventType {
    /// Guild available, joined, or created
    GuildCreate,
    /// Left guild, kicked, or guild deleted
    GuildDelete,
    /// New message
    MessageCreate,
    /// User joined guild
    GuildMemberAdd,
    /// User left guild
    GuildMemberRemove,
}

impl GatewayEventType {
    /// Get the string representation of the event type
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GuildCreate => "GUILD_CREATE",
            Self::GuildDelete => "GUILD_DELETE",
            Self::MessageCreate => "MESSAGE_CREATE",
            Self::GuildMemberAdd => "GUILD_MEMBER_ADD",
            Self::GuildMemberRemove => "GUILD_MEMBER_REMOVE",
        }
    }

    /// Parse an event type from a string
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "GUILD_CREATE" => Some(Self::GuildCreate),
            "GUILD_DELETE" => Some(Self::GuildDelete),
            "MESSAGE_CREATE" => Some(Self::MessageCreate),
            "GUILD_MEMBER_ADD" => Some(Self::GuildMemberAdd),
            "GUILD_MEMBER_REMOVE" => Some(Self::GuildMemberRemove),
            _ => None,
        }
    }
}

impl fmt::Display for GatewayEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
