//! Channel entity - represents a text channel, DM, or category

use crate::value_objects::Snowflake;

/// Channel type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ChannelType {
    /// Guild text channel
    #[default]
    GuildText = 0,
    /// Direct message between users
    Dm = 1,
    /// Guild voice channel
    GuildVoice = 2,
    /// Guild category for organizing channels
    GuildCategory = 4,
}

impl From<i32> for ChannelType {
    fn from(value: i32) -> Self {
        match value {
            1 => Self::Dm,
            2 => Self::GuildVoice,
            4 => Self::GuildCategory,
            _ => Self::GuildText, // Default for 0 and unknown values
        }
    }
}

impl From<ChannelType> for i32 {
    fn from(ct: ChannelType) -> Self {
        ct as i32
    }
}

/// Channel entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: Snowflake,
    pub guild_id: Option<Snowflake>,
    pub name: Option<String>,
    pub channel_type: ChannelType,
}

impl Channel {
    /// Create a new guild text channel
    #[must_use]
    pub fn new_text(id: Snowflake, guild_id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            id,
            guild_id: Some(guild_id),
            name: Some(name.into()),
            channel_type: ChannelType::GuildText,
        }
    }

    /// Create a new DM channel
    #[must_use]
    pub fn new_dm(id: Snowflake) -> Self {
        Self {
            id,
            guild_id: None,
            name: None,
            channel_type: ChannelType::Dm,
        }
    }

    /// Guild ID when this is a guild text channel; commands only get tenant context there
    #[must_use]
    pub fn text_guild(&self) -> Option<Snowflake> {
        match self.channel_type {
            ChannelType::GuildText => self.guild_id,
            _ => None,
        }
    }

    /// Get display name (channel name or fallback for DMs)
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Direct Message")
    }

    /// Channel descriptor stored on moderation entries: `"<name> / <id>"`
    #[must_use]
    pub fn descriptor(&self) -> String {
        format!("{} / {}", self.display_name(), self.id)
    }
}
