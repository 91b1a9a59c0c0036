//! Message entity - an inbound chat message

use crate::value_objects::Snowflake;

use super::User;

/// Message entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub guild_id: Option<Snowflake>,
    pub author: User,
    pub content: String,
}

impl Message {
    /// Create a new Message
    pub fn new(id: Snowflake, channel_id: Snowflake, author: User, content: impl Into<String>) -> Self {
        Self {
            id,
            channel_id,
            guild_id: None,
            author,
            content: content.into(),
        }
    }

    /// Attach the guild this message was sent in
    #[must_use]
    pub fn in_guild(mut self, guild_id: Snowflake) -> Self {
        self.guild_id = Some(guild_id);
        self
    }
}
