//! User entity - a gateway user as seen by the bot

use crate::value_objects::Snowflake;

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub discriminator: String,
    pub bot: bool,
}

impl User {
    /// Create a new (non-bot) User
    pub fn new(id: Snowflake, username: impl Into<String>, discriminator: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            discriminator: discriminator.into(),
            bot: false,
        }
    }

    /// Get the full tag: username#discriminator
    pub fn tag(&self) -> String {
        format!("{}#{}", self.username, self.discriminator)
    }

    /// Mention markup that pings this user
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }

    /// Check if user is a bot account
    #[inline]
    pub fn is_bot(&self) -> bool {
        self.bot
    }
}
