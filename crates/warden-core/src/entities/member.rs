//! Member entity - a user's live membership in a guild, as reported by the gateway

use chrono::{DateTime, Utc};

use super::User;
use crate::value_objects::Snowflake;

/// Guild member snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildMember {
    pub user: User,
    pub nickname: Option<String>,
    pub role_ids: Vec<Snowflake>,
    pub joined_at: DateTime<Utc>,
}

impl GuildMember {
    /// Create a new GuildMember that joined just now
    pub fn new(user: User) -> Self {
        Self {
            user,
            nickname: None,
            role_ids: Vec::new(),
            joined_at: Utc::now(),
        }
    }

    /// Member's user ID
    #[inline]
    pub fn id(&self) -> Snowflake {
        self.user.id
    }

    /// Get display name (nickname if set, otherwise username)
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.user.username)
    }
}
