//! Test doubles shared by the service tests

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use warden_core::{Channel, DomainError, GatewayClient, Guild, Snowflake};

/// Gateway that records sent messages and knows no channels or guilds
#[derive(Debug, Default)]
pub struct RecordingGateway {
    sent: Mutex<Vec<(Snowflake, String)>>,
    fail: AtomicBool,
}

impl RecordingGateway {
    pub fn sent(&self) -> Vec<(Snowflake, String)> {
        self.sent.lock().clone()
    }

    /// Make every later send fail
    pub fn fail_sends(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl GatewayClient for RecordingGateway {
    async fn channel(&self, _channel_id: Snowflake) -> Option<Channel> {
        None
    }

    async fn guild(&self, _guild_id: Snowflake) -> Option<Guild> {
        None
    }

    async fn send_message(&self, channel_id: Snowflake, content: &str) -> Result<(), DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::Gateway("connection closed".to_string()));
        }
        self.sent.lock().push((channel_id, content.to_string()));
        Ok(())
    }
}
