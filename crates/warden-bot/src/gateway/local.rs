//! Local line-delimited JSON gateway
//!
//! Reads gateway events one JSON object per line and writes outgoing messages
//! the same way. Channel and guild lookups are answered from the [`StateCache`].

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, warn};
use warden_core::{Channel, DomainError, GatewayClient, Guild, Snowflake};

use super::StateCache;
use crate::events::GatewayEvent;

/// A message sent by the bot, as written to the output stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub channel_id: Snowflake,
    pub content: String,
}

/// Gateway client over a line-oriented writer
pub struct LocalGateway<W> {
    cache: Arc<StateCache>,
    out: Mutex<W>,
}

impl<W> LocalGateway<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(cache: Arc<StateCache>, out: W) -> Self {
        Self {
            cache,
            out: Mutex::new(out),
        }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

#[async_trait]
impl<W> GatewayClient for LocalGateway<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn channel(&self, channel_id: Snowflake) -> Option<Channel> {
        self.cache.channel(channel_id)
    }

    async fn guild(&self, guild_id: Snowflake) -> Option<Guild> {
        self.cache.guild(guild_id)
    }

    async fn send_message(&self, channel_id: Snowflake, content: &str) -> Result<(), DomainError> {
        let outgoing = OutgoingMessage {
            channel_id,
            content: content.to_string(),
        };
        let mut line = serde_json::to_vec(&outgoing)
            .map_err(|e| DomainError::Gateway(format!("encode message: {e}")))?;
        line.push(b'\n');

        let mut out = self.out.lock().await;
        out.write_all(&line)
            .await
            .map_err(|e| DomainError::Gateway(e.to_string()))?;
        out.flush()
            .await
            .map_err(|e| DomainError::Gateway(e.to_string()))?;

        debug!(channel_id = %channel_id, "Message sent");
        Ok(())
    }
}

impl<W> std::fmt::Debug for LocalGateway<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalGateway")
            .field("guilds", &self.cache.guild_count())
            .finish_non_exhaustive()
    }
}

/// Read events from `reader` until EOF, updating `cache` and forwarding each
/// event to `events`.
///
/// Malformed lines are logged and skipped. Returns the number of events forwarded;
/// stops early if the receiver is gone.
pub async fn pump_events<R>(
    reader: R,
    cache: &StateCache,
    events: mpsc::Sender<GatewayEvent>,
) -> std::io::Result<u64>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut forwarded = 0u64;
    let mut line_no = 0u64;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event: GatewayEvent = match serde_json::from_str(line) {
            Ok(event) => event,
            Err(e) => {
                warn!(line = line_no, error = %e, "Skipping malformed gateway event");
                continue;
            }
        };

        cache.apply(&event);

        if events.send(event).await.is_err() {
            warn!("Event receiver closed, stopping reader");
            break;
        }
        forwarded += 1;
    }

    Ok(forwarded)
}
