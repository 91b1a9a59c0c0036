//! # warden-bot
//!
//! Gateway event routing, command dispatch and the built-in commands.

pub mod bot;
pub mod commands;
pub mod dispatch;
pub mod events;
pub mod gateway;

#[cfg(test)]
pub(crate) mod testing;

pub use bot::Bot;
pub use commands::{Command, CommandContext, CommandError, CommandFlags, CommandRegistry};
pub use dispatch::{DispatchOutcome, EventDispatcher, IgnoreReason};
pub use events::{GatewayEvent, GatewayEventType};
pub use gateway::{pump_events, LocalGateway, OutgoingMessage, StateCache};

use std::sync::Arc;

use tokio::io::BufReader;
use tokio::sync::mpsc;
use warden_common::{AppConfig, AppError, AppResult};
use warden_service::ServiceContextBuilder;

/// Capacity of the queue between the event reader and the router
const EVENT_QUEUE: usize = 256;

/// Run the bot over stdin/stdout until the event stream ends
pub async fn run(config: AppConfig) -> AppResult<()> {
    let store = warden_store::open_store(&config)
        .await
        .map_err(AppError::store)?;

    let cache = Arc::new(StateCache::new());
    let gateway = Arc::new(LocalGateway::new(Arc::clone(&cache), tokio::io::stdout()));

    let services = ServiceContextBuilder::new()
        .config(&config)
        .store(store)
        .gateway(gateway)
        .build()?;

    let registry = CommandRegistry::with_defaults();
    for command in registry.commands() {
        tracing::debug!(
            command = command.name(),
            aliases = ?command.aliases(),
            "{}",
            command.description()
        );
    }
    tracing::info!(
        commands = registry.len(),
        default_prefix = services.default_prefix(),
        "Bot ready"
    );
    let bot = Arc::new(Bot::new(services, registry));

    let (tx, rx) = mpsc::channel(EVENT_QUEUE);
    let router = tokio::spawn(bot.run(rx));

    let read = pump_events(BufReader::new(tokio::io::stdin()), &cache, tx).await;

    // The sender is gone once pump_events returns; let the router drain
    router.await.map_err(AppError::internal)?;

    let forwarded = read.map_err(|e| AppError::Gateway(e.to_string()))?;
    tracing::info!(events = forwarded, "Event stream ended");
    Ok(())
}
