//! Event router
//!
//! Receives gateway events and runs each in its own task. A failed handler is
//! logged and never stops the router.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, info_span, warn, Instrument};
use warden_core::{GuildMember, Message, User};
use warden_service::{LifecycleService, ServiceContext, ServiceError, ServiceResult};

use crate::commands::CommandRegistry;
use crate::dispatch::{DispatchOutcome, EventDispatcher};
use crate::events::GatewayEvent;

/// The bot: shared services plus the message dispatcher
#[derive(Debug, Clone)]
pub struct Bot {
    services: ServiceContext,
    dispatcher: EventDispatcher,
}

impl Bot {
    #[must_use]
    pub fn new(services: ServiceContext, registry: CommandRegistry) -> Self {
        Self {
            services,
            dispatcher: EventDispatcher::new(Arc::new(registry)),
        }
    }

    /// Handle one event to completion
    pub async fn handle(&self, event: GatewayEvent) -> ServiceResult<()> {
        let lifecycle = LifecycleService::new(&self.services);

        match event {
            GatewayEvent::GuildCreate(payload) => {
                let (guild, _) = payload.into_parts();
                let outcome = lifecycle.guild_joined(&guild).await?;
                debug!(guild_id = %guild.id, outcome = ?outcome, "Guild create handled");
            }
            GatewayEvent::GuildDelete(payload) => {
                if payload.unavailable {
                    debug!(guild_id = %payload.id, "Guild unavailable, keeping document");
                    return Ok(());
                }
                lifecycle.guild_left(payload.id).await?;
            }
            GatewayEvent::MessageCreate(payload) => {
                let message = Message::from(payload);
                let outcome = self.dispatcher.dispatch(&self.services, &message).await;
                if let DispatchOutcome::Ignored(reason) = outcome {
                    debug!(reason = reason.as_str(), "Message ignored");
                }
            }
            GatewayEvent::GuildMemberAdd(payload) => {
                let member = GuildMember::from(payload.member);
                lifecycle.member_joined(payload.guild_id, &member).await?;
            }
            GatewayEvent::GuildMemberRemove(payload) => {
                let user = User::from(payload.user);
                lifecycle.member_left(payload.guild_id, &user).await?;
            }
        }

        Ok(())
    }

    /// Handle one event, logging instead of returning a failure
    pub async fn handle_logged(&self, event: GatewayEvent) {
        let event_type = event.event_type();
        let span = info_span!(
            "event",
            event = %event_type,
            guild_id = ?event.guild_id()
        );

        async {
            if let Err(e) = self.handle(event).await {
                let corrupt = matches!(&e, ServiceError::Domain(d) if d.is_corrupt_document());
                if e.is_store_failure() || corrupt {
                    error!(code = e.error_code(), error = %e, "Event handler failed: store");
                } else {
                    warn!(code = e.error_code(), error = %e, "Event handler failed");
                }
            }
        }
        .instrument(span)
        .await;
    }

    /// Route events until the channel closes, then wait for in-flight handlers
    pub async fn run(self: Arc<Self>, mut events: mpsc::Receiver<GatewayEvent>) {
        let mut tasks = JoinSet::new();
        info!("Event router started");

        loop {
            tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else { break };
                    let bot = Arc::clone(&self);
                    tasks.spawn(async move { bot.handle_logged(event).await });
                }
                Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                    if let Err(e) = joined {
                        error!(error = %e, "Event task panicked");
                    }
                }
            }
        }

        debug!(in_flight = tasks.len(), "Event stream closed, draining handlers");
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "Event task panicked");
            }
        }
        info!("Event router stopped");
    }
}
