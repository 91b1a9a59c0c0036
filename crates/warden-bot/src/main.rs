//! Warden bot entry point
//!
//! Run with:
//! ```bash
//! cargo run -p warden-bot < events.jsonl
//! ```
//!
//! Configuration is loaded from environment variables. Gateway events are read
//! from stdin one JSON object per line; outgoing messages are written to stdout.

use tracing::{error, info, warn};
use warden_common::{try_init_tracing, try_init_tracing_with_config, AppConfig, TracingConfig};

#[tokio::main]
async fn main() {
    // Load configuration first so the log format can follow the environment
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            if let Err(e) = try_init_tracing() {
                eprintln!("Warning: Failed to initialize tracing: {e}");
            }
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_env(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        backend = ?config.store.backend,
        "Configuration loaded"
    );

    if let Err(e) = warden_bot::run(config).await {
        if e.is_fatal() {
            error!(code = e.error_code(), error = %e, "Bot failed");
            std::process::exit(1);
        }
        warn!(code = e.error_code(), error = %e, "Bot stopped with an error");
    }
}
