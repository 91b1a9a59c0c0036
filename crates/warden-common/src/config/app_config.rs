//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub bot: BotConfig,
    pub store: StoreConfig,
    pub redis: RedisConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

/// Static bot configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Prefix for DMs and for newly registered guilds
    #[serde(default = "default_prefix")]
    pub default_prefix: String,
    /// Users allowed to run owner-only commands
    #[serde(default)]
    pub owner_ids: Vec<i64>,
}

/// Which document store backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Redis,
    /// Process-local store, lost on exit
    Memory,
}

/// Document store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// Prepended to the guild ID to form the store key
    #[serde(default)]
    pub key_prefix: String,
    /// Attempts per mutation before giving up on a revision conflict
    #[serde(default = "default_mutation_retries")]
    pub mutation_retries: u32,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

// Default value functions
fn default_app_name() -> String {
    "warden".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_prefix() -> String {
    warden_core::DEFAULT_PREFIX.to_string()
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_mutation_retries() -> u32 {
    5
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = match lookup("APP_ENV") {
            Some(s) => match s.to_lowercase().as_str() {
                "production" => Environment::Production,
                "staging" => Environment::Staging,
                "development" => Environment::Development,
                _ => return Err(ConfigError::InvalidValue("APP_ENV", s)),
            },
            None => default_env(),
        };

        let backend = match lookup("STORE_BACKEND") {
            Some(s) => match s.to_lowercase().as_str() {
                "redis" => StoreBackend::Redis,
                "memory" => StoreBackend::Memory,
                _ => return Err(ConfigError::InvalidValue("STORE_BACKEND", s)),
            },
            None => StoreBackend::default(),
        };

        // Redis is only mandatory when it is the selected backend
        let redis_url = match (lookup("REDIS_URL"), backend) {
            (Some(url), _) => url,
            (None, StoreBackend::Memory) => default_redis_url(),
            (None, StoreBackend::Redis) => return Err(ConfigError::MissingVar("REDIS_URL")),
        };

        let prefix = lookup("BOT_PREFIX").unwrap_or_else(default_prefix);
        if prefix.trim().is_empty() {
            return Err(ConfigError::InvalidValue("BOT_PREFIX", prefix));
        }

        let owner_ids = match lookup("BOT_OWNER_IDS") {
            Some(s) => s
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(|id| {
                    id.parse::<i64>()
                        .map_err(|_| ConfigError::InvalidValue("BOT_OWNER_IDS", id.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            bot: BotConfig {
                default_prefix: prefix,
                owner_ids,
            },
            store: StoreConfig {
                backend,
                key_prefix: lookup("STORE_KEY_PREFIX").unwrap_or_default(),
                mutation_retries: parse_or("STORE_MUTATION_RETRIES", &lookup, default_mutation_retries)?,
            },
            redis: RedisConfig {
                url: redis_url,
                max_connections: parse_or(
                    "REDIS_MAX_CONNECTIONS",
                    &lookup,
                    default_redis_max_connections,
                )?,
            },
        })
    }
}

fn parse_or<F, T>(key: &'static str, lookup: &F, default: fn() -> T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(s) => s
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, s)),
        None => Ok(default()),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
