//! # Configuration
//!
//! Settings come from the process environment, optionally seeded from a `.env` file.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `LOG_LEVEL` | `info` | tracing directive used when `RUST_LOG` is unset |
//! | `ACTOR_BUFFER_SIZE` | `32` | channel capacity of every actor |
//! | `STORE_TIMEOUT_MS` | `5000` | per-request deadline for store calls, `0` disables |
//! | `JWT_SECRET` | required | HS256 signing key |
//! | `JWT_ACCESS_TOKEN_EXPIRY_HOURS` | `24` | token lifetime |
//! | `PASSWORD_HASH_MEMORY_KIB` | `19456` | Argon2id memory cost |
//! | `DEFAULT_PAGE_SIZE` | `10` | catalog page size when none is requested |

use actor_framework::{ActorEntity, ResourceClient};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// How each actor is started and how its clients behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorSettings {
    pub buffer_size: usize,
    /// Deadline for every request made through the actor's client.
    pub timeout: Option<Duration>,
}

impl Default for ActorSettings {
    fn default() -> Self {
        Self {
            buffer_size: 32,
            timeout: None,
        }
    }
}

impl ActorSettings {
    /// Applies the request deadline, if any, to a freshly created client.
    pub fn apply<T: ActorEntity>(&self, client: ResourceClient<T>) -> ResourceClient<T> {
        match self.timeout {
            Some(limit) => client.with_timeout(limit),
            None => client,
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub log_level: String,
    pub actors: ActorSettings,
    pub jwt_secret: String,
    pub token_ttl: chrono::Duration,
    pub password_hash_memory_kib: u32,
    pub default_page_size: u32,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("log_level", &self.log_level)
            .field("actors", &self.actors)
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("password_hash_memory_kib", &self.password_hash_memory_kib)
            .field("default_page_size", &self.default_page_size)
            .finish()
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

fn at_least_one<T: PartialOrd + From<u8>>(key: &'static str, value: T) -> Result<T, ConfigError>
where
    T: fmt::Display,
{
    if value < T::from(1) {
        return Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: "must be at least 1".into(),
        });
    }
    Ok(value)
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let buffer_size = at_least_one("ACTOR_BUFFER_SIZE", parse_or(&lookup, "ACTOR_BUFFER_SIZE", 32usize)?)?;
        let timeout_ms: u64 = parse_or(&lookup, "STORE_TIMEOUT_MS", 5000)?;
        let ttl_hours = at_least_one(
            "JWT_ACCESS_TOKEN_EXPIRY_HOURS",
            parse_or(&lookup, "JWT_ACCESS_TOKEN_EXPIRY_HOURS", 24i64)?,
        )?;
        let memory_kib = parse_or(&lookup, "PASSWORD_HASH_MEMORY_KIB", 19_456u32)?;
        if memory_kib < 8 {
            return Err(ConfigError::Invalid {
                key: "PASSWORD_HASH_MEMORY_KIB",
                value: memory_kib.to_string(),
                reason: "must be at least 8".into(),
            });
        }

        Ok(Self {
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            actors: ActorSettings {
                buffer_size,
                timeout: (timeout_ms > 0).then(|| Duration::from_millis(timeout_ms)),
            },
            jwt_secret,
            token_ttl: chrono::Duration::hours(ttl_hours),
            password_hash_memory_kib: memory_kib,
            default_page_size: at_least_one("DEFAULT_PAGE_SIZE", parse_or(&lookup, "DEFAULT_PAGE_SIZE", 10u32)?)?,
        })
    }
}
