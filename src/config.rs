//! Runtime configuration for the ticketing system.
//!
//! Loaded from environment variables (optionally seeded from a `.env` file) with defaults for
//! anything unset.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const MAILBOX_CAPACITY_KEY: &str = "TICKETING_MAILBOX_CAPACITY";
const PAYMENT_TIMEOUT_KEY: &str = "TICKETING_PAYMENT_TIMEOUT_MS";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Tunables for [`TicketingSystem`](crate::lifecycle::TicketingSystem).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Mailbox size of each actor. When full, callers wait for space.
    pub mailbox_capacity: usize,
    /// How long a booking waits for the payment gateway before giving up.
    pub payment_timeout_ms: u64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: 32,
            payment_timeout_ms: 2000,
        }
    }
}

impl SystemConfig {
    /// Reads the configuration from the process environment.
    ///
    /// A `.env` file in the working directory is loaded first if present; variables already
    /// set in the environment win.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "Loaded .env");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            mailbox_capacity: parse_positive(&lookup, MAILBOX_CAPACITY_KEY)?
                .unwrap_or(defaults.mailbox_capacity),
            payment_timeout_ms: parse_positive(&lookup, PAYMENT_TIMEOUT_KEY)?
                .unwrap_or(defaults.payment_timeout_ms),
        })
    }

    pub fn payment_timeout(&self) -> Duration {
        Duration::from_millis(self.payment_timeout_ms)
    }
}

fn parse_positive<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr + PartialEq + Default,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    match raw.trim().parse::<T>() {
        Ok(value) if value != T::default() => Ok(Some(value)),
        _ => Err(ConfigError::Invalid { key, value: raw }),
    }
}
