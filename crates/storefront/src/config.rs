//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `TECHSTORE_HOST` - Bind address (default: 127.0.0.1)
//! - `TECHSTORE_PORT` - Listen port (default: 3000)
//! - `TECHSTORE_DATA_PATH` - JSON file for cart and session state
//!   (default: unset, state is kept in memory)
//! - `TECHSTORE_PAGE_SIZE` - Products per page (default: 12)
//! - `TECHSTORE_LOAD_MORE_DELAY_MS` - Simulated load-more latency (default: 500)
//! - `TECHSTORE_CHECKOUT_DELAY_MS` - Simulated checkout latency (default: 500)
//! - `TECHSTORE_SIGN_IN_DELAY_MS` - Simulated sign-in latency (default: 1000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::catalog::DEFAULT_PAGE_SIZE;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Artificial latencies for the simulated operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedDelays {
    pub load_more: Duration,
    pub checkout: Duration,
    pub sign_in: Duration,
}

impl Default for SimulatedDelays {
    fn default() -> Self {
        Self {
            load_more: Duration::from_millis(500),
            checkout: Duration::from_millis(500),
            sign_in: Duration::from_millis(1000),
        }
    }
}

impl SimulatedDelays {
    /// No latency at all, for command-line use.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            load_more: Duration::ZERO,
            checkout: Duration::ZERO,
            sign_in: Duration::ZERO,
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Backing file for persisted state; `None` keeps state in memory
    pub data_path: Option<PathBuf>,
    /// Products per catalog page
    pub page_size: usize,
    /// Simulated operation latencies
    pub delays: SimulatedDelays,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            data_path: None,
            page_size: DEFAULT_PAGE_SIZE,
            delays: SimulatedDelays::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let page_size: usize = parse_or(&lookup, "TECHSTORE_PAGE_SIZE", defaults.page_size)?;
        if page_size == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "TECHSTORE_PAGE_SIZE".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            host: parse_or(&lookup, "TECHSTORE_HOST", defaults.host)?,
            port: parse_or(&lookup, "TECHSTORE_PORT", defaults.port)?,
            data_path: lookup("TECHSTORE_DATA_PATH").map(PathBuf::from),
            page_size,
            delays: SimulatedDelays {
                load_more: millis_or(
                    &lookup,
                    "TECHSTORE_LOAD_MORE_DELAY_MS",
                    defaults.delays.load_more,
                )?,
                checkout: millis_or(
                    &lookup,
                    "TECHSTORE_CHECKOUT_DELAY_MS",
                    defaults.delays.checkout,
                )?,
                sign_in: millis_or(&lookup, "TECHSTORE_SIGN_IN_DELAY_MS", defaults.delays.sign_in)?,
            },
            sentry_dsn: lookup("SENTRY_DSN"),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse `key` if set, otherwise use `default`.
fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Parse a millisecond count if set, otherwise use `default`.
fn millis_or(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    lookup(key).map_or(Ok(default), |_| {
        parse_or(lookup, key, 0_u64).map(Duration::from_millis)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.page_size, 12);
        assert!(config.data_path.is_none());
        assert_eq!(config.delays, SimulatedDelays::default());
        assert_eq!(config.delays.sign_in, Duration::from_secs(1));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("TECHSTORE_HOST", "0.0.0.0"),
            ("TECHSTORE_PORT", "8080"),
            ("TECHSTORE_DATA_PATH", "/tmp/techstore.json"),
            ("TECHSTORE_PAGE_SIZE", "6"),
            ("TECHSTORE_CHECKOUT_DELAY_MS", "0"),
            ("SENTRY_DSN", "https://key@sentry.example.com/1"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.data_path, Some(PathBuf::from("/tmp/techstore.json")));
        assert_eq!(config.page_size, 6);
        assert_eq!(config.delays.checkout, Duration::ZERO);
        assert_eq!(config.delays.load_more, Duration::from_millis(500));
        assert!(config.sentry_dsn.is_some());
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = config_from(&[("TECHSTORE_PORT", "  "), ("SENTRY_DSN", "")]).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_invalid_port() {
        let err = config_from(&[("TECHSTORE_PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "TECHSTORE_PORT"));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        assert!(config_from(&[("TECHSTORE_PAGE_SIZE", "0")]).is_err());
    }

    #[test]
    fn test_negative_delay_rejected() {
        assert!(config_from(&[("TECHSTORE_SIGN_IN_DELAY_MS", "-5")]).is_err());
    }
}
