//! HTTP server and runtime configuration.
//!
//! # Environment Variables
//!
//! - `HOST`: Server host address (default: `0.0.0.0`)
//! - `PORT`: Server port (default: `8080`)
//! - `CORS_ALLOWED_ORIGIN`: Origin allowed to call the API (default: `http://localhost:3000`)
//! - `WORKER_THREADS`: Number of tokio worker threads (default: logical CPU count)

use std::env;
use std::net::SocketAddr;

use super::factory::{ConfigurationError, non_blank, parse_or};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Worker thread cap used when the CPU count cannot be determined.
const FALLBACK_MAX_WORKER_THREADS: usize = 64;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Browser origin allowed by the CORS layer.
    pub cors_allowed_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_allowed_origin: DEFAULT_CORS_ALLOWED_ORIGIN.to_string(),
        }
    }
}

impl ServerConfig {
    /// Loads the server configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidValue` if `PORT` is not a valid port number.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads the server configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host: non_blank(&lookup, "HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            cors_allowed_origin: non_blank(&lookup, "CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|| DEFAULT_CORS_ALLOWED_ORIGIN.to_string()),
        })
    }

    /// Resolves the socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidValue` if `host:port` is not a socket address.
    pub fn socket_address(&self) -> Result<SocketAddr, ConfigurationError> {
        let address = format!("{}:{}", self.host, self.port);
        address
            .parse()
            .map_err(|error| ConfigurationError::InvalidValue {
                key: "HOST".to_string(),
                message: format!("'{address}': {error}"),
            })
    }
}

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Tokio runtime settings.
///
/// Read before logging is initialized, so problems with `WORKER_THREADS` are
/// carried as a `warning` for the caller to print instead of failing startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Worker thread count, `None` for the tokio default.
    pub worker_threads: Option<usize>,
    /// Why the configured value was ignored or capped.
    pub warning: Option<String>,
}

impl RuntimeConfig {
    /// Loads the runtime configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let parallelism = std::thread::available_parallelism()
            .ok()
            .map(std::num::NonZeroUsize::get);
        Self::from_lookup(|key| env::var(key).ok(), parallelism)
    }

    /// Loads the runtime configuration from an arbitrary key lookup.
    ///
    /// Values above four threads per logical CPU are capped. Zero, blank or
    /// unparsable values fall back to the tokio default.
    pub fn from_lookup<F>(lookup: F, parallelism: Option<usize>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(value) = non_blank(&lookup, "WORKER_THREADS") else {
            return Self::default();
        };

        match value.parse::<usize>() {
            Ok(0) => Self {
                worker_threads: None,
                warning: Some(
                    "WORKER_THREADS=0 is invalid (must be > 0), using default".to_string(),
                ),
            },
            Ok(threads) => {
                let max_threads = parallelism
                    .map_or(FALLBACK_MAX_WORKER_THREADS, |count| count.saturating_mul(4));
                if threads > max_threads {
                    Self {
                        worker_threads: Some(max_threads),
                        warning: Some(format!(
                            "WORKER_THREADS={threads} exceeds recommended limit ({max_threads}), capping to {max_threads}"
                        )),
                    }
                } else {
                    Self {
                        worker_threads: Some(threads),
                        warning: None,
                    }
                }
            }
            Err(error) => Self {
                worker_threads: None,
                warning: Some(format!(
                    "WORKER_THREADS='{value}' is not a valid number ({error}), using default"
                )),
            },
        }
    }
}
