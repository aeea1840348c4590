//! Repository factory for runtime backend selection.
//!
//! This module creates the task repository based on environment
//! configuration, switching between the in-memory and `PostgreSQL`
//! backends at startup.
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `in_memory` (default) | `postgres`
//! - `DATABASE_URL`: `PostgreSQL` connection URL (required when `STORAGE_MODE=postgres`)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
//! - `DATABASE_ACQUIRE_TIMEOUT_SECS`: seconds to wait for a pooled connection (default: 30)
//!
//! # Example
//!
//! ```ignore
//! let config = RepositoryConfig::from_env()?;
//! let repository = RepositoryFactory::new(config).create().await?;
//! let tasks = repository.find_all().await?;
//! ```

use std::env;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use super::{InMemoryTaskRepository, PostgresTaskRepository, RepositoryError, TaskRepository};

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Configuration Types
// =============================================================================

/// Storage mode for persistent data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// In-memory storage. Suitable for testing and development.
    #[default]
    InMemory,
    /// `PostgreSQL` storage for production use.
    Postgres,
}

impl FromStr for StorageMode {
    type Err = ConfigurationError;

    /// Parses a storage mode from a string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidStorageMode` if the string is not recognized.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            _ => Err(ConfigurationError::InvalidStorageMode(value.to_string())),
        }
    }
}

/// Configuration for the repository factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    /// Storage backend.
    pub storage_mode: StorageMode,
    /// `PostgreSQL` connection URL (required when `storage_mode` is `Postgres`).
    pub database_url: Option<String>,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
    /// Maximum time to wait for a pooled connection.
    pub acquire_timeout: Duration,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            storage_mode: StorageMode::default(),
            database_url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
        }
    }
}

impl RepositoryConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> RepositoryConfigBuilder {
        RepositoryConfigBuilder::default()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if:
    /// - `STORAGE_MODE` contains an invalid value
    /// - a numeric variable cannot be parsed
    /// - `DATABASE_URL` is missing when `STORAGE_MODE=postgres`
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Creates a configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`RepositoryConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_mode = match non_blank(&lookup, "STORAGE_MODE") {
            Some(value) => value.parse()?,
            None => StorageMode::default(),
        };

        let database_url = non_blank(&lookup, "DATABASE_URL");

        let max_connections =
            parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let acquire_timeout_secs = parse_or(
            &lookup,
            "DATABASE_ACQUIRE_TIMEOUT_SECS",
            DEFAULT_ACQUIRE_TIMEOUT_SECS,
        )?;

        let config = Self {
            storage_mode,
            database_url,
            max_connections,
            acquire_timeout: Duration::from_secs(acquire_timeout_secs),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the URL is missing for `Postgres` or the
    /// pool size is zero.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.storage_mode == StorageMode::Postgres && self.database_url.is_none() {
            return Err(ConfigurationError::MissingDatabaseUrl);
        }

        if self.max_connections == 0 {
            return Err(ConfigurationError::InvalidValue {
                key: "DATABASE_MAX_CONNECTIONS".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Returns the trimmed value for `key`, treating blank values as absent.
pub(crate) fn non_blank<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Parses the value for `key`, falling back to `default` when absent.
pub(crate) fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigurationError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    non_blank(lookup, key).map_or(Ok(default), |value| {
        value
            .parse()
            .map_err(|error: T::Err| ConfigurationError::InvalidValue {
                key: key.to_string(),
                message: format!("'{value}': {error}"),
            })
    })
}

/// Builder for `RepositoryConfig`.
///
/// # Example
///
/// ```ignore
/// let config = RepositoryConfig::builder()
///     .storage_mode(StorageMode::Postgres)
///     .database_url("postgres://localhost/tasks")
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct RepositoryConfigBuilder {
    storage_mode: StorageMode,
    database_url: Option<String>,
    max_connections: Option<u32>,
    acquire_timeout: Option<Duration>,
}

impl RepositoryConfigBuilder {
    /// Sets the storage mode.
    #[must_use]
    pub const fn storage_mode(mut self, mode: StorageMode) -> Self {
        self.storage_mode = mode;
        self
    }

    /// Sets the `PostgreSQL` database URL.
    #[must_use]
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Sets the maximum pool size.
    #[must_use]
    pub const fn max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = Some(max_connections);
        self
    }

    /// Sets the pool acquire timeout.
    #[must_use]
    pub const fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = Some(timeout);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the configuration is invalid.
    pub fn build(self) -> Result<RepositoryConfig, ConfigurationError> {
        let defaults = RepositoryConfig::default();
        let config = RepositoryConfig {
            storage_mode: self.storage_mode,
            database_url: self.database_url,
            max_connections: self.max_connections.unwrap_or(defaults.max_connections),
            acquire_timeout: self.acquire_timeout.unwrap_or(defaults.acquire_timeout),
        };

        config.validate()?;
        Ok(config)
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur while reading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Invalid storage mode value.
    #[error("Invalid storage mode: '{0}'. Expected 'in_memory' or 'postgres'")]
    InvalidStorageMode(String),

    /// Missing `DATABASE_URL` when storage mode is Postgres.
    #[error("DATABASE_URL environment variable is required when STORAGE_MODE=postgres")]
    MissingDatabaseUrl,

    /// A variable is present but its value cannot be used.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue {
        /// Name of the environment variable.
        key: String,
        /// Why the value was rejected.
        message: String,
    },
}

/// Errors that can occur during factory initialization.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    DatabaseConnection(String),

    /// Schema creation error.
    #[error("Schema initialization error: {0}")]
    Schema(#[from] RepositoryError),
}

// =============================================================================
// Repository Factory
// =============================================================================

/// Factory for creating the task repository based on configuration.
#[derive(Debug, Clone)]
pub struct RepositoryFactory {
    config: RepositoryConfig,
}

impl RepositoryFactory {
    /// Creates a new repository factory with the given configuration.
    #[must_use]
    pub const fn new(config: RepositoryConfig) -> Self {
        Self { config }
    }

    /// Creates a new repository factory from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError::Configuration` if environment configuration is invalid.
    pub fn from_env() -> Result<Self, FactoryError> {
        let config = RepositoryConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Returns the configuration used by this factory.
    #[must_use]
    pub const fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    /// Creates the task repository for the configured storage mode.
    ///
    /// For `Postgres`, this connects the pool and creates the `tasks` table
    /// if needed.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError` if the pool cannot connect or the schema
    /// statement fails.
    pub async fn create(&self) -> Result<Arc<dyn TaskRepository>, FactoryError> {
        match self.config.storage_mode {
            StorageMode::InMemory => Ok(Arc::new(InMemoryTaskRepository::new())),
            StorageMode::Postgres => {
                let pool = self.create_postgres_pool().await?;
                let repository = PostgresTaskRepository::new(pool);
                repository.ensure_schema().await?;
                Ok(Arc::new(repository))
            }
        }
    }

    /// Creates a `PostgreSQL` connection pool.
    async fn create_postgres_pool(&self) -> Result<PgPool, FactoryError> {
        let database_url = self
            .config
            .database_url
            .as_ref()
            .ok_or(ConfigurationError::MissingDatabaseUrl)?;

        PgPoolOptions::new()
            .max_connections(self.config.max_connections)
            .acquire_timeout(self.config.acquire_timeout)
            .connect(database_url)
            .await
            .map_err(|error| FactoryError::DatabaseConnection(error.to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    // -------------------------------------------------------------------------
    // StorageMode Tests
    // -------------------------------------------------------------------------

    #[rstest]
    #[case("in_memory", StorageMode::InMemory)]
    #[case("inmemory", StorageMode::InMemory)]
    #[case("memory", StorageMode::InMemory)]
    #[case("IN_MEMORY", StorageMode::InMemory)]
    #[case("postgres", StorageMode::Postgres)]
    #[case("postgresql", StorageMode::Postgres)]
    #[case("pg", StorageMode::Postgres)]
    #[case("POSTGRES", StorageMode::Postgres)]
    fn test_storage_mode_from_str_valid(#[case] input: &str, #[case] expected: StorageMode) {
        let result: Result<StorageMode, _> = input.parse();
        assert_eq!(result, Ok(expected));
    }

    #[rstest]
    #[case("invalid")]
    #[case("mysql")]
    #[case("")]
    fn test_storage_mode_from_str_invalid(#[case] input: &str) {
        let result: Result<StorageMode, _> = input.parse();
        assert_eq!(
            result,
            Err(ConfigurationError::InvalidStorageMode(input.to_string()))
        );
    }

    #[rstest]
    fn test_storage_mode_default() {
        assert_eq!(StorageMode::default(), StorageMode::InMemory);
    }

    // -------------------------------------------------------------------------
    // RepositoryConfig Tests
    // -------------------------------------------------------------------------

    #[rstest]
    fn test_from_lookup_defaults() {
        let config = RepositoryConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, RepositoryConfig::default());
    }

    #[rstest]
    fn test_from_lookup_postgres() {
        let config = RepositoryConfig::from_lookup(lookup_from(&[
            ("STORAGE_MODE", "postgres"),
            ("DATABASE_URL", "  postgres://localhost/tasks  "),
            ("DATABASE_MAX_CONNECTIONS", "4"),
            ("DATABASE_ACQUIRE_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.storage_mode, StorageMode::Postgres);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/tasks")
        );
        assert_eq!(config.max_connections, 4);
        assert_eq!(config.acquire_timeout, Duration::from_secs(5));
    }

    #[rstest]
    #[case(&[("STORAGE_MODE", "postgres")])]
    #[case(&[("STORAGE_MODE", "postgres"), ("DATABASE_URL", "   ")])]
    fn test_from_lookup_postgres_requires_url(#[case] pairs: &[(&str, &str)]) {
        let result = RepositoryConfig::from_lookup(lookup_from(pairs));
        assert_eq!(result, Err(ConfigurationError::MissingDatabaseUrl));
    }

    #[rstest]
    #[case("DATABASE_MAX_CONNECTIONS", "many")]
    #[case("DATABASE_MAX_CONNECTIONS", "0")]
    #[case("DATABASE_ACQUIRE_TIMEOUT_SECS", "-1")]
    fn test_from_lookup_invalid_numbers(#[case] key: &str, #[case] value: &str) {
        let result = RepositoryConfig::from_lookup(lookup_from(&[(key, value)]));
        match result {
            Err(ConfigurationError::InvalidValue { key: reported, .. }) => {
                assert_eq!(reported, key);
            }
            other => panic!("Expected InvalidValue, got {other:?}"),
        }
    }

    #[rstest]
    fn test_builder_validates() {
        let result = RepositoryConfig::builder()
            .storage_mode(StorageMode::Postgres)
            .build();
        assert_eq!(result, Err(ConfigurationError::MissingDatabaseUrl));

        let config = RepositoryConfig::builder()
            .storage_mode(StorageMode::Postgres)
            .database_url("postgres://localhost/tasks")
            .max_connections(2)
            .build()
            .unwrap();
        assert_eq!(config.max_connections, 2);
        assert_eq!(
            config.acquire_timeout,
            Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS)
        );
    }

    // -------------------------------------------------------------------------
    // RepositoryFactory Tests
    // -------------------------------------------------------------------------

    #[rstest]
    #[tokio::test]
    async fn test_factory_creates_in_memory_repository() {
        let factory = RepositoryFactory::new(RepositoryConfig::default());

        let repository = factory.create().await.unwrap();

        assert_eq!(repository.count().await.unwrap(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn test_factory_postgres_without_url_fails() {
        let config = RepositoryConfig {
            storage_mode: StorageMode::Postgres,
            ..RepositoryConfig::default()
        };
        let factory = RepositoryFactory::new(config);

        let result = factory.create().await;

        assert!(matches!(
            result,
            Err(FactoryError::Configuration(
                ConfigurationError::MissingDatabaseUrl
            ))
        ));
    }
}
