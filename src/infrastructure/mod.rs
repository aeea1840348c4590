//! Infrastructure module for external services.
//!
//! This module contains the task repositories, the factory that selects one
//! at startup, and environment-driven configuration.

pub mod config;
pub mod factory;
pub mod in_memory;
pub mod postgres;
pub mod repository;

pub use config::{RuntimeConfig, ServerConfig};
pub use factory::{
    ConfigurationError, FactoryError, RepositoryConfig, RepositoryConfigBuilder,
    RepositoryFactory, StorageMode,
};
pub use in_memory::InMemoryTaskRepository;
pub use postgres::PostgresTaskRepository;
pub use repository::{RepositoryError, TaskRepository};
