//! Repository trait for task persistence.
//!
//! Every method returns a boxed future so the trait stays object safe and
//! the API layer can hold an `Arc<dyn TaskRepository>` chosen at runtime.

use futures::future::BoxFuture;
use thiserror::Error;

use crate::domain::{Task, TaskId};

// =============================================================================
// Repository Error
// =============================================================================

/// Errors that can occur during repository operations.
///
/// A missing row is not an error: lookups return `Ok(None)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Query or connection failure reported by the database.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// No connection could be acquired from the pool.
    #[error("Database unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                Self::Unavailable(error.to_string())
            }
            other => Self::DatabaseError(other.to_string()),
        }
    }
}

// =============================================================================
// Task Repository
// =============================================================================

/// Repository trait for Task entities.
///
/// # Example
///
/// ```ignore
/// let created = repository.save(Task::new("Title", None)).await?;
/// let found = repository.find_by_id(created.id.unwrap()).await?;
/// ```
pub trait TaskRepository: Send + Sync {
    /// Returns every stored task, in no particular order.
    fn find_all(&self) -> BoxFuture<'_, Result<Vec<Task>, RepositoryError>>;

    /// Finds a task by its ID.
    ///
    /// Returns `Ok(Some(task))` if found, `Ok(None)` if not found,
    /// or an error if the operation fails.
    fn find_by_id(&self, id: TaskId) -> BoxFuture<'_, Result<Option<Task>, RepositoryError>>;

    /// Saves a task (insert or update).
    ///
    /// A task without an ID is inserted and returned with the generated ID.
    /// A task with an ID overwrites the title and description of the
    /// matching row; if no row matches, the input is returned unchanged.
    fn save(&self, task: Task) -> BoxFuture<'_, Result<Task, RepositoryError>>;

    /// Overwrites the title and description of an existing task.
    ///
    /// Returns the stored row, or `Ok(None)` if the task has no ID or no
    /// row matches it (for example after a concurrent delete).
    fn update(&self, task: Task) -> BoxFuture<'_, Result<Option<Task>, RepositoryError>>;

    /// Returns true if a task with the given ID exists.
    fn exists_by_id(&self, id: TaskId) -> BoxFuture<'_, Result<bool, RepositoryError>>;

    /// Deletes a task by its ID. Deleting a missing task is not an error.
    fn delete_by_id(&self, id: TaskId) -> BoxFuture<'_, Result<(), RepositoryError>>;

    /// Counts all tasks.
    fn count(&self) -> BoxFuture<'_, Result<u64, RepositoryError>>;
}

// =============================================================================
// Tests
// =============================================================================
