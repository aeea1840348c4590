//! In-memory repository implementation.
//!
//! Suitable for development and tests. Identifiers come from an atomic
//! sequence starting at 1, mirroring a `BIGSERIAL` column.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use futures::future::BoxFuture;
use tokio::sync::RwLock;

use crate::domain::{Task, TaskId};
use crate::infrastructure::{RepositoryError, TaskRepository};

/// In-memory implementation of `TaskRepository`.
///
/// Cloning shares the underlying storage.
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
    sequence: Arc<AtomicI64>,
}

impl InMemoryTaskRepository {
    /// Creates a new empty in-memory task repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(RwLock::new(HashMap::new())),
            sequence: Arc::new(AtomicI64::new(1)),
        }
    }

    fn next_id(&self) -> TaskId {
        TaskId::new(self.sequence.fetch_add(1, Ordering::SeqCst))
    }
}

fn overwrite(tasks: &mut HashMap<TaskId, Task>, id: TaskId, task: &Task) -> Option<Task> {
    let existing = tasks.get_mut(&id)?;
    existing.title.clone_from(&task.title);
    existing.description.clone_from(&task.description);
    Some(existing.clone())
}

impl Default for InMemoryTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(clippy::significant_drop_tightening)]
impl TaskRepository for InMemoryTaskRepository {
    fn find_all(&self) -> BoxFuture<'_, Result<Vec<Task>, RepositoryError>> {
        Box::pin(async move {
            let guard = self.tasks.read().await;
            Ok(guard.values().cloned().collect())
        })
    }

    fn find_by_id(&self, id: TaskId) -> BoxFuture<'_, Result<Option<Task>, RepositoryError>> {
        Box::pin(async move {
            let guard = self.tasks.read().await;
            Ok(guard.get(&id).cloned())
        })
    }

    fn save(&self, task: Task) -> BoxFuture<'_, Result<Task, RepositoryError>> {
        Box::pin(async move {
            let mut guard = self.tasks.write().await;
            match task.id {
                None => {
                    let id = self.next_id();
                    let stored = task.with_id(id);
                    guard.insert(id, stored.clone());
                    Ok(stored)
                }
                // Updating a missing row is a silent no-op.
                Some(id) => Ok(overwrite(&mut guard, id, &task).unwrap_or(task)),
            }
        })
    }

    fn update(&self, task: Task) -> BoxFuture<'_, Result<Option<Task>, RepositoryError>> {
        Box::pin(async move {
            let Some(id) = task.id else {
                return Ok(None);
            };
            let mut guard = self.tasks.write().await;
            Ok(overwrite(&mut guard, id, &task))
        })
    }

    fn exists_by_id(&self, id: TaskId) -> BoxFuture<'_, Result<bool, RepositoryError>> {
        Box::pin(async move {
            let guard = self.tasks.read().await;
            Ok(guard.contains_key(&id))
        })
    }

    fn delete_by_id(&self, id: TaskId) -> BoxFuture<'_, Result<(), RepositoryError>> {
        Box::pin(async move {
            self.tasks.write().await.remove(&id);
            Ok(())
        })
    }

    fn count(&self) -> BoxFuture<'_, Result<u64, RepositoryError>> {
        Box::pin(async move {
            let guard = self.tasks.read().await;
            Ok(guard.len() as u64)
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
