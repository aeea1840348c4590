//! Task domain model.
//!
//! A task is an id/title/description record. The id is assigned by the
//! store on first save and never changes afterwards.

use serde::{Deserialize, Serialize};

// =============================================================================
// Value Objects - Newtypes
// =============================================================================

/// Unique identifier for a task.
///
/// Wraps the database-generated `BIGSERIAL` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Creates a `TaskId` from a raw key value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw key value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

// =============================================================================
// Task Entity
// =============================================================================

/// A task record.
///
/// `id` is `None` until the task has been saved once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned identifier.
    pub id: Option<TaskId>,
    /// Title of the task.
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
}

impl Task {
    /// Creates a task that has not been persisted yet.
    #[must_use]
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description,
        }
    }

    /// Creates a task that already carries a store-assigned identifier.
    #[must_use]
    pub fn persisted(id: TaskId, title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: Some(id),
            title: title.into(),
            description,
        }
    }

    /// Returns a copy of this task carrying the given identifier.
    #[must_use]
    pub fn with_id(self, id: TaskId) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }

    /// Applies a partial update.
    ///
    /// Only fields present in the patch are overwritten.
    #[must_use]
    pub fn apply(self, patch: TaskPatch) -> Self {
        Self {
            id: self.id,
            title: patch.title.unwrap_or(self.title),
            description: patch.description.or(self.description),
        }
    }
}

// =============================================================================
// Task Patch
// =============================================================================

/// Partial update for a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Replacement title, if any.
    pub title: Option<String>,
    /// Replacement description, if any.
    pub description: Option<String>,
}

impl TaskPatch {
    /// Returns true if the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

// =============================================================================
// Tests
// =============================================================================
