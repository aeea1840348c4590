//! Data Transfer Objects for API requests and responses.
//!
//! These are kept separate from the domain model so the JSON contract can
//! stay stable while the domain evolves.

use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use crate::domain::{Task, TaskPatch};

/// Maximum title length, in characters.
pub const MAX_TITLE_LENGTH: usize = 255;

// =============================================================================
// Task DTOs
// =============================================================================

/// Request DTO for creating a new task.
///
/// `title` is optional at the serde level so a missing title surfaces as a
/// validation error rather than a deserialization failure. Any `id` in the
/// body is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTaskRequest {
    /// Title of the task.
    #[serde(default)]
    pub title: Option<String>,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Request DTO for partially updating a task.
///
/// Absent and `null` fields leave the stored value unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskRequest {
    /// New title for the task.
    #[serde(default)]
    pub title: Option<String>,
    /// New description for the task.
    #[serde(default)]
    pub description: Option<String>,
}

/// Response DTO for a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    /// Task ID.
    pub id: Option<i64>,
    /// Title of the task.
    pub title: String,
    /// Description of the task.
    pub description: Option<String>,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.map(crate::domain::TaskId::value),
            title: task.title.clone(),
            description: task.description.clone(),
        }
    }
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id.map(crate::domain::TaskId::value),
            title: task.title,
            description: task.description,
        }
    }
}

impl CreateTaskRequest {
    /// Validates the request and builds an unsaved task.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the title is missing, blank or too long.
    pub fn into_task(self) -> Result<Task, ValidationError> {
        let title = validate_title(self.title)?;
        Ok(Task::new(title, self.description))
    }
}

impl UpdateTaskRequest {
    /// Validates the request and builds a patch.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if a supplied title is blank or too long.
    pub fn into_patch(self) -> Result<TaskPatch, ValidationError> {
        let title = self.title.map(|title| validate_title(Some(title))).transpose()?;
        Ok(TaskPatch {
            title,
            description: self.description,
        })
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Validates a task title.
///
/// # Validation Rules
///
/// - Title must be present
/// - Title must not be blank
/// - Title must not exceed [`MAX_TITLE_LENGTH`] characters
///
/// # Errors
///
/// Returns `ValidationError` for the `title` field when a rule is broken.
pub fn validate_title(title: Option<String>) -> Result<String, ValidationError> {
    let Some(title) = title else {
        return Err(ValidationError::single("title", "Title is required"));
    };

    if title.trim().is_empty() {
        return Err(ValidationError::single("title", "Title must not be blank"));
    }

    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(ValidationError::single(
            "title",
            format!("Title must not exceed {MAX_TITLE_LENGTH} characters"),
        ));
    }

    Ok(title)
}

// =============================================================================
// Tests
// =============================================================================
