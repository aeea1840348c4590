//! Domain module for task management.

pub mod task;

pub use task::{Task, TaskId, TaskPatch};
