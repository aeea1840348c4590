//! `PostgreSQL` repository implementation.
//!
//! All statements are parameterized with `$n` binds. Each statement borrows a
//! connection from the pool for its own duration; the connection goes back to
//! the pool when the query future completes or is dropped.
//!
//! # Table Schema
//!
//! ```sql
//! CREATE TABLE tasks (
//!     id_task BIGSERIAL PRIMARY KEY,
//!     title TEXT NOT NULL,
//!     description TEXT
//! );
//! ```

use futures::future::BoxFuture;
use sqlx::PgPool;

use crate::domain::{Task, TaskId};
use crate::infrastructure::{RepositoryError, TaskRepository};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS tasks (\
     id_task BIGSERIAL PRIMARY KEY, \
     title TEXT NOT NULL, \
     description TEXT\
     )";

const SELECT_ALL: &str = "SELECT id_task, title, description FROM tasks";

const SELECT_BY_ID: &str = "SELECT id_task, title, description FROM tasks WHERE id_task = $1";

const INSERT: &str = "INSERT INTO tasks (title, description) VALUES ($1, $2) RETURNING id_task";

const UPDATE: &str = "UPDATE tasks SET title = $1, description = $2 WHERE id_task = $3 \
     RETURNING id_task, title, description";

const EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM tasks WHERE id_task = $1)";

const DELETE: &str = "DELETE FROM tasks WHERE id_task = $1";

const COUNT: &str = "SELECT COUNT(*) FROM tasks";

// =============================================================================
// Row Mapping
// =============================================================================

/// A row of the `tasks` table.
#[derive(Debug, sqlx::FromRow)]
struct TaskRow {
    id_task: i64,
    title: String,
    description: Option<String>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Self::persisted(TaskId::new(row.id_task), row.title, row.description)
    }
}

fn task_count(count: i64) -> Result<u64, RepositoryError> {
    u64::try_from(count)
        .map_err(|_| RepositoryError::DatabaseError(format!("Negative task count: {count}")))
}

// =============================================================================
// PostgreSQL Task Repository
// =============================================================================

/// `PostgreSQL` implementation of `TaskRepository`.
///
/// # Example
///
/// ```ignore
/// let pool = PgPool::connect("postgres://localhost/tasks").await?;
/// let repository = PostgresTaskRepository::new(pool);
/// repository.ensure_schema().await?;
///
/// let task = repository.save(Task::new("My Task", None)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository over the given connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `tasks` table if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the DDL statement fails.
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    async fn insert(&self, task: Task) -> Result<Task, RepositoryError> {
        let (id,): (i64,) = sqlx::query_as(INSERT)
            .bind(&task.title)
            .bind(&task.description)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!(task_id = id, "Inserted task");
        Ok(task.with_id(TaskId::new(id)))
    }

    async fn update_row(&self, id: TaskId, task: &Task) -> Result<Option<Task>, RepositoryError> {
        let row: Option<TaskRow> = sqlx::query_as(UPDATE)
            .bind(&task.title)
            .bind(&task.description)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await?;

        if row.is_none() {
            tracing::debug!(task_id = %id, "Update matched no rows");
        }

        Ok(row.map(Task::from))
    }
}

impl TaskRepository for PostgresTaskRepository {
    fn find_all(&self) -> BoxFuture<'_, Result<Vec<Task>, RepositoryError>> {
        Box::pin(async move {
            let rows: Vec<TaskRow> = sqlx::query_as(SELECT_ALL).fetch_all(&self.pool).await?;
            Ok(rows.into_iter().map(Task::from).collect())
        })
    }

    fn find_by_id(&self, id: TaskId) -> BoxFuture<'_, Result<Option<Task>, RepositoryError>> {
        Box::pin(async move {
            let row: Option<TaskRow> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.value())
                .fetch_optional(&self.pool)
                .await?;
            Ok(row.map(Task::from))
        })
    }

    fn save(&self, task: Task) -> BoxFuture<'_, Result<Task, RepositoryError>> {
        Box::pin(async move {
            match task.id {
                None => self.insert(task).await,
                Some(id) => Ok(self.update_row(id, &task).await?.unwrap_or(task)),
            }
        })
    }

    fn update(&self, task: Task) -> BoxFuture<'_, Result<Option<Task>, RepositoryError>> {
        Box::pin(async move {
            match task.id {
                None => Ok(None),
                Some(id) => self.update_row(id, &task).await,
            }
        })
    }

    fn exists_by_id(&self, id: TaskId) -> BoxFuture<'_, Result<bool, RepositoryError>> {
        Box::pin(async move {
            let (exists,): (bool,) = sqlx::query_as(EXISTS)
                .bind(id.value())
                .fetch_one(&self.pool)
                .await?;
            Ok(exists)
        })
    }

    fn delete_by_id(&self, id: TaskId) -> BoxFuture<'_, Result<(), RepositoryError>> {
        Box::pin(async move {
            let result = sqlx::query(DELETE)
                .bind(id.value())
                .execute(&self.pool)
                .await?;
            tracing::debug!(task_id = %id, deleted = result.rows_affected(), "Deleted task");
            Ok(())
        })
    }

    fn count(&self) -> BoxFuture<'_, Result<u64, RepositoryError>> {
        Box::pin(async move {
            let (count,): (i64,) = sqlx::query_as(COUNT).fetch_one(&self.pool).await?;
            task_count(count)
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
