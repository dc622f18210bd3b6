use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use crate::models::{NewTask, Task, TaskPatch};

use super::StoreError;

const INIT_SCHEMA: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT,
    category_id INTEGER NOT NULL,
    completed BOOLEAN NOT NULL DEFAULT 0
)";

/// Durable CRUD over task records. Each call is one discrete operation;
/// the API layer never spans two calls with a transaction.
pub trait TaskStore: Send + Sync {
    fn list(&self) -> Result<Vec<Task>, StoreError>;
    fn get(&self, id: &str) -> Result<Task, StoreError>;
    fn create(&self, new: NewTask) -> Result<Task, StoreError>;
    fn update(&self, id: &str, patch: TaskPatch) -> Result<Task, StoreError>;
    fn delete(&self, id: &str) -> Result<Task, StoreError>;
}

pub struct SqliteTaskStore {
    conn: Mutex<Connection>,
}

impl SqliteTaskStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path.as_ref())
            .map_err(|e| StoreError::Storage(format!("Failed to open database: {}", e)))?;
        conn.execute(INIT_SCHEMA, [])
            .map_err(|e| StoreError::Storage(format!("Failed to create tasks table: {}", e)))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn get_connection(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Storage(format!("Failed to lock connection: {}", e)))
    }

    fn row_to_task(row: &Row<'_>) -> rusqlite::Result<Task> {
        Ok(Task {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            category_id: row.get(3)?,
            completed: row.get(4)?,
        })
    }

    fn get_by_id(conn: &Connection, id: &str) -> Result<Task, StoreError> {
        conn.query_row(
            "SELECT id, title, description, category_id, completed FROM tasks WHERE id = ?1",
            params![id],
            Self::row_to_task,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
            other => StoreError::Sqlite(other),
        })
    }
}

impl TaskStore for SqliteTaskStore {
    fn list(&self) -> Result<Vec<Task>, StoreError> {
        let conn = self.get_connection()?;
        let mut stmt = conn
            .prepare("SELECT id, title, description, category_id, completed FROM tasks ORDER BY rowid")
            .map_err(|e| StoreError::Storage(format!("Failed to prepare tasks query: {}", e)))?;

        let task_iter = stmt
            .query_map([], Self::row_to_task)
            .map_err(|e| StoreError::Storage(format!("Failed to query tasks: {}", e)))?;

        let mut tasks = Vec::new();
        for task in task_iter {
            tasks.push(
                task.map_err(|e| StoreError::Storage(format!("Failed to read task: {}", e)))?,
            );
        }
        Ok(tasks)
    }

    fn get(&self, id: &str) -> Result<Task, StoreError> {
        let conn = self.get_connection()?;
        Self::get_by_id(&conn, id)
    }

    fn create(&self, new: NewTask) -> Result<Task, StoreError> {
        if new.title.trim().is_empty() {
            return Err(StoreError::Validation(
                "task title cannot be empty".to_string(),
            ));
        }

        // completed is forced to false here no matter what the request carried.
        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            description: new.description,
            category_id: new.category_id,
            completed: false,
        };

        let conn = self.get_connection()?;
        conn.execute(
            "INSERT INTO tasks (id, title, description, category_id, completed) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                task.id,
                task.title,
                task.description,
                task.category_id,
                task.completed,
            ],
        )?;
        Ok(task)
    }

    fn update(&self, id: &str, patch: TaskPatch) -> Result<Task, StoreError> {
        let conn = self.get_connection()?;
        let mut task = Self::get_by_id(&conn, id)?;

        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = Some(description);
        }
        if let Some(category_id) = patch.category_id {
            task.category_id = category_id;
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }

        conn.execute(
            "UPDATE tasks SET title = ?1, description = ?2, category_id = ?3, completed = ?4 WHERE id = ?5",
            params![
                task.title,
                task.description,
                task.category_id,
                task.completed,
                task.id,
            ],
        )?;
        Ok(task)
    }

    fn delete(&self, id: &str) -> Result<Task, StoreError> {
        let conn = self.get_connection()?;
        let task = Self::get_by_id(&conn, id)?;
        conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(task)
    }
}
