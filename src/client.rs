//! Typed HTTP client for the to-do API plus the list-view state machine a
//! frontend would drive. All mutations go through the wire contract; local
//! state is patched from server responses, never re-fetched wholesale.

use thiserror::Error;
use tracing::error;

use crate::models::{Category, NewCategory, NewTask, Task, TaskPatch};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Thin wrapper over `reqwest` for the documented routes.
pub struct TodoClient {
    http: reqwest::Client,
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn categories(&self) -> Result<Vec<Category>, ClientError> {
        let res = self
            .http
            .get(self.url("/api/categories"))
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn create_category(&self, new: &NewCategory) -> Result<Category, ClientError> {
        let body = serde_json::json!({ "name": new.name, "priority": new.priority });
        let res = self
            .http
            .post(self.url("/api/categories"))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn tasks(&self) -> Result<Vec<Task>, ClientError> {
        let res = self
            .http
            .get(self.url("/api/tasks"))
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn create_task(&self, new: &NewTask) -> Result<Task, ClientError> {
        let res = self
            .http
            .post(self.url("/api/tasks"))
            .json(new)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<Task, ClientError> {
        let res = self
            .http
            .put(self.url(&format!("/api/tasks/{id}")))
            .json(patch)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    pub async fn delete_task(&self, id: &str) -> Result<Task, ClientError> {
        let res = self
            .http
            .delete(self.url(&format!("/api/tasks/{id}")))
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }
}

pub const ERR_LOAD_CATEGORIES: &str = "error loading categories";
pub const ERR_LOAD_TASKS: &str = "error loading tasks";
pub const ERR_ADD_TASK: &str = "error adding task";
pub const ERR_UPDATE_TASK: &str = "error updating task";
pub const ERR_DELETE_TASK: &str = "error deleting task";

/// Shown for a task whose `categoryId` resolves to no loaded category.
pub const UNRESOLVED_CATEGORY: &str = "Uncategorized";

/// One rendered line of the list: a task joined with its category name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub task: Task,
    pub category_name: String,
}

/// View state for the list: loaded collections, the default category for the
/// new-task form, and the last visible error. Failures leave existing state
/// in place; there is no rollback and no retry.
pub struct TodoList {
    client: TodoClient,
    pub tasks: Vec<Task>,
    pub categories: Vec<Category>,
    pub draft_category: Option<u64>,
    pub error: Option<&'static str>,
}

impl TodoList {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            tasks: Vec::new(),
            categories: Vec::new(),
            draft_category: None,
            error: None,
        }
    }

    /// Fetch categories then tasks. The first category becomes the draft
    /// default when none has been chosen yet.
    pub async fn refresh(&mut self) {
        match self.client.categories().await {
            Ok(categories) => {
                self.categories = categories;
                if self.draft_category.is_none() {
                    self.draft_category = self.categories.first().map(|c| c.id);
                }
            }
            Err(err) => {
                error!("{ERR_LOAD_CATEGORIES}: {err}");
                self.error = Some(ERR_LOAD_CATEGORIES);
            }
        }

        match self.client.tasks().await {
            Ok(tasks) => self.tasks = tasks,
            Err(err) => {
                error!("{ERR_LOAD_TASKS}: {err}");
                self.error = Some(ERR_LOAD_TASKS);
            }
        }
    }

    /// Submit a new task and append the server's record locally.
    pub async fn add_task(&mut self, new: NewTask) {
        match self.client.create_task(&new).await {
            Ok(task) => self.tasks.push(task),
            Err(err) => {
                error!("{ERR_ADD_TASK}: {err}");
                self.error = Some(ERR_ADD_TASK);
            }
        }
    }

    /// Send an edited task as a full update and replace the local record
    /// with the server's response.
    pub async fn update_task(&mut self, edited: Task) {
        let id = edited.id.clone();
        let patch = TaskPatch::from(edited);
        match self.client.update_task(&id, &patch).await {
            Ok(updated) => self.replace(updated),
            Err(err) => {
                error!("{ERR_UPDATE_TASK}: {err}");
                self.error = Some(ERR_UPDATE_TASK);
            }
        }
    }

    /// Delete on the server, then drop the matching local record.
    pub async fn delete_task(&mut self, id: &str) {
        match self.client.delete_task(id).await {
            Ok(_) => self.tasks.retain(|t| t.id != id),
            Err(err) => {
                error!("{ERR_DELETE_TASK}: {err}");
                self.error = Some(ERR_DELETE_TASK);
            }
        }
    }

    /// Flip `completed` and send the whole task as an update.
    pub async fn toggle_completed(&mut self, id: &str) {
        let Some(task) = self.tasks.iter().find(|t| t.id == id) else {
            return;
        };
        let mut flipped = task.clone();
        flipped.completed = !flipped.completed;
        self.update_task(flipped).await;
    }

    fn replace(&mut self, updated: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == updated.id) {
            *slot = updated;
        }
    }

    /// Tasks joined with their resolved category names, in list order.
    pub fn rows(&self) -> Vec<TaskRow> {
        self.tasks
            .iter()
            .map(|task| {
                let category_name = self
                    .categories
                    .iter()
                    .find(|c| c.id == task.category_id)
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| UNRESOLVED_CATEGORY.to_string());
                TaskRow {
                    task: task.clone(),
                    category_name,
                }
            })
            .collect()
    }
}
