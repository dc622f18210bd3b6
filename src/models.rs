use serde::{Deserialize, Serialize};

/// A label used to group tasks. Lives only in process memory; the store
/// assigns ids and the whole collection is lost on restart.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub priority: i64,
}

/// Body of `POST /api/categories`. Any client-supplied id is ignored; the
/// store picks the next one.
#[derive(Debug, Deserialize, Clone)]
pub struct NewCategory {
    pub name: String,
    pub priority: i64,
}

/// Body of `PUT /api/categories/:id`. Supplied fields overwrite, omitted
/// fields are retained.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub priority: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Loose reference to a `Category.id`. Not validated against the
    /// category store; display layers resolve missing ids to a placeholder.
    pub category_id: u64,
    pub completed: bool,
}

/// Body of `POST /api/tasks`. `completed` is not accepted here: new tasks
/// always start incomplete, whatever the client sends.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category_id: u64,
}

/// Body of `PUT /api/tasks/:id`, merged shallowly onto the stored record.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl From<Task> for TaskPatch {
    fn from(task: Task) -> Self {
        Self {
            title: Some(task.title),
            description: task.description,
            category_id: Some(task.category_id),
            completed: Some(task.completed),
        }
    }
}
