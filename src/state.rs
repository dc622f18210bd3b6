use std::sync::Arc;

use crate::config::Config;
use crate::store::{CategoryStore, SqliteTaskStore, StoreError, TaskStore};

/// Shared application state: the in-memory category list and the durable
/// task store, one instance for the whole process.
pub struct AppState {
    pub categories: CategoryStore,
    pub tasks: Box<dyn TaskStore>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Arc<Self>, StoreError> {
        let tasks = SqliteTaskStore::new(&config.database_path)?;
        Ok(Self::with_task_store(Box::new(tasks)))
    }

    /// Assemble state around an arbitrary task store. Used by tests and
    /// embedders that want to supply their own backing store.
    pub fn with_task_store(tasks: Box<dyn TaskStore>) -> Arc<Self> {
        Arc::new(Self {
            categories: CategoryStore::new(),
            tasks,
        })
    }
}
