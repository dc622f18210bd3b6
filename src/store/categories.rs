use std::sync::{Mutex, MutexGuard};

use crate::models::{Category, CategoryPatch, NewCategory};

use super::StoreError;

/// In-memory category collection, in insertion order. Shared across request
/// handlers behind a mutex; nothing here survives a process restart.
pub struct CategoryStore {
    inner: Mutex<Vec<Category>>,
}

impl CategoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Category>>, StoreError> {
        self.inner
            .lock()
            .map_err(|e| StoreError::Storage(format!("Failed to lock category list: {}", e)))
    }

    /// Next id is one past the highest id ever handed out, so deleting an
    /// interior entry never frees its id for reuse.
    fn next_id(categories: &[Category]) -> u64 {
        categories.iter().map(|c| c.id).max().unwrap_or(0) + 1
    }

    pub fn list(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.lock()?.clone())
    }

    pub fn get(&self, id: u64) -> Result<Category, StoreError> {
        self.lock()?
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    pub fn create(&self, new: NewCategory) -> Result<Category, StoreError> {
        let mut categories = self.lock()?;
        let category = Category {
            id: Self::next_id(&categories),
            name: new.name,
            priority: new.priority,
        };
        categories.push(category.clone());
        Ok(category)
    }

    pub fn update(&self, id: u64, patch: CategoryPatch) -> Result<Category, StoreError> {
        let mut categories = self.lock()?;
        let category = categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::NotFound)?;
        if let Some(name) = patch.name {
            category.name = name;
        }
        if let Some(priority) = patch.priority {
            category.priority = priority;
        }
        Ok(category.clone())
    }

    pub fn delete(&self, id: u64) -> Result<Category, StoreError> {
        let mut categories = self.lock()?;
        let index = categories
            .iter()
            .position(|c| c.id == id)
            .ok_or(StoreError::NotFound)?;
        Ok(categories.remove(index))
    }
}

impl Default for CategoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_category(name: &str, priority: i64) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            priority,
        }
    }

    #[test]
    fn test_first_category_gets_id_one() {
        let store = CategoryStore::new();
        let created = store.create(new_category("Alta", 3)).unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.name, "Alta");
        assert_eq!(created.priority, 3);
    }

    #[test]
    fn test_ids_increase_from_max() {
        let store = CategoryStore::new();
        for i in 1..=3 {
            let created = store.create(new_category("c", i)).unwrap();
            assert_eq!(created.id, i as u64);
        }
        let created = store.create(new_category("next", 0)).unwrap();
        assert_eq!(created.id, 4);
    }

    #[test]
    fn test_deleted_interior_id_is_not_reused() {
        let store = CategoryStore::new();
        store.create(new_category("a", 1)).unwrap();
        store.create(new_category("b", 2)).unwrap();
        store.create(new_category("c", 3)).unwrap();

        store.delete(2).unwrap();
        let created = store.create(new_category("d", 4)).unwrap();
        assert_eq!(created.id, 4);
        assert!(store.get(2).is_err());
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let store = CategoryStore::new();
        store.create(new_category("first", 1)).unwrap();
        store.create(new_category("second", 2)).unwrap();
        let names: Vec<String> = store.list().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_update_merges_supplied_fields_only() {
        let store = CategoryStore::new();
        store.create(new_category("Alta", 3)).unwrap();

        let merged = store
            .update(
                1,
                CategoryPatch {
                    name: Some("Urgente".to_string()),
                    priority: None,
                },
            )
            .unwrap();
        assert_eq!(merged.name, "Urgente");
        assert_eq!(merged.priority, 3);
    }

    #[test]
    fn test_update_missing_id_leaves_collection_unchanged() {
        let store = CategoryStore::new();
        store.create(new_category("only", 1)).unwrap();

        let result = store.update(99, CategoryPatch::default());
        assert!(matches!(result, Err(StoreError::NotFound)));
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_returns_removed_record() {
        let store = CategoryStore::new();
        store.create(new_category("gone", 5)).unwrap();

        let removed = store.delete(1).unwrap();
        assert_eq!(removed.name, "gone");
        assert!(store.list().unwrap().is_empty());
        assert!(matches!(store.delete(1), Err(StoreError::NotFound)));
    }
}
