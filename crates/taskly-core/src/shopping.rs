//! Shopping list model and persistence.
//!
//! Items live as one JSON array under a fixed key. Display order puts
//! items still to buy first (most recently touched on top) and completed
//! items after (most recently completed on top).

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::error::StorageError;
use crate::storage::KeyValueStore;

/// Fixed storage key for the shopping list.
pub const SHOPPING_LIST_KEY: &str = "shopping-list";

/// One list entry. Storage layout is camelCase JSON:
/// `{ "id", "name", "completedAtTimestamp"?, "lastUpdatedTimestamp" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at_timestamp: Option<i64>,
    pub last_updated_timestamp: i64,
}

impl ShoppingItem {
    pub fn new(name: impl Into<String>, now_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            completed_at_timestamp: None,
            last_updated_timestamp: now_ms,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at_timestamp.is_some()
    }
}

/// Sort a list into display order.
pub fn order_shopping_list(mut items: Vec<ShoppingItem>) -> Vec<ShoppingItem> {
    items.sort_by(|a, b| {
        match (a.completed_at_timestamp, b.completed_at_timestamp) {
            (Some(a_done), Some(b_done)) => b_done.cmp(&a_done),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => b.last_updated_timestamp.cmp(&a.last_updated_timestamp),
        }
    });
    items
}

/// Sole writer of [`SHOPPING_LIST_KEY`].
pub struct ShoppingListStore {
    store: Arc<dyn KeyValueStore>,
}

impl ShoppingListStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the list in stored order. Missing or unreadable data is an
    /// empty list.
    pub async fn load(&self) -> Vec<ShoppingItem> {
        match self.store.get(SHOPPING_LIST_KEY).await {
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(items) => items,
                Err(e) => {
                    warn!(error = %e, "shopping list did not deserialize, using empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "shopping list read failed, using empty");
                Vec::new()
            }
        }
    }

    async fn save(&self, items: &[ShoppingItem]) -> Result<(), StorageError> {
        let value = serde_json::to_value(items).map_err(|e| StorageError::WriteFailed {
            key: SHOPPING_LIST_KEY.to_string(),
            message: e.to_string(),
        })?;
        self.store.set(SHOPPING_LIST_KEY, value).await
    }

    /// Prepend a new item and persist.
    pub async fn add(&self, name: &str, now_ms: i64) -> Result<ShoppingItem, StorageError> {
        let mut items = self.load().await;
        let item = ShoppingItem::new(name, now_ms);
        items.insert(0, item.clone());
        self.save(&items).await?;
        Ok(item)
    }

    /// Flip an item's completed state, bumping its update timestamp.
    /// Returns the updated item, or `None` if the id is unknown.
    pub async fn toggle(&self, id: &str, now_ms: i64) -> Result<Option<ShoppingItem>, StorageError> {
        let mut items = self.load().await;
        let mut toggled = None;
        for item in &mut items {
            if item.id == id {
                item.completed_at_timestamp = match item.completed_at_timestamp {
                    Some(_) => None,
                    None => Some(now_ms),
                };
                item.last_updated_timestamp = now_ms;
                toggled = Some(item.clone());
            }
        }
        if toggled.is_some() {
            self.save(&items).await?;
        }
        Ok(toggled)
    }

    /// Delete an item. Returns whether anything was removed.
    pub async fn remove(&self, id: &str) -> Result<bool, StorageError> {
        let mut items = self.load().await;
        let before = items.len();
        items.retain(|item| item.id != id);
        let removed = items.len() != before;
        if removed {
            self.save(&items).await?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn item(name: &str, updated: i64, completed: Option<i64>) -> ShoppingItem {
        ShoppingItem {
            id: name.to_string(),
            name: name.to_string(),
            completed_at_timestamp: completed,
            last_updated_timestamp: updated,
        }
    }

    fn store() -> ShoppingListStore {
        ShoppingListStore::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn ordering_puts_incomplete_first_by_recency() {
        let ordered = order_shopping_list(vec![
            item("old done", 10, Some(50)),
            item("new done", 20, Some(90)),
            item("old todo", 30, None),
            item("new todo", 40, None),
        ]);
        let names: Vec<&str> = ordered.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["new todo", "old todo", "new done", "old done"]);
    }

    #[tokio::test]
    async fn add_prepends() {
        let s = store();
        s.add("coffee", 100).await.unwrap();
        s.add("tea", 200).await.unwrap();

        let names: Vec<String> = s.load().await.into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["tea", "coffee"]);
    }

    #[tokio::test]
    async fn toggle_sets_then_clears_completion() {
        let s = store();
        let added = s.add("coffee", 100).await.unwrap();

        let done = s.toggle(&added.id, 150).await.unwrap().unwrap();
        assert_eq!(done.completed_at_timestamp, Some(150));
        assert_eq!(done.last_updated_timestamp, 150);

        let undone = s.toggle(&added.id, 200).await.unwrap().unwrap();
        assert_eq!(undone.completed_at_timestamp, None);
        assert_eq!(undone.last_updated_timestamp, 200);
    }

    #[tokio::test]
    async fn toggle_unknown_id_is_none() {
        let s = store();
        assert!(s.toggle("nope", 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn remove_deletes_only_the_matching_item() {
        let s = store();
        let a = s.add("coffee", 100).await.unwrap();
        let _b = s.add("tea", 200).await.unwrap();

        assert!(s.remove(&a.id).await.unwrap());
        assert!(!s.remove(&a.id).await.unwrap());

        let names: Vec<String> = s.load().await.into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["tea"]);
    }

    #[test]
    fn storage_layout_is_camel_case() {
        let json = serde_json::to_value(item("coffee", 100, Some(150))).unwrap();
        assert_eq!(json["lastUpdatedTimestamp"], 100);
        assert_eq!(json["completedAtTimestamp"], 150);

        let json = serde_json::to_value(item("tea", 100, None)).unwrap();
        assert!(json.get("completedAtTimestamp").is_none());
    }
}
