//! Persisted favorites list

use crate::models::CatalogItem;
use crate::store::{load_json, save_json, KeyValueStore, StoreError};

pub const FAVORITES_KEY: &str = "favorites";

/// Favorites keyed by item id, in insertion order.
///
/// Every mutation is written through to the backing store before it
/// returns. The in-memory list keeps the change even if that write fails.
#[derive(Debug)]
pub struct FavoritesStore<S: KeyValueStore> {
    store: S,
    items: Vec<CatalogItem>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    pub fn load(store: S) -> Self {
        let items: Vec<CatalogItem> = load_json(&store, FAVORITES_KEY).unwrap_or_default();
        log::info!("Loaded {} favorites", items.len());
        Self { store, items }
    }

    pub fn is_favorite(&self, id: i64) -> bool {
        self.items.iter().any(|f| f.id == id)
    }

    pub fn list(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `false` if the item was already a favorite
    pub fn add(&mut self, item: CatalogItem) -> Result<bool, StoreError> {
        if self.is_favorite(item.id) {
            return Ok(false);
        }
        log::debug!("Adding favorite {} '{}'", item.id, item.title);
        self.items.push(item);
        self.persist()?;
        Ok(true)
    }

    /// Returns `false` if there was no such favorite
    pub fn remove(&mut self, id: i64) -> Result<bool, StoreError> {
        let Some(pos) = self.items.iter().position(|f| f.id == id) else {
            return Ok(false);
        };
        let removed = self.items.remove(pos);
        log::debug!("Removed favorite {} '{}'", removed.id, removed.title);
        self.persist()?;
        Ok(true)
    }

    /// Add or remove; returns whether the item is a favorite afterwards
    pub fn toggle(&mut self, item: &CatalogItem) -> Result<bool, StoreError> {
        if self.is_favorite(item.id) {
            self.remove(item.id)?;
            Ok(false)
        } else {
            self.add(item.clone())?;
            Ok(true)
        }
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.items.clear();
        log::info!("Cleared all favorites");
        self.store.remove(FAVORITES_KEY)
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        save_json(&mut self.store, FAVORITES_KEY, &self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_support::item;
    use crate::store::{FileStore, MemoryStore};
    use tempfile::TempDir;

    #[test]
    fn test_add_then_is_favorite() {
        let mut favorites = FavoritesStore::load(MemoryStore::default());
        assert!(!favorites.is_favorite(7));
        assert!(favorites.add(item(7)).unwrap());
        assert!(favorites.is_favorite(7));
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut favorites = FavoritesStore::load(MemoryStore::default());
        assert!(favorites.add(item(7)).unwrap());
        assert!(!favorites.add(item(7)).unwrap());
        assert!(!favorites.add(item(7)).unwrap());
        assert_eq!(favorites.len(), 1);
    }

    #[test]
    fn test_remove_then_not_favorite() {
        let mut favorites = FavoritesStore::load(MemoryStore::default());
        favorites.add(item(1)).unwrap();
        favorites.add(item(2)).unwrap();
        assert!(favorites.remove(1).unwrap());
        assert!(!favorites.is_favorite(1));
        assert!(favorites.is_favorite(2));
        assert!(!favorites.remove(1).unwrap());
    }

    #[test]
    fn test_toggle() {
        let mut favorites = FavoritesStore::load(MemoryStore::default());
        let movie = item(3);
        assert!(favorites.toggle(&movie).unwrap());
        assert!(favorites.is_favorite(3));
        assert!(!favorites.toggle(&movie).unwrap());
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut favorites = FavoritesStore::load(MemoryStore::default());
        for id in [5, 2, 9] {
            favorites.add(item(id)).unwrap();
        }
        let ids: Vec<i64> = favorites.list().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![5, 2, 9]);
    }

    #[test]
    fn test_survives_restart() {
        let temp_dir = TempDir::new().unwrap();
        {
            let mut favorites = FavoritesStore::load(FileStore::new(temp_dir.path()));
            favorites.add(item(11)).unwrap();
            favorites.add(item(12)).unwrap();
        }
        let favorites = FavoritesStore::load(FileStore::new(temp_dir.path()));
        assert_eq!(favorites.len(), 2);
        assert!(favorites.is_favorite(12));
    }

    #[test]
    fn test_clear_persists() {
        let temp_dir = TempDir::new().unwrap();
        let mut favorites = FavoritesStore::load(FileStore::new(temp_dir.path()));
        favorites.add(item(1)).unwrap();
        favorites.clear().unwrap();
        assert!(favorites.is_empty());
        let reloaded = FavoritesStore::load(FileStore::new(temp_dir.path()));
        assert!(reloaded.is_empty());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let mut store = MemoryStore::default();
        store.set(FAVORITES_KEY, "[{\"broken\"").unwrap();
        let favorites = FavoritesStore::load(store);
        assert!(favorites.is_empty());
    }
}
