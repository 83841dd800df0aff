//! The ordered item collection and its derived CSL view

use crate::csl::to_csl;
use crate::error::{Error, Result};
use crate::storage::StorageAdapter;
use chrono::Utc;
use zbib_domain::{CatalogItem, CslItem};

/// Owns the authoritative ordered sequence of catalog items.
///
/// Every mutation recomputes the CSL projection (notes excluded) and,
/// when a storage adapter is attached, writes the full raw snapshot.
/// Both happen inside the mutating call, so the projection can never be
/// observed stale. There is no rollback: a storage failure after the
/// in-memory change surfaces as an error from the mutating call.
pub struct ItemStore {
    items: Vec<CatalogItem>,
    csl_cache: Vec<CslItem>,
    storage: Option<StorageAdapter>,
}

impl ItemStore {
    pub fn new(storage: Option<StorageAdapter>) -> Self {
        Self {
            items: Vec::new(),
            csl_cache: Vec::new(),
            storage,
        }
    }

    /// Append an item, stamping `dateAdded`/`dateModified` when absent
    pub fn add_item(&mut self, mut item: CatalogItem) -> Result<()> {
        let now = iso_now();
        item.date_added.get_or_insert_with(|| now.clone());
        item.date_modified.get_or_insert(now);
        self.items.push(item);
        self.commit()
    }

    /// Replace the item at `index`, stamping `dateModified`
    pub fn update_item(&mut self, index: usize, mut item: CatalogItem) -> Result<()> {
        if index >= self.items.len() {
            return Err(Error::IndexOutOfRange(index));
        }
        item.date_modified = Some(iso_now());
        self.items[index] = item;
        self.commit()
    }

    /// Remove the first item whose key matches.
    ///
    /// Returns whether anything was removed; a miss is not an error.
    pub fn remove_item(&mut self, item: &CatalogItem) -> Result<bool> {
        match self.items.iter().position(|i| i.key == item.key) {
            Some(index) => {
                self.items.remove(index);
                self.commit()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn clear_items(&mut self) -> Result<()> {
        self.items.clear();
        self.commit()
    }

    /// Swap in a whole collection (initial load / merge)
    pub fn replace_items(&mut self, items: Vec<CatalogItem>) -> Result<()> {
        self.items = items;
        self.commit()
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// The CSL projection of the current items, notes excluded.
    ///
    /// Recomputed on every mutation; entries are fresh projections, not
    /// stable across mutations.
    pub fn csl_items(&self) -> &[CslItem] {
        &self.csl_cache
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn commit(&mut self) -> Result<()> {
        self.csl_cache = self
            .items
            .iter()
            .filter(|item| !item.is_note())
            .map(to_csl)
            .collect();
        if let Some(storage) = &self.storage {
            storage.save_items(&self.items)?;
        }
        Ok(())
    }
}

fn iso_now() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{ItemStorage, MemoryStorage, StorageError};

    fn store() -> ItemStore {
        ItemStore::new(None)
    }

    #[test]
    fn add_stamps_dates() {
        let mut store = store();
        store.add_item(CatalogItem::new("ABCD2345", "book")).unwrap();
        let item = &store.items()[0];
        assert!(item.date_added.is_some());
        assert!(item.date_modified.is_some());
    }

    #[test]
    fn add_keeps_existing_dates() {
        let mut store = store();
        let mut item = CatalogItem::new("ABCD2345", "book");
        item.date_added = Some("2017-05-10T11:12:13Z".into());
        store.add_item(item).unwrap();
        assert_eq!(
            store.items()[0].date_added.as_deref(),
            Some("2017-05-10T11:12:13Z")
        );
    }

    #[test]
    fn notes_are_excluded_from_csl() {
        let mut store = store();
        store.add_item(CatalogItem::new("B", "book")).unwrap();
        store.add_item(CatalogItem::new("N", "note")).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.csl_items().len(), 1);
        assert_eq!(store.csl_items()[0].id, "B");
    }

    #[test]
    fn update_checks_range() {
        let mut store = store();
        store.add_item(CatalogItem::new("B", "book")).unwrap();
        assert!(matches!(
            store.update_item(1, CatalogItem::new("B", "book")),
            Err(Error::IndexOutOfRange(1))
        ));
        let mut replacement = CatalogItem::new("B", "book");
        replacement.title = Some("FooBar".into());
        store.update_item(0, replacement).unwrap();
        assert_eq!(store.items()[0].title.as_deref(), Some("FooBar"));
        assert!(store.items()[0].date_modified.is_some());
    }

    #[test]
    fn remove_matches_by_key_only() {
        let mut store = store();
        store.add_item(CatalogItem::new("B", "book")).unwrap();
        assert!(!store.remove_item(&CatalogItem::new("X", "book")).unwrap());
        assert_eq!(store.len(), 1);
        // Content may differ; only the key decides
        assert!(store.remove_item(&CatalogItem::new("B", "note")).unwrap());
        assert!(store.is_empty());
        assert!(store.csl_items().is_empty());
    }

    #[test]
    fn csl_count_tracks_every_mutation() {
        let mut store = store();
        store.add_item(CatalogItem::new("A", "book")).unwrap();
        store.add_item(CatalogItem::new("B", "journalArticle")).unwrap();
        store.add_item(CatalogItem::new("N", "note")).unwrap();
        assert_eq!(store.csl_items().len(), 2);
        store.remove_item(&CatalogItem::new("A", "book")).unwrap();
        assert_eq!(store.csl_items().len(), 1);
        store.clear_items().unwrap();
        assert!(store.csl_items().is_empty());
    }

    #[test]
    fn mutations_persist_snapshot() {
        let backend = MemoryStorage::new();
        let adapter = StorageAdapter::new(Box::new(backend.clone()), "zotero-bib");
        let mut store = ItemStore::new(Some(adapter));

        store.add_item(CatalogItem::new("B", "book")).unwrap();
        let snapshot: Vec<CatalogItem> =
            serde_json::from_str(&backend.get("zotero-bib-items").unwrap().unwrap()).unwrap();
        assert_eq!(snapshot.len(), 1);

        store.clear_items().unwrap();
        let snapshot: Vec<CatalogItem> =
            serde_json::from_str(&backend.get("zotero-bib-items").unwrap().unwrap()).unwrap();
        assert!(snapshot.is_empty());
    }

    struct FailingStorage;

    impl ItemStorage for FailingStorage {
        fn get(&self, _key: &str) -> std::result::Result<Option<String>, StorageError> {
            Err(StorageError("disk on fire".into()))
        }
        fn set(&self, _key: &str, _value: &str) -> std::result::Result<(), StorageError> {
            Err(StorageError("disk on fire".into()))
        }
    }

    #[test]
    fn storage_failure_surfaces_but_memory_mutates() {
        let adapter = StorageAdapter::new(Box::new(FailingStorage), "zotero-bib");
        let mut store = ItemStore::new(Some(adapter));
        let result = store.add_item(CatalogItem::new("B", "book"));
        assert!(matches!(result, Err(Error::Storage(_))));
        // No rollback: the in-memory state already changed
        assert_eq!(store.len(), 1);
    }
}
