use super::item::{Item, ItemId, ItemUpdate, NewItem};
use super::settings::SortKey;
use super::sort;
use crate::error::{Result, TrackerError, ValidationError};

/// Owns every tracked item
///
/// A `Vec` keeps the canonical display order (the sort engine reorders it in
/// place); handles are looked up linearly, which is fine for the few hundred
/// items a personal tracker holds.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: Vec<Item>,
    next_id: u64,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and add an item, returning its handle
    pub fn add(&mut self, new: NewItem) -> Result<ItemId, ValidationError> {
        new.validate()?;
        self.next_id += 1;
        let id = ItemId(self.next_id);
        self.items.push(Item::from_new(id, new));
        Ok(id)
    }

    /// Remove an item and return it
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let pos = self.items.iter().position(|it| it.id() == id)?;
        Some(self.items.remove(pos))
    }

    /// Apply one field change
    pub fn update(&mut self, id: ItemId, update: ItemUpdate) -> Result<()> {
        self.update_many(id, vec![update])
    }

    /// Apply several field changes in order. Every change is validated before
    /// any is applied, so a rejected field leaves the item untouched.
    pub fn update_many(&mut self, id: ItemId, updates: Vec<ItemUpdate>) -> Result<()> {
        for update in &updates {
            update.validate()?;
        }
        let item = self
            .items
            .iter_mut()
            .find(|it| it.id() == id)
            .ok_or(TrackerError::ItemNotFound(id))?;
        for update in updates {
            item.apply(update);
        }
        Ok(())
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|it| it.id() == id)
    }

    /// Items in store order
    pub fn list(&self) -> &[Item] {
        &self.items
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Reorder the canonical list
    pub fn sort(&mut self, key: SortKey, ascending: bool) {
        sort::sort_items(&mut self.items, key, ascending);
    }

    /// Move every item of `other` into this store, assigning fresh handles
    pub(crate) fn extend_from(&mut self, other: ItemStore) {
        for item in other.items {
            self.next_id += 1;
            let id = ItemId(self.next_id);
            self.items.push(Item::from_new(id, NewItem::from(item)));
        }
    }
}

impl From<Item> for NewItem {
    fn from(item: Item) -> Self {
        NewItem {
            name: item.name().to_string(),
            done: item.is_done(),
            weight: item.weight(),
            due: item.due(),
            est_hours: item.est_hours(),
            status: item.status(),
            tags: item.tags().to_vec(),
        }
    }
}
