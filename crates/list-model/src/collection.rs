//! Item Collection
//!
//! Insertion-ordered container of items. Drops a member as soon as the
//! member reports `Removed`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::events::{Emitter, SubscriptionId};
use crate::item::{Item, ItemEvent, ItemId};
use crate::sync::{NoopPersistence, Persistence};

/// Notifications emitted by a collection
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionEvent {
    ItemAdded(Item),
    ItemRemoved { item: Item, index: usize },
}

struct Member {
    item: Item,
    /// Our own `Removed` watcher on the item
    watcher: SubscriptionId,
}

struct CollectionInner {
    members: RefCell<Vec<Member>>,
    events: Emitter<CollectionEvent>,
    persistence: Box<dyn Persistence>,
}

/// Shared handle to an ordered item collection
#[derive(Clone)]
pub struct ItemCollection {
    inner: Rc<CollectionInner>,
}

impl Default for ItemCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemCollection {
    /// Collection backed by `NoopPersistence`
    pub fn new() -> Self {
        Self::with_persistence(NoopPersistence)
    }

    pub fn with_persistence(persistence: impl Persistence + 'static) -> Self {
        Self {
            inner: Rc::new(CollectionInner {
                members: RefCell::new(Vec::new()),
                events: Emitter::new(),
                persistence: Box::new(persistence),
            }),
        }
    }

    /// Append `item` and emit `ItemAdded`.
    ///
    /// Returns false, without emitting, if the item is already a member or
    /// has been destroyed.
    pub fn add(&self, item: Item) -> bool {
        if item.is_destroyed() {
            log::warn!("[COLLECTION] refusing destroyed item {}", item.id());
            return false;
        }
        if self.contains(&item) {
            log::debug!("[COLLECTION] item {} already present", item.id());
            return false;
        }

        let collection = Rc::downgrade(&self.inner);
        let member = item.downgrade();
        let watcher = item.subscribe(move |event| {
            if *event != ItemEvent::Removed {
                return;
            }
            if let (Some(inner), Some(item)) = (collection.upgrade(), member.upgrade()) {
                CollectionInner::drop_destroyed(&inner, &item);
            }
        });

        self.inner.members.borrow_mut().push(Member {
            item: item.clone(),
            watcher,
        });
        log::debug!("[COLLECTION] added {} (len={})", item.id(), self.len());
        self.inner.events.emit(&CollectionEvent::ItemAdded(item));
        true
    }

    /// Drop `item` without destroying it. Returns false if it was not a member.
    pub fn remove(&self, item: &Item) -> bool {
        self.inner.remove_member(item).is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.members.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Members in insertion order
    pub fn items(&self) -> Vec<Item> {
        self.inner.members.borrow().iter().map(|m| m.item.clone()).collect()
    }

    pub fn get(&self, id: ItemId) -> Option<Item> {
        self.inner
            .members
            .borrow()
            .iter()
            .find(|m| m.item.id() == id)
            .map(|m| m.item.clone())
    }

    pub fn contains(&self, item: &Item) -> bool {
        self.inner.members.borrow().iter().any(|m| m.item == *item)
    }

    pub fn subscribe(&self, handler: impl Fn(&CollectionEvent) + 'static) -> SubscriptionId {
        self.inner.events.subscribe(handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.events.unsubscribe(id)
    }
}

impl CollectionInner {
    /// Remove `item`, stop watching it, emit `ItemRemoved`. Returns the old index.
    fn remove_member(&self, item: &Item) -> Option<usize> {
        let (index, member) = {
            let mut members = self.members.borrow_mut();
            let index = members.iter().position(|m| m.item == *item)?;
            (index, members.remove(index))
        };
        member.item.unsubscribe(member.watcher);
        log::debug!("[COLLECTION] removed {} at {}", member.item.id(), index);
        self.events.emit(&CollectionEvent::ItemRemoved {
            item: member.item,
            index,
        });
        Some(index)
    }

    /// Removal path for a destroyed member. Storage failures are logged and
    /// swallowed so destroy stays total.
    fn drop_destroyed(inner: &Rc<CollectionInner>, item: &Item) {
        if inner.remove_member(item).is_none() {
            return;
        }
        if let Err(e) = inner.persistence.delete(item) {
            log::warn!("[COLLECTION] sync delete for {} failed: {}", item.id(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ModelError, ModelResult};
    use crate::item::ItemPatch;
    use std::cell::Cell;

    fn record_events(collection: &ItemCollection) -> Rc<RefCell<Vec<CollectionEvent>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        collection.subscribe(move |e| s.borrow_mut().push(e.clone()));
        seen
    }

    struct FailingPersistence {
        calls: Rc<Cell<u32>>,
    }

    impl Persistence for FailingPersistence {
        fn delete(&self, _item: &Item) -> ModelResult<()> {
            self.calls.set(self.calls.get() + 1);
            Err(ModelError::Sync("disk on fire".to_string()))
        }
    }

    #[test]
    fn test_add_appends_and_notifies() {
        let collection = ItemCollection::new();
        let seen = record_events(&collection);
        let a = Item::new(ItemId(1));
        let b = Item::new(ItemId(2));

        assert!(collection.add(a.clone()));
        assert!(collection.add(b.clone()));

        assert_eq!(collection.items(), vec![a.clone(), b.clone()]);
        assert_eq!(
            *seen.borrow(),
            vec![CollectionEvent::ItemAdded(a), CollectionEvent::ItemAdded(b)]
        );
    }

    #[test]
    fn test_duplicate_add_ignored() {
        let collection = ItemCollection::new();
        let seen = record_events(&collection);
        let a = Item::new(ItemId(1));

        assert!(collection.add(a.clone()));
        assert!(!collection.add(a.clone()));

        assert_eq!(collection.len(), 1);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_destroy_drops_member() {
        let collection = ItemCollection::new();
        let a = Item::new(ItemId(1));
        let b = Item::new(ItemId(2));
        collection.add(a.clone());
        collection.add(b.clone());
        let seen = record_events(&collection);

        a.destroy();

        assert_eq!(collection.items(), vec![b]);
        assert!(!collection.contains(&a));
        assert_eq!(
            *seen.borrow(),
            vec![CollectionEvent::ItemRemoved { item: a, index: 0 }]
        );
    }

    #[test]
    fn test_remove_without_destroy() {
        let collection = ItemCollection::new();
        let a = Item::new(ItemId(1));
        collection.add(a.clone());

        assert!(collection.remove(&a));
        assert!(!collection.remove(&a));
        assert!(collection.is_empty());
        assert!(!a.is_destroyed());
        assert_eq!(a.subscriber_count(), 0);

        a.set(ItemPatch::part1("still usable"));
        assert_eq!(a.part1(), "still usable");
    }

    #[test]
    fn test_destroyed_item_not_added() {
        let collection = ItemCollection::new();
        let a = Item::new(ItemId(1));
        a.destroy();
        assert!(!collection.add(a));
        assert!(collection.is_empty());
    }

    #[test]
    fn test_sync_failure_is_swallowed() {
        let calls = Rc::new(Cell::new(0));
        let collection = ItemCollection::with_persistence(FailingPersistence { calls: calls.clone() });
        let a = Item::new(ItemId(1));
        collection.add(a.clone());

        a.destroy();

        assert_eq!(calls.get(), 1);
        assert!(collection.is_empty());
    }

    #[test]
    fn test_get_by_id() {
        let collection = ItemCollection::new();
        let a = Item::new(ItemId(7));
        collection.add(a.clone());
        assert_eq!(collection.get(ItemId(7)), Some(a));
        assert_eq!(collection.get(ItemId(8)), None);
    }

    #[test]
    fn test_collection_drop_does_not_leak_watcher_target() {
        let a = Item::new(ItemId(1));
        {
            let collection = ItemCollection::new();
            collection.add(a.clone());
        }
        a.destroy();
        assert!(a.is_destroyed());
    }
}
