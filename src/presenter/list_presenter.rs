//! List Presenter
//!
//! Page-level controller behind `ListView`: owns the collection and the
//! session counter, and keeps one row presenter per collection member.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use list_model::{
    CollectionEvent, Emitter, Item, ItemCollection, ItemFields, ItemId, ItemPatch, SubscriptionId,
};

use super::item_presenter::ItemPresenter;

/// Key of a drawn row, issued by the list and never reused.
///
/// Rows are keyed separately from items because a pre-seeded collection may
/// hold items with equal ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowKey(pub u64);

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Row list changes, for the component that draws the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent {
    RowAppended(RowKey),
    RowDetached(RowKey),
}

/// Monotonic per-session counter. Never reset.
#[derive(Debug, Default)]
pub struct SessionCounter(Cell<u64>);

impl SessionCounter {
    /// Increment and return the new value (first call returns 1)
    pub fn advance(&self) -> u64 {
        let next = self.0.get() + 1;
        self.0.set(next);
        next
    }
}

/// Build the `n`th item: defaults with `n` appended to `part2`
pub fn numbered_item(id: ItemId, n: u64, defaults: &ItemFields) -> Item {
    let item = Item::with_fields(id, defaults.clone());
    item.set(ItemPatch::part2(format!("{}{}", item.part2(), n)));
    item
}

struct Row {
    key: RowKey,
    presenter: ItemPresenter,
}

struct ListInner {
    collection: ItemCollection,
    counter: SessionCounter,
    defaults: ItemFields,
    rows: RefCell<Vec<Row>>,
    next_key: Cell<u64>,
    events: Emitter<ListEvent>,
    watcher: Cell<Option<SubscriptionId>>,
}

#[derive(Clone)]
pub struct ListPresenter {
    inner: Rc<ListInner>,
}

impl Default for ListPresenter {
    fn default() -> Self {
        Self::new(ItemCollection::new())
    }
}

impl ListPresenter {
    /// Take over `collection` and create rows for anything already in it
    pub fn new(collection: ItemCollection) -> Self {
        Self::with_defaults(collection, ItemFields::default())
    }

    pub fn with_defaults(collection: ItemCollection, defaults: ItemFields) -> Self {
        let inner = Rc::new(ListInner {
            collection,
            counter: SessionCounter::default(),
            defaults,
            rows: RefCell::new(Vec::new()),
            next_key: Cell::new(0),
            events: Emitter::new(),
            watcher: Cell::new(None),
        });

        let weak = Rc::downgrade(&inner);
        let watcher = inner.collection.subscribe(move |event| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            match event {
                CollectionEvent::ItemAdded(item) => ListInner::append_row(&inner, item.clone()),
                CollectionEvent::ItemRemoved { item, .. } => {
                    // Clone out first: release re-enters remove_row
                    let row = inner.row_for(item);
                    if let Some(row) = row {
                        row.release();
                    }
                }
            }
        });
        inner.watcher.set(Some(watcher));

        for item in inner.collection.items() {
            ListInner::append_row(&inner, item);
        }
        Self { inner }
    }

    /// Create the next numbered item and append it to the collection
    pub fn add_item(&self) -> Item {
        let n = self.inner.counter.advance();
        let id = self.inner.unused_item_id(n);
        let item = numbered_item(id, n, &self.inner.defaults);
        log::debug!("[LIST] add {} ({} {})", item.id(), item.part1(), item.part2());
        self.inner.collection.add(item.clone());
        item
    }

    pub fn collection(&self) -> &ItemCollection {
        &self.inner.collection
    }

    pub fn rows(&self) -> Vec<ItemPresenter> {
        self.inner.rows.borrow().iter().map(|r| r.presenter.clone()).collect()
    }

    pub fn row(&self, key: RowKey) -> Option<ItemPresenter> {
        self.inner
            .rows
            .borrow()
            .iter()
            .find(|r| r.key == key)
            .map(|r| r.presenter.clone())
    }

    pub fn row_keys(&self) -> Vec<RowKey> {
        self.inner.rows.borrow().iter().map(|r| r.key).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.rows.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn subscribe(&self, handler: impl Fn(&ListEvent) + 'static) -> SubscriptionId {
        self.inner.events.subscribe(handler)
    }
}

impl ListInner {
    /// First id at or above `from` that no member is using
    fn unused_item_id(&self, from: u64) -> ItemId {
        let mut candidate = from;
        while self.collection.get(ItemId(candidate)).is_some() {
            candidate += 1;
        }
        ItemId(candidate)
    }

    /// Row bound to this exact item
    fn row_for(&self, item: &Item) -> Option<ItemPresenter> {
        self.rows
            .borrow()
            .iter()
            .find(|r| r.presenter.item() == item)
            .map(|r| r.presenter.clone())
    }

    fn append_row(inner: &Rc<ListInner>, item: Item) {
        let key = RowKey(inner.next_key.get() + 1);
        inner.next_key.set(key.0);

        let presenter = ItemPresenter::new(item);
        let weak: Weak<ListInner> = Rc::downgrade(inner);
        presenter.on_detach(move |_| {
            if let Some(inner) = weak.upgrade() {
                inner.remove_row(key);
            }
        });
        log::debug!("[LIST] row {} for {}", key, presenter.id());
        inner.rows.borrow_mut().push(Row { key, presenter });
        inner.events.emit(&ListEvent::RowAppended(key));
    }

    fn remove_row(&self, key: RowKey) {
        let removed = {
            let mut rows = self.rows.borrow_mut();
            let before = rows.len();
            rows.retain(|r| r.key != key);
            before != rows.len()
        };
        if removed {
            log::debug!("[LIST] row {} gone ({} left)", key, self.rows.borrow().len());
            self.events.emit(&ListEvent::RowDetached(key));
        }
    }
}

impl Drop for ListInner {
    fn drop(&mut self) {
        if let Some(id) = self.watcher.take() {
            self.collection.unsubscribe(id);
        }
    }
}
