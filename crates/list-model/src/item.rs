//! Item Record
//!
//! A mutable two-field record that notifies its observers on change and
//! removal.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

use crate::error::ModelResult;
use crate::events::{Emitter, SubscriptionId};

/// Client-side item id, used to key rendered rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// The two string fields of an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFields {
    pub part1: String,
    pub part2: String,
}

impl Default for ItemFields {
    fn default() -> Self {
        Self {
            part1: "hello".to_string(),
            part2: "world".to_string(),
        }
    }
}

impl ItemFields {
    pub fn new(part1: impl Into<String>, part2: impl Into<String>) -> Self {
        Self {
            part1: part1.into(),
            part2: part2.into(),
        }
    }

    /// Fields with positions exchanged
    pub fn swapped(&self) -> Self {
        Self {
            part1: self.part2.clone(),
            part2: self.part1.clone(),
        }
    }
}

/// Partial update for `Item::set`. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub part1: Option<String>,
    pub part2: Option<String>,
}

impl ItemPatch {
    pub fn part1(value: impl Into<String>) -> Self {
        Self {
            part1: Some(value.into()),
            part2: None,
        }
    }

    pub fn part2(value: impl Into<String>) -> Self {
        Self {
            part1: None,
            part2: Some(value.into()),
        }
    }
}

impl From<ItemFields> for ItemPatch {
    fn from(fields: ItemFields) -> Self {
        Self {
            part1: Some(fields.part1),
            part2: Some(fields.part2),
        }
    }
}

/// Notifications emitted by an item
#[derive(Debug, Clone, PartialEq)]
pub enum ItemEvent {
    /// Emitted after every `set`
    Changed {
        previous: ItemFields,
        current: ItemFields,
    },
    /// Emitted once by `destroy`
    Removed,
}

struct ItemInner {
    id: ItemId,
    fields: RefCell<ItemFields>,
    destroyed: Cell<bool>,
    events: Emitter<ItemEvent>,
}

/// Shared handle to an item record.
///
/// Clones refer to the same record; equality is identity.
#[derive(Clone)]
pub struct Item {
    inner: Rc<ItemInner>,
}

impl Item {
    /// Create an item with default field values
    pub fn new(id: ItemId) -> Self {
        Self::with_fields(id, ItemFields::default())
    }

    pub fn with_fields(id: ItemId, fields: ItemFields) -> Self {
        Self {
            inner: Rc::new(ItemInner {
                id,
                fields: RefCell::new(fields),
                destroyed: Cell::new(false),
                events: Emitter::new(),
            }),
        }
    }

    pub fn id(&self) -> ItemId {
        self.inner.id
    }

    /// Snapshot of both fields
    pub fn get(&self) -> ItemFields {
        self.inner.fields.borrow().clone()
    }

    pub fn part1(&self) -> String {
        self.inner.fields.borrow().part1.clone()
    }

    pub fn part2(&self) -> String {
        self.inner.fields.borrow().part2.clone()
    }

    pub fn is_destroyed(&self) -> bool {
        self.inner.destroyed.get()
    }

    /// Replace the fields named in `patch`, then emit `Changed`.
    ///
    /// No-op once the item is destroyed.
    pub fn set(&self, patch: ItemPatch) {
        if self.is_destroyed() {
            log::debug!("[ITEM] set on destroyed item {}", self.id());
            return;
        }
        let (previous, current) = {
            let mut fields = self.inner.fields.borrow_mut();
            let previous = fields.clone();
            if let Some(part1) = patch.part1 {
                fields.part1 = part1;
            }
            if let Some(part2) = patch.part2 {
                fields.part2 = part2;
            }
            (previous, fields.clone())
        };
        self.inner.events.emit(&ItemEvent::Changed { previous, current });
    }

    /// Emit `Removed` once and drop all subscribers. Later calls are no-ops.
    pub fn destroy(&self) {
        if self.inner.destroyed.replace(true) {
            log::debug!("[ITEM] destroy on destroyed item {}", self.id());
            return;
        }
        self.inner.events.emit(&ItemEvent::Removed);
        self.inner.events.clear();
    }

    pub fn subscribe(&self, handler: impl Fn(&ItemEvent) + 'static) -> SubscriptionId {
        self.inner.events.subscribe(handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.events.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.events.subscriber_count()
    }

    pub fn to_json(&self) -> ModelResult<String> {
        Ok(serde_json::to_string(&*self.inner.fields.borrow())?)
    }

    pub(crate) fn ptr_eq(&self, other: &Item) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn downgrade(&self) -> WeakItem {
        WeakItem(Rc::downgrade(&self.inner))
    }
}

/// Non-owning item reference, for handlers registered on the item itself
#[derive(Clone)]
pub(crate) struct WeakItem(Weak<ItemInner>);

impl WeakItem {
    pub(crate) fn upgrade(&self) -> Option<Item> {
        self.0.upgrade().map(|inner| Item { inner })
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Item {}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("id", &self.id())
            .field("fields", &*self.inner.fields.borrow())
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}
