//! List Context
//!
//! Shared handles provided via Leptos Context API.

use leptos::prelude::*;
use crate::presenter::{ItemPresenter, ListPresenter, RowKey};
use crate::store::ListStore;

/// Page-wide handles provided to rows
#[derive(Clone, Copy)]
pub struct ListContext {
    /// Presenter that owns the collection
    list: StoredValue<ListPresenter, LocalStorage>,
    /// Row keys currently drawn
    pub store: ListStore,
}

impl ListContext {
    pub fn new(list: ListPresenter, store: ListStore) -> Self {
        Self {
            list: StoredValue::new_local(list),
            store,
        }
    }

    /// Presenter for a drawn row
    pub fn row(&self, key: RowKey) -> Option<ItemPresenter> {
        self.list.try_get_value().and_then(|list| list.row(key))
    }

    /// Add the next numbered item
    pub fn add_item(&self) {
        if let Some(list) = self.list.try_get_value() {
            list.add_item();
        }
    }
}
