//! List View State Store
//!
//! Uses Leptos reactive_stores so only the row list is tracked.

use leptos::prelude::*;
use crate::presenter::RowKey;
use reactive_stores::Store;

/// Rendered rows, in display order
#[derive(Clone, Debug, Default, Store)]
pub struct ListState {
    pub rows: Vec<RowKey>,
}

/// Type alias for the store
pub type ListStore = Store<ListState>;

// ========================
// Store Helper Functions
// ========================

pub fn store_row_keys(store: &ListStore) -> Vec<RowKey> {
    store.rows().get()
}

pub fn store_row_count(store: &ListStore) -> usize {
    store.rows().read().len()
}

/// Replace all rows
pub fn store_set_rows(store: &ListStore, rows: Vec<RowKey>) {
    store.rows().set(rows);
}

/// Append a row at the end
pub fn store_append_row(store: &ListStore, key: RowKey) {
    store.rows().write().push(key);
}

/// Remove a row by key
pub fn store_remove_row(store: &ListStore, key: RowKey) {
    store.rows().write().retain(|row| *row != key);
}
