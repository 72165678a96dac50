//! UI Components
//!
//! Leptos components for the list page.

mod item_view;
mod list_view;

pub use item_view::ItemView;
pub use list_view::ListView;
