//! Presenters
//!
//! Framework-free state machines behind the list components. Components
//! install a sink to receive rendered state and forward clicks as gestures.

mod gesture;
mod item_presenter;
mod list_presenter;

pub use gesture::{Gesture, GestureTable};
pub use item_presenter::{ItemPresenter, RowPhase, RowState};
pub use list_presenter::{numbered_item, ListEvent, ListPresenter, RowKey, SessionCounter};
