//! List Model
//!
//! Framework-free data layer for the hello-list page:
//! - item: two-field record with change/removal notifications
//! - collection: insertion-ordered item container
//! - events: synchronous subscriber registry both are built on
//! - sync: persistence seam (no-op by default)

mod collection;
mod error;
mod events;
mod item;
mod sync;

pub use collection::{CollectionEvent, ItemCollection};
pub use error::{ModelError, ModelResult};
pub use events::{Emitter, SubscriptionId};
pub use item::{Item, ItemEvent, ItemFields, ItemId, ItemPatch};
pub use sync::{NoopPersistence, Persistence};
