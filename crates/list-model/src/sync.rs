//! Persistence Seam
//!
//! Storage interface consulted when a destroyed item leaves the collection.
//! The page keeps nothing, so the default implementation accepts every call.

use crate::error::ModelResult;
use crate::item::Item;

/// Storage backend for items
pub trait Persistence {
    /// Forget a destroyed item
    fn delete(&self, item: &Item) -> ModelResult<()>;
}

/// Accepts every request without storing anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPersistence;

impl Persistence for NoopPersistence {
    fn delete(&self, item: &Item) -> ModelResult<()> {
        log::debug!("[SYNC] delete {} {}", item.id(), item.to_json()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemId;

    #[test]
    fn test_noop_always_succeeds() {
        let item = Item::new(ItemId(1));
        assert!(NoopPersistence.delete(&item).is_ok());
        item.destroy();
        assert!(NoopPersistence.delete(&item).is_ok());
    }
}
