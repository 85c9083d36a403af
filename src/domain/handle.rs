//! Arena keys and weak item handles.
//!
//! Items live in a generational slot map owned by the world. A key stays
//! valid until its item is released, after which every copy of the key
//! fails to resolve: the slot's generation no longer matches.

use slotmap::{new_key_type, SlotMap};

use super::item::PhysicalItem;

new_key_type! {
    /// Key of an item in the world arena
    pub struct ItemId;
    /// Key of a link in the world arena
    pub struct LinkId;
}

pub type ItemArena = SlotMap<ItemId, PhysicalItem>;

/// Weak reference to an item. Reads `None` once the item is released.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ItemHandle {
    id: Option<ItemId>,
}

impl ItemHandle {
    pub fn new(id: ItemId) -> Self {
        Self { id: Some(id) }
    }

    pub fn empty() -> Self {
        Self { id: None }
    }

    pub fn id(&self) -> Option<ItemId> {
        self.id
    }

    pub fn set(&mut self, id: Option<ItemId>) {
        self.id = id;
    }

    pub fn reset(&mut self) {
        self.id = None;
    }

    /// The referenced item if it is still alive
    pub fn get<'a>(&self, items: &'a ItemArena) -> Option<&'a PhysicalItem> {
        self.id.and_then(|id| items.get(id))
    }

    pub fn get_mut<'a>(&self, items: &'a mut ItemArena) -> Option<&'a mut PhysicalItem> {
        self.id.and_then(move |id| items.get_mut(id))
    }

    /// The key, only while the referenced item is alive
    pub fn live_id(&self, items: &ItemArena) -> Option<ItemId> {
        self.id.filter(|id| items.contains_key(*id))
    }

    pub fn is_valid(&self, items: &ItemArena) -> bool {
        self.live_id(items).is_some()
    }
}

impl From<ItemId> for ItemHandle {
    fn from(id: ItemId) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rect;

    #[test]
    fn handle_reads_none_after_release() {
        let mut items = ItemArena::with_key();
        let id = items.insert(PhysicalItem::new(Rect::new(0.0, 0.0, 1.0, 1.0)));
        let handle = ItemHandle::new(id);
        let copy = handle;

        assert!(handle.is_valid(&items));
        items.remove(id);

        assert!(handle.get(&items).is_none());
        assert_eq!(copy.live_id(&items), None);

        // A new item in the same slot gets a new generation
        let reused = items.insert(PhysicalItem::new(Rect::new(0.0, 0.0, 1.0, 1.0)));
        assert_ne!(reused, id);
        assert!(!handle.is_valid(&items));
    }

    #[test]
    fn empty_handle_never_resolves() {
        let items = ItemArena::with_key();
        assert!(ItemHandle::empty().get(&items).is_none());
        assert_eq!(ItemHandle::default(), ItemHandle::empty());
    }
}
