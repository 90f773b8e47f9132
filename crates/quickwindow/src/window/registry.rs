//! Native handle to window lookup
//!
//! Native callbacks only carry the raw window pointer. The registry maps that
//! pointer back to the owning window and gives each window a generational
//! [`WindowId`], so a pointer the library recycles for a later window never
//! resolves to an earlier one.

use std::collections::HashMap;
use std::rc::{Rc, Weak};

use slotmap::{new_key_type, SlotMap};

use crate::native::WindowHandle;

new_key_type! {
    /// Stable identity of a window for as long as it is open
    pub struct WindowId;
}

struct Entry<T> {
    handle: WindowHandle,
    owner: Weak<T>,
}

/// Weak map from native handles to their owners
pub(crate) struct Registry<T> {
    entries: SlotMap<WindowId, Entry<T>>,
    by_handle: HashMap<WindowHandle, WindowId>,
}

impl<T> Registry<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            by_handle: HashMap::new(),
        }
    }

    /// Record `owner` for `handle`, replacing a stale entry for the same handle
    pub(crate) fn insert(&mut self, handle: WindowHandle, owner: Weak<T>) -> WindowId {
        if let Some(stale) = self.by_handle.remove(&handle) {
            log::debug!("Replacing stale registry entry for window {:#x}", handle.addr());
            self.entries.remove(stale);
        }
        let id = self.entries.insert(Entry { handle, owner });
        self.by_handle.insert(handle, id);
        id
    }

    /// Forget `handle`; later lookups miss
    pub(crate) fn remove(&mut self, handle: WindowHandle) -> Option<WindowId> {
        let id = self.by_handle.remove(&handle)?;
        self.entries.remove(id);
        Some(id)
    }

    /// The live owner of `handle`
    pub(crate) fn lookup(&self, handle: WindowHandle) -> Option<Rc<T>> {
        let id = self.by_handle.get(&handle)?;
        self.entries.get(*id)?.owner.upgrade()
    }

    /// The live owner registered under `id`
    pub(crate) fn get(&self, id: WindowId) -> Option<Rc<T>> {
        self.entries.get(id)?.owner.upgrade()
    }

    /// The native handle registered under `id`
    pub(crate) fn handle_of(&self, id: WindowId) -> Option<WindowHandle> {
        self.entries.get(id).map(|entry| entry.handle)
    }

    pub(crate) fn id_of(&self, handle: WindowHandle) -> Option<WindowId> {
        self.by_handle.get(&handle).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(addr: usize) -> WindowHandle {
        WindowHandle::from_ptr(addr as *mut _).unwrap()
    }

    #[test]
    fn test_lookup_after_insert() {
        let mut registry = Registry::new();
        let owner = Rc::new("main");
        let id = registry.insert(handle(0x10), Rc::downgrade(&owner));

        assert_eq!(registry.lookup(handle(0x10)).as_deref(), Some(&"main"));
        assert_eq!(registry.id_of(handle(0x10)), Some(id));
        assert_eq!(registry.handle_of(id), Some(handle(0x10)));
        assert!(registry.lookup(handle(0x20)).is_none());
    }

    #[test]
    fn test_miss_after_remove() {
        let mut registry = Registry::new();
        let owner = Rc::new(1);
        let id = registry.insert(handle(0x10), Rc::downgrade(&owner));

        assert_eq!(registry.remove(handle(0x10)), Some(id));
        assert!(registry.lookup(handle(0x10)).is_none());
        assert!(registry.get(id).is_none());
        assert_eq!(registry.len(), 0);
        assert_eq!(registry.remove(handle(0x10)), None);
    }

    #[test]
    fn test_recycled_handle_gets_new_identity() {
        let mut registry = Registry::new();
        let first = Rc::new(1);
        let second = Rc::new(2);

        let old = registry.insert(handle(0x10), Rc::downgrade(&first));
        registry.remove(handle(0x10));
        let new = registry.insert(handle(0x10), Rc::downgrade(&second));

        assert_ne!(old, new);
        assert!(registry.get(old).is_none());
        assert_eq!(registry.lookup(handle(0x10)).as_deref(), Some(&2));
    }

    #[test]
    fn test_dropped_owner_misses() {
        let mut registry = Registry::new();
        let owner = Rc::new(1);
        registry.insert(handle(0x10), Rc::downgrade(&owner));
        drop(owner);
        assert!(registry.lookup(handle(0x10)).is_none());
    }
}
