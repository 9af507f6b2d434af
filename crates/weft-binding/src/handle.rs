#![forbid(unsafe_code)]

//! Side-table mapping element IDs to widget state handles.
//!
//! Host elements are foreign objects; instead of injecting a state property
//! into them, each adapter owns a [`HandleTable`] keyed by the element's
//! stable ID. The table is the single shared mutable resource of the binding
//! lifecycle: each slot is written exactly once, by the first operation that
//! needs the handle, and read thereafter.
//!
//! # Invariants
//!
//! 1. At most one handle per element ID.
//! 2. Handles are created lazily via [`ensure_with`](HandleTable::ensure_with),
//!    never eagerly on discovery.
//! 3. An existing handle is never replaced.
//! 4. The interior borrow is not held across the caller's create function,
//!    so attachment may re-enter table queries.

use std::cell::RefCell;
use std::rc::Rc;

use ahash::AHashMap;

/// Element-ID → handle map with attach-if-absent semantics.
///
/// Single-threaded: interior mutability via `RefCell`, shared handles via
/// `Rc`. All access happens within one turn of the host's event loop.
pub struct HandleTable<H> {
    slots: RefCell<AHashMap<String, Rc<H>>>,
}

impl<H> HandleTable<H> {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: RefCell::new(AHashMap::new()),
        }
    }

    /// Look up the handle for an element ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Rc<H>> {
        self.slots.borrow().get(id).map(Rc::clone)
    }

    /// Whether a handle exists for the ID.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.slots.borrow().contains_key(id)
    }

    /// Return the existing handle for `id`, or run `create` exactly once and
    /// store its result.
    ///
    /// `create` failures leave the slot empty; a later call will retry.
    ///
    /// # Errors
    ///
    /// Propagates whatever `create` returns.
    pub fn ensure_with<E>(
        &self,
        id: &str,
        create: impl FnOnce() -> Result<H, E>,
    ) -> Result<Rc<H>, E> {
        if let Some(handle) = self.get(id) {
            return Ok(handle);
        }
        let handle = Rc::new(create()?);
        let prev = self
            .slots
            .borrow_mut()
            .insert(id.to_owned(), Rc::clone(&handle));
        debug_assert!(prev.is_none(), "handle slot for {id:?} written twice");
        Ok(handle)
    }

    /// Number of attached elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    /// Whether no element has attached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }
}

impl<H> Default for HandleTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> std::fmt::Debug for HandleTable<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandleTable")
            .field("attached", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;

    #[test]
    fn starts_empty() {
        let table: HandleTable<u32> = HandleTable::new();
        assert!(table.is_empty());
        assert_eq!(table.get("a"), None);
        assert!(!table.contains("a"));
    }

    #[test]
    fn ensure_creates_once() {
        let table: HandleTable<u32> = HandleTable::new();
        let mut calls = 0;

        let first = table
            .ensure_with("a", || -> Result<u32, Infallible> {
                calls += 1;
                Ok(7)
            })
            .unwrap();
        let second = table
            .ensure_with("a", || -> Result<u32, Infallible> {
                calls += 1;
                Ok(99)
            })
            .unwrap();

        assert_eq!(calls, 1);
        assert_eq!(*first, 7);
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn distinct_ids_get_distinct_slots() {
        let table: HandleTable<u32> = HandleTable::new();
        table
            .ensure_with("a", || -> Result<u32, Infallible> { Ok(1) })
            .unwrap();
        table
            .ensure_with("b", || -> Result<u32, Infallible> { Ok(2) })
            .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(*table.get("a").unwrap(), 1);
        assert_eq!(*table.get("b").unwrap(), 2);
    }

    #[test]
    fn failed_create_leaves_slot_empty() {
        let table: HandleTable<u32> = HandleTable::new();
        let err = table.ensure_with("a", || Err::<u32, &str>("boom"));
        assert_eq!(err.unwrap_err(), "boom");
        assert!(!table.contains("a"));

        // Retry succeeds.
        let handle = table
            .ensure_with("a", || -> Result<u32, Infallible> { Ok(5) })
            .unwrap();
        assert_eq!(*handle, 5);
    }

    #[test]
    fn create_may_reenter_queries() {
        let table: HandleTable<u32> = HandleTable::new();
        let handle = table
            .ensure_with("a", || -> Result<u32, Infallible> {
                assert!(!table.contains("a"));
                Ok(3)
            })
            .unwrap();
        assert_eq!(*handle, 3);
    }

    #[test]
    fn debug_reports_count() {
        let table: HandleTable<u32> = HandleTable::new();
        table
            .ensure_with("a", || -> Result<u32, Infallible> { Ok(1) })
            .unwrap();
        assert!(format!("{table:?}").contains("attached: 1"));
    }
}
