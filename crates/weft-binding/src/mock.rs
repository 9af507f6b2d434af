#![forbid(unsafe_code)]

//! Deterministic widget module for tests.
//!
//! [`MockWidget`] counts every contract call, records attachments and
//! updates per element, and can be programmed to fail attach or update for
//! specific element IDs. [`emit_change`](MockWidget::emit_change) simulates
//! a user-driven change, firing the callbacks registered through
//! `subscribe`.
//!
//! Clones share state, so tests can keep a probe after moving a clone into
//! an adapter.

use std::cell::RefCell;
use std::rc::Rc;

use ahash::{AHashMap, AHashSet};
use weft_dom::Element;

use crate::widget::{ChangeCallback, WidgetModule};

/// Failure injected by a programmed [`MockWidget`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockError {
    op: &'static str,
    element_id: String,
}

impl MockError {
    fn new(op: &'static str, element_id: impl Into<String>) -> Self {
        Self {
            op,
            element_id: element_id.into(),
        }
    }
}

impl std::fmt::Display for MockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mock widget {} failed for '{}'", self.op, self.element_id)
    }
}

impl std::error::Error for MockError {}

/// One recorded attach call.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment<V> {
    /// ID of the element that attached, if it had one.
    pub element_id: Option<String>,
    /// Initial value the adapter passed, if any.
    pub initial: Option<V>,
}

/// Opaque state token handed out by [`MockWidget::attach`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockHandle {
    seq: usize,
    element_id: Option<String>,
}

struct MockInner<V> {
    attachments: Vec<Attachment<V>>,
    updates: Vec<(String, V)>,
    values: AHashMap<usize, V>,
    callbacks: Vec<(usize, ChangeCallback<V>)>,
    fail_attach: AHashSet<String>,
    fail_update: AHashSet<String>,
}

impl<V> Default for MockInner<V> {
    fn default() -> Self {
        Self {
            attachments: Vec::new(),
            updates: Vec::new(),
            values: AHashMap::new(),
            callbacks: Vec::new(),
            fail_attach: AHashSet::new(),
            fail_update: AHashSet::new(),
        }
    }
}

/// Counting stub widget module.
pub struct MockWidget<V> {
    inner: Rc<RefCell<MockInner<V>>>,
}

impl<V> Clone for MockWidget<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<V> Default for MockWidget<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> MockWidget<V> {
    /// Create a mock with no recorded calls and no programmed failures.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(MockInner::default())),
        }
    }

    /// Number of attach calls so far.
    #[must_use]
    pub fn attach_count(&self) -> usize {
        self.inner.borrow().attachments.len()
    }

    /// Number of registered change callbacks.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.inner.borrow().callbacks.len()
    }

    /// Program attach to fail for the element ID.
    pub fn fail_attach(&self, element_id: impl Into<String>) {
        self.inner.borrow_mut().fail_attach.insert(element_id.into());
    }

    /// Program update to fail for the element ID.
    pub fn fail_update(&self, element_id: impl Into<String>) {
        self.inner.borrow_mut().fail_update.insert(element_id.into());
    }

    /// Remove all programmed failures.
    pub fn clear_failures(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.fail_attach.clear();
        inner.fail_update.clear();
    }
}

impl<V: Clone> MockWidget<V> {
    /// All recorded attach calls, in order.
    #[must_use]
    pub fn attachments(&self) -> Vec<Attachment<V>> {
        self.inner.borrow().attachments.clone()
    }

    /// All successful updates as `(element_id, value)`, in order.
    #[must_use]
    pub fn updates(&self) -> Vec<(String, V)> {
        self.inner.borrow().updates.clone()
    }

    /// Simulate a user-driven change on the element: stores `value` as the
    /// current value of every handle attached to `element_id`, then fires
    /// the callbacks registered against those handles.
    pub fn emit_change(&self, element_id: &str, value: V) {
        let fired: Vec<ChangeCallback<V>> = {
            let mut inner = self.inner.borrow_mut();
            let seqs: Vec<usize> = inner
                .attachments
                .iter()
                .enumerate()
                .filter(|(_, a)| a.element_id.as_deref() == Some(element_id))
                .map(|(seq, _)| seq)
                .collect();
            for seq in &seqs {
                inner.values.insert(*seq, value.clone());
            }
            inner
                .callbacks
                .iter()
                .filter(|(seq, _)| seqs.contains(seq))
                .map(|(_, cb)| Rc::clone(cb))
                .collect()
        };
        // Borrow released before callbacks run: they may re-enter the widget.
        for callback in fired {
            callback(&value);
        }
    }
}

impl<V: Clone + Default + 'static> WidgetModule for MockWidget<V> {
    type Value = V;
    type Handle = MockHandle;
    type Error = MockError;

    fn attach(&self, element: &Element, initial: Option<V>) -> Result<MockHandle, MockError> {
        let mut inner = self.inner.borrow_mut();
        if let Some(id) = element.id()
            && inner.fail_attach.contains(id)
        {
            return Err(MockError::new("attach", id));
        }
        let seq = inner.attachments.len();
        if let Some(value) = initial.clone() {
            inner.values.insert(seq, value);
        }
        inner.attachments.push(Attachment {
            element_id: element.id().map(str::to_owned),
            initial,
        });
        Ok(MockHandle {
            seq,
            element_id: element.id().map(str::to_owned),
        })
    }

    fn update(&self, handle: &MockHandle, value: V) -> Result<(), MockError> {
        let mut inner = self.inner.borrow_mut();
        let id = handle.element_id.clone().unwrap_or_default();
        if inner.fail_update.contains(&id) {
            return Err(MockError::new("update", id));
        }
        inner.values.insert(handle.seq, value.clone());
        inner.updates.push((id, value));
        Ok(())
    }

    fn value(&self, handle: &MockHandle) -> V {
        self.inner
            .borrow()
            .values
            .get(&handle.seq)
            .cloned()
            .unwrap_or_default()
    }

    fn subscribe(&self, handle: &MockHandle, callback: ChangeCallback<V>) {
        self.inner
            .borrow_mut()
            .callbacks
            .push((handle.seq, callback));
    }
}

impl<V> std::fmt::Debug for MockWidget<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("MockWidget")
            .field("attachments", &inner.attachments.len())
            .field("updates", &inner.updates.len())
            .field("subscriptions", &inner.callbacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn el(id: &str) -> Element {
        Element::new("div").with_id(id)
    }

    #[test]
    fn records_attachments_in_order() {
        let widget: MockWidget<f64> = MockWidget::new();
        widget.attach(&el("a"), Some(1.0)).unwrap();
        widget.attach(&el("b"), None).unwrap();

        let recorded = widget.attachments();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].element_id.as_deref(), Some("a"));
        assert_eq!(recorded[0].initial, Some(1.0));
        assert_eq!(recorded[1].initial, None);
    }

    #[test]
    fn value_tracks_initial_then_updates() {
        let widget: MockWidget<f64> = MockWidget::new();
        let handle = widget.attach(&el("a"), Some(2.0)).unwrap();
        assert_eq!(widget.value(&handle), 2.0);

        widget.update(&handle, 5.0).unwrap();
        assert_eq!(widget.value(&handle), 5.0);
        assert_eq!(widget.updates(), vec![("a".to_string(), 5.0)]);
    }

    #[test]
    fn value_defaults_without_initial() {
        let widget: MockWidget<f64> = MockWidget::new();
        let handle = widget.attach(&el("a"), None).unwrap();
        assert_eq!(widget.value(&handle), 0.0);
    }

    #[test]
    fn programmed_attach_failure() {
        let widget: MockWidget<f64> = MockWidget::new();
        widget.fail_attach("a");
        assert!(widget.attach(&el("a"), None).is_err());
        assert!(widget.attach(&el("b"), None).is_ok());
        assert_eq!(widget.attach_count(), 1);
    }

    #[test]
    fn programmed_update_failure_not_recorded() {
        let widget: MockWidget<f64> = MockWidget::new();
        let handle = widget.attach(&el("a"), Some(1.0)).unwrap();
        widget.fail_update("a");
        assert!(widget.update(&handle, 9.0).is_err());
        assert!(widget.updates().is_empty());
        assert_eq!(widget.value(&handle), 1.0);
    }

    #[test]
    fn emit_change_fires_matching_subscribers_only() {
        let widget: MockWidget<f64> = MockWidget::new();
        let ha = widget.attach(&el("a"), None).unwrap();
        let hb = widget.attach(&el("b"), None).unwrap();

        let seen_a = Rc::new(Cell::new(0.0));
        let seen_b = Rc::new(Cell::new(0.0));
        let sink_a = Rc::clone(&seen_a);
        let sink_b = Rc::clone(&seen_b);
        widget.subscribe(&ha, Rc::new(move |v| sink_a.set(*v)));
        widget.subscribe(&hb, Rc::new(move |v| sink_b.set(*v)));

        widget.emit_change("a", 3.5);
        assert_eq!(seen_a.get(), 3.5);
        assert_eq!(seen_b.get(), 0.0);
        assert_eq!(widget.value(&ha), 3.5);
    }

    #[test]
    fn clones_share_state() {
        let widget: MockWidget<f64> = MockWidget::new();
        let probe = widget.clone();
        widget.attach(&el("a"), None).unwrap();
        assert_eq!(probe.attach_count(), 1);
    }
}
