#![forbid(unsafe_code)]

//! Binding adapter for user-driven input widgets.
//!
//! An [`InputAdapter`] wraps one component's widget module and carries the
//! per-element handle side-table. Element lifecycle per the host contract:
//! **Unattached → Attached**, terminal; element removal is the host's
//! concern, not ours.
//!
//! Every operation ensures attachment first, so the host may call
//! [`value`](InputAdapter::value) or [`subscribe`](InputAdapter::subscribe)
//! before [`initialize`](InputAdapter::initialize) and end up in the same
//! state.
//!
//! # Failure Modes
//!
//! | Condition                 | Behavior                                  |
//! |---------------------------|-------------------------------------------|
//! | Element without stable ID | Silently skipped; no handle, no error     |
//! | Unparsable initial value  | Treated as "no initial value"             |
//! | Widget attach/update fail | Propagated to the caller via `Result`     |

use std::rc::Rc;

use weft_dom::Element;

use crate::component::Component;
use crate::error::WidgetError;
use crate::handle::HandleTable;
use crate::registry::InputBinding;
use crate::widget::{ChangeCallback, WidgetModule};

/// Attribute holding an input element's optional initial value.
pub const INITIAL_VALUE_ATTR: &str = "data-initial-value";

/// How user-driven changes are batched before reaching the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RateMode {
    /// Report only after the value has been stable for the delay.
    Debounce,
    /// Report at most once per delay window.
    Throttle,
}

/// A change-propagation rate limit.
///
/// Input adapters in this crate never impose one (their
/// [`rate_policy`](InputAdapter::rate_policy) is always `None`), but the
/// shape is part of the host contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RatePolicy {
    /// Batching mode.
    pub mode: RateMode,
    /// Window length in milliseconds.
    pub delay_ms: u64,
}

/// Programmatic update pushed by the host, distinct from state restoration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpdateMessage<V> {
    /// The value to apply.
    pub value: V,
}

/// Binding adapter for one input component kind.
///
/// Generic over the widget module; the payload type stays opaque except for
/// the one structural narrow the contract requires: the initial-value
/// attribute is parsed as `f64`, so `W::Value` must be constructible from it.
pub struct InputAdapter<W: WidgetModule> {
    component: Component,
    widget: W,
    handles: HandleTable<W::Handle>,
}

impl<W: WidgetModule> InputAdapter<W> {
    /// Create the adapter for `component`, delegating to `widget`.
    #[must_use]
    pub fn new(component: Component, widget: W) -> Self {
        Self {
            component,
            widget,
            handles: HandleTable::new(),
        }
    }

    /// The component this adapter serves.
    #[must_use]
    pub fn component(&self) -> &Component {
        &self.component
    }

    /// Whether the element already holds a widget state handle.
    #[must_use]
    pub fn is_attached(&self, element: &Element) -> bool {
        element.id().is_some_and(|id| self.handles.contains(id))
    }

    /// Descendants of `scope` bound to this component, in document order.
    #[must_use]
    pub fn find<'a>(&self, scope: &'a Element) -> Vec<&'a Element> {
        let marker = self.component.marker_class();
        scope
            .descendants()
            .filter(|el| el.has_class(&marker))
            .collect()
    }
}

impl<W: WidgetModule> InputAdapter<W>
where
    W::Value: From<f64>,
{
    /// Attach-if-absent. Returns `None` when the element has no stable ID:
    /// such elements are not valid binding targets, and callers must
    /// re-check rather than assume a handle exists.
    fn ensure_attached(&self, element: &Element) -> Result<Option<Rc<W::Handle>>, W::Error> {
        let Some(id) = element.id() else {
            return Ok(None);
        };
        let handle = self.handles.ensure_with(id, || {
            let initial = parse_initial(element);
            tracing::debug!(id = %id, component = %self.component, "attaching input widget");
            self.widget.attach(element, initial.map(W::Value::from))
        })?;
        Ok(Some(handle))
    }

    /// Attach the widget, seeding it from [`INITIAL_VALUE_ATTR`].
    ///
    /// # Errors
    ///
    /// Propagates widget-module attach failures.
    pub fn initialize(&self, element: &Element) -> Result<(), W::Error> {
        self.ensure_attached(element).map(drop)
    }

    /// Register a change callback with the widget module.
    ///
    /// # Errors
    ///
    /// Propagates widget-module attach failures.
    pub fn subscribe(
        &self,
        element: &Element,
        callback: ChangeCallback<W::Value>,
    ) -> Result<(), W::Error> {
        if let Some(handle) = self.ensure_attached(element)? {
            self.widget.subscribe(&handle, callback);
        }
        Ok(())
    }

    /// Current widget value, or `None` when the element cannot attach.
    ///
    /// # Errors
    ///
    /// Propagates widget-module attach failures.
    pub fn value(&self, element: &Element) -> Result<Option<W::Value>, W::Error> {
        Ok(self
            .ensure_attached(element)?
            .map(|handle| self.widget.value(&handle)))
    }

    /// Push a host-initiated value (state restoration) into the widget.
    ///
    /// # Errors
    ///
    /// Propagates widget-module attach and update failures.
    pub fn set_value(&self, element: &Element, value: W::Value) -> Result<(), W::Error> {
        match self.ensure_attached(element)? {
            Some(handle) => self.widget.update(&handle, value),
            None => Ok(()),
        }
    }

    /// Apply a programmatic update message by delegating to
    /// [`set_value`](Self::set_value).
    ///
    /// # Errors
    ///
    /// Propagates widget-module attach and update failures.
    pub fn receive_message(
        &self,
        element: &Element,
        message: UpdateMessage<W::Value>,
    ) -> Result<(), W::Error> {
        self.set_value(element, message.value)
    }

    /// Always `None`: changes are reported immediately, never debounced or
    /// throttled.
    #[must_use]
    pub fn rate_policy(&self, _element: &Element) -> Option<RatePolicy> {
        None
    }

    /// Always `None`: no custom value-type tag is declared to the host.
    #[must_use]
    pub fn value_type(&self) -> Option<&'static str> {
        None
    }
}

fn parse_initial(element: &Element) -> Option<f64> {
    element.attr(INITIAL_VALUE_ATTR)?.parse().ok()
}

impl<W: WidgetModule> std::fmt::Debug for InputAdapter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputAdapter")
            .field("component", &self.component)
            .field("handles", &self.handles)
            .finish()
    }
}

impl<W: WidgetModule> InputBinding<W::Value> for InputAdapter<W>
where
    W::Value: From<f64>,
{
    fn find<'a>(&self, scope: &'a Element) -> Vec<&'a Element> {
        InputAdapter::find(self, scope)
    }

    fn initialize(&self, element: &Element) -> Result<(), WidgetError> {
        InputAdapter::initialize(self, element).map_err(Into::into)
    }

    fn subscribe(
        &self,
        element: &Element,
        callback: ChangeCallback<W::Value>,
    ) -> Result<(), WidgetError> {
        InputAdapter::subscribe(self, element, callback).map_err(Into::into)
    }

    fn value(&self, element: &Element) -> Result<Option<W::Value>, WidgetError> {
        InputAdapter::value(self, element).map_err(Into::into)
    }

    fn set_value(&self, element: &Element, value: W::Value) -> Result<(), WidgetError> {
        InputAdapter::set_value(self, element, value).map_err(Into::into)
    }

    fn receive_message(
        &self,
        element: &Element,
        message: UpdateMessage<W::Value>,
    ) -> Result<(), WidgetError> {
        InputAdapter::receive_message(self, element, message).map_err(Into::into)
    }

    fn rate_policy(&self, element: &Element) -> Option<RatePolicy> {
        InputAdapter::rate_policy(self, element)
    }

    fn value_type(&self) -> Option<&'static str> {
        InputAdapter::value_type(self)
    }
}
