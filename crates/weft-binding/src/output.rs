#![forbid(unsafe_code)]

//! Binding adapter for display-only output widgets.
//!
//! Outputs have no inbound events, so the whole lifecycle collapses into
//! [`render_value`](OutputAdapter::render_value): attach with the first
//! payload, update with every later one. The host renders many outputs per
//! update cycle, so failures are isolated per element: logged with the
//! element ID and the failure detail, then swallowed.
//!
//! # Failure Modes
//!
//! | Condition                  | Behavior                                  |
//! |----------------------------|-------------------------------------------|
//! | Element without stable ID  | [`id`](OutputAdapter::id) fails hard;     |
//! |                            | `render_value` logs and returns           |
//! | Widget attach/update fail  | Logged with element ID, swallowed         |

use weft_dom::Element;

use crate::component::Component;
use crate::error::BindingError;
use crate::handle::HandleTable;
use crate::registry::OutputBinding;
use crate::widget::WidgetModule;

/// Host-side error payload for [`OutputBinding::render_error`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorPayload {
    /// Human-readable error text from the host.
    pub message: String,
}

/// Binding adapter for one output component kind.
pub struct OutputAdapter<W: WidgetModule> {
    component: Component,
    widget: W,
    handles: HandleTable<W::Handle>,
}

impl<W: WidgetModule> OutputAdapter<W> {
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

    /// The element's stable ID.
    ///
    /// # Errors
    ///
    /// [`BindingError::MissingId`]: unlike the input side, an output element
    /// without an ID cannot be routed to at all.
    pub fn id<'a>(&self, element: &'a Element) -> Result<&'a str, BindingError> {
        element.id().ok_or_else(|| BindingError::MissingId {
            component: self.component.binding_name(),
        })
    }

    /// Render `data` into the element.
    ///
    /// First call attaches the widget with `data` as its initial value;
    /// later calls forward `data` to the widget's update operation. Never
    /// returns an error: failures are logged against the element and
    /// swallowed so the host's render loop continues with other outputs.
    pub fn render_value(&self, element: &Element, data: W::Value) {
        let Some(id) = element.id() else {
            tracing::error!(
                component = %self.component,
                "cannot render output: element has no id"
            );
            return;
        };
        let result = match self.handles.get(id) {
            Some(handle) => self.widget.update(&handle, data),
            None => self
                .handles
                .ensure_with(id, || {
                    tracing::debug!(id = %id, component = %self.component, "attaching output widget");
                    self.widget.attach(element, Some(data))
                })
                .map(drop),
        };
        if let Err(err) = result {
            tracing::error!(
                id = %id,
                component = %self.component,
                error = %err,
                "output render failed"
            );
        }
    }
}

impl<W: WidgetModule> std::fmt::Debug for OutputAdapter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputAdapter")
            .field("component", &self.component)
            .field("handles", &self.handles)
            .finish()
    }
}

impl<W: WidgetModule> OutputBinding<W::Value> for OutputAdapter<W> {
    fn find<'a>(&self, scope: &'a Element) -> Vec<&'a Element> {
        OutputAdapter::find(self, scope)
    }

    fn id<'a>(&self, element: &'a Element) -> Result<&'a str, BindingError> {
        OutputAdapter::id(self, element)
    }

    fn render_value(&self, element: &Element, data: W::Value) {
        OutputAdapter::render_value(self, element, data);
    }

    fn render_error(&self, _element: &Element, _error: &ErrorPayload) {}

    fn clear_error(&self, _element: &Element) {}
}
