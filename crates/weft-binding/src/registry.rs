#![forbid(unsafe_code)]

//! Host-facing binding contract and the registry adapters register with.
//!
//! The host framework is polymorphic over the capability set, not over a
//! base class: anything implementing [`InputBinding`] or [`OutputBinding`]
//! can be registered. `V` is the host's wire value type: adapters erase
//! their widget module's concrete types here, and widget failures surface
//! boxed as [`WidgetError`].
//!
//! # Invariants
//!
//! 1. Registry lookup is by exact binding name.
//! 2. Re-registering a name displaces the previous binding (last write wins)
//!    and is logged at `warn` level.
//! 3. Input and output namespaces are independent: one name may carry both
//!    an input and an output binding.

use std::rc::Rc;

use ahash::AHashMap;
use weft_dom::Element;

use crate::error::{BindingError, WidgetError};
use crate::input::{RatePolicy, UpdateMessage};
use crate::output::ErrorPayload;
use crate::widget::ChangeCallback;

/// Host contract for user-driven input widgets.
///
/// Implementations must tolerate any call order: every operation ensures
/// attachment before touching the widget module.
pub trait InputBinding<V> {
    /// Descendants of `scope` bound to this component, in document order.
    fn find<'a>(&self, scope: &'a Element) -> Vec<&'a Element>;

    /// Attach the widget, seeding it from the element's initial-value
    /// attribute. Elements without a stable ID are skipped silently.
    ///
    /// # Errors
    ///
    /// Propagates widget-module attach failures.
    fn initialize(&self, element: &Element) -> Result<(), WidgetError>;

    /// Register a change callback with the widget module. Silently a no-op
    /// when the element cannot attach (missing ID).
    ///
    /// # Errors
    ///
    /// Propagates widget-module attach failures.
    fn subscribe(&self, element: &Element, callback: ChangeCallback<V>)
    -> Result<(), WidgetError>;

    /// Current widget value, or `None` when the element cannot attach.
    ///
    /// # Errors
    ///
    /// Propagates widget-module attach failures.
    fn value(&self, element: &Element) -> Result<Option<V>, WidgetError>;

    /// Push a host-initiated value (state restoration) into the widget.
    ///
    /// # Errors
    ///
    /// Propagates widget-module attach and update failures.
    fn set_value(&self, element: &Element, value: V) -> Result<(), WidgetError>;

    /// Apply a programmatic update message (distinct from restoration).
    ///
    /// # Errors
    ///
    /// Propagates widget-module attach and update failures.
    fn receive_message(
        &self,
        element: &Element,
        message: UpdateMessage<V>,
    ) -> Result<(), WidgetError>;

    /// Rate policy for change propagation; `None` means every change is
    /// reported immediately.
    fn rate_policy(&self, element: &Element) -> Option<RatePolicy>;

    /// Custom value-type tag for host-side deserialization; `None` means the
    /// host default.
    fn value_type(&self) -> Option<&'static str>;
}

/// Host contract for display-only output widgets.
pub trait OutputBinding<V> {
    /// Descendants of `scope` bound to this component, in document order.
    fn find<'a>(&self, scope: &'a Element) -> Vec<&'a Element>;

    /// The element's stable ID.
    ///
    /// # Errors
    ///
    /// [`BindingError::MissingId`] when the host cannot route to this
    /// element.
    fn id<'a>(&self, element: &'a Element) -> Result<&'a str, BindingError>;

    /// Render `data` into the element: attach on first call, update after.
    /// Failures are logged and swallowed; they never reach the caller.
    fn render_value(&self, element: &Element, data: V);

    /// Show a host-side error in the widget. Intentionally a no-op.
    fn render_error(&self, element: &Element, error: &ErrorPayload);

    /// Clear a previously rendered error. Intentionally a no-op.
    fn clear_error(&self, element: &Element);
}

/// Name → binding maps the host dispatches through.
///
/// Adapters register here once, at composition time, under their
/// [`Component::binding_name`](crate::Component::binding_name).
pub struct BindingRegistry<V> {
    inputs: AHashMap<String, Rc<dyn InputBinding<V>>>,
    outputs: AHashMap<String, Rc<dyn OutputBinding<V>>>,
}

impl<V> BindingRegistry<V> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inputs: AHashMap::new(),
            outputs: AHashMap::new(),
        }
    }

    /// Register an input binding under `name`, returning any binding it
    /// displaced.
    pub fn register_input(
        &mut self,
        name: impl Into<String>,
        binding: Rc<dyn InputBinding<V>>,
    ) -> Option<Rc<dyn InputBinding<V>>> {
        let name = name.into();
        let prev = self.inputs.insert(name.clone(), binding);
        if prev.is_some() {
            tracing::warn!(name = %name, "input binding re-registered, replacing previous");
        }
        prev
    }

    /// Register an output binding under `name`, returning any binding it
    /// displaced.
    pub fn register_output(
        &mut self,
        name: impl Into<String>,
        binding: Rc<dyn OutputBinding<V>>,
    ) -> Option<Rc<dyn OutputBinding<V>>> {
        let name = name.into();
        let prev = self.outputs.insert(name.clone(), binding);
        if prev.is_some() {
            tracing::warn!(name = %name, "output binding re-registered, replacing previous");
        }
        prev
    }

    /// Look up an input binding by name.
    #[must_use]
    pub fn input(&self, name: &str) -> Option<Rc<dyn InputBinding<V>>> {
        self.inputs.get(name).map(Rc::clone)
    }

    /// Look up an output binding by name.
    #[must_use]
    pub fn output(&self, name: &str) -> Option<Rc<dyn OutputBinding<V>>> {
        self.outputs.get(name).map(Rc::clone)
    }

    /// Registered input binding names, in no particular order.
    pub fn input_names(&self) -> impl Iterator<Item = &str> {
        self.inputs.keys().map(String::as_str)
    }

    /// Registered output binding names, in no particular order.
    pub fn output_names(&self) -> impl Iterator<Item = &str> {
        self.outputs.keys().map(String::as_str)
    }
}

impl<V> Default for BindingRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> std::fmt::Debug for BindingRegistry<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingRegistry")
            .field("inputs", &self.inputs.len())
            .field("outputs", &self.outputs.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;
    use crate::input::InputAdapter;
    use crate::mock::MockWidget;
    use crate::output::OutputAdapter;

    fn input_binding(ns: &str, name: &str) -> Rc<dyn InputBinding<f64>> {
        Rc::new(InputAdapter::new(
            Component::new(ns, name),
            MockWidget::<f64>::new(),
        ))
    }

    fn output_binding(ns: &str, name: &str) -> Rc<dyn OutputBinding<f64>> {
        Rc::new(OutputAdapter::new(
            Component::new(ns, name),
            MockWidget::<f64>::new(),
        ))
    }

    #[test]
    fn lookup_by_name() {
        let mut registry = BindingRegistry::new();
        registry.register_input("acme.dial", input_binding("acme", "dial"));
        registry.register_output("acme.meter", output_binding("acme", "meter"));

        assert!(registry.input("acme.dial").is_some());
        assert!(registry.output("acme.meter").is_some());
        assert!(registry.input("acme.meter").is_none());
        assert!(registry.output("acme.dial").is_none());
    }

    #[test]
    fn reregistration_displaces() {
        let mut registry = BindingRegistry::new();
        assert!(
            registry
                .register_input("acme.dial", input_binding("acme", "dial"))
                .is_none()
        );
        let displaced = registry.register_input("acme.dial", input_binding("acme", "dial"));
        assert!(displaced.is_some());
        assert_eq!(registry.input_names().count(), 1);
    }

    #[test]
    fn input_and_output_namespaces_independent() {
        let mut registry = BindingRegistry::new();
        registry.register_input("acme.dial", input_binding("acme", "dial"));
        registry.register_output("acme.dial", output_binding("acme", "dial"));
        assert!(registry.input("acme.dial").is_some());
        assert!(registry.output("acme.dial").is_some());
    }

    #[test]
    fn debug_reports_counts() {
        let mut registry: BindingRegistry<f64> = BindingRegistry::new();
        registry.register_input("acme.dial", input_binding("acme", "dial"));
        let debug = format!("{registry:?}");
        assert!(debug.contains("inputs: 1"));
        assert!(debug.contains("outputs: 0"));
    }
}
