#![forbid(unsafe_code)]

//! The widget-module contract.
//!
//! A widget module is the externally-implemented half of a component: it
//! mounts UI into a host element and owns all interaction with the
//! underlying engine. The binding adapters depend on exactly four
//! operations, routed through an opaque per-element [`Handle`](WidgetModule::Handle).
//!
//! # Failure Modes
//!
//! | Operation   | Fallible | Adapter behavior                                  |
//! |-------------|----------|---------------------------------------------------|
//! | `attach`    | yes      | input: propagates; output: logged and swallowed   |
//! | `update`    | yes      | input: propagates; output: logged and swallowed   |
//! | `value`     | no       | returned as-is                                    |
//! | `subscribe` | no       | registration forwarded, callback not stored here  |

use std::rc::Rc;

use weft_dom::Element;

/// Callback the host framework supplies to observe user-driven value changes.
///
/// The widget module invokes it with the new value whenever the user changes
/// the widget. Adapters forward registration and never retain the callback.
pub type ChangeCallback<V> = Rc<dyn Fn(&V)>;

/// One externally-implemented stateful widget kind.
///
/// `attach` is called at most once per element (the adapters' side-table
/// enforces this); every later operation receives the handle it returned.
/// All calls happen synchronously on the host's UI event loop.
pub trait WidgetModule {
    /// Application-defined payload flowing in and out of the widget.
    type Value;
    /// Opaque per-element state token, scoped to that element's lifetime.
    type Handle;
    /// Widget-side failure.
    type Error: std::error::Error + 'static;

    /// Mount the widget into `element`, seeding it with `initial` when given.
    fn attach(
        &self,
        element: &Element,
        initial: Option<Self::Value>,
    ) -> Result<Self::Handle, Self::Error>;

    /// Push a new value into an attached widget.
    fn update(&self, handle: &Self::Handle, value: Self::Value) -> Result<(), Self::Error>;

    /// Read the widget's current value.
    fn value(&self, handle: &Self::Handle) -> Self::Value;

    /// Register a change callback against the handle.
    fn subscribe(&self, handle: &Self::Handle, callback: ChangeCallback<Self::Value>);
}
