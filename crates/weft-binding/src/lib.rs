#![forbid(unsafe_code)]

//! Binding adapters between a host reactive UI framework and widget modules.
//!
//! A *widget module* is an external capability that owns the rendering and
//! interaction of one component kind. It exposes four operations (attach,
//! update, read, subscribe) through an opaque per-element state handle
//! (see [`WidgetModule`]). The host framework discovers bound elements by a
//! CSS-class marker, then drives them through two adapters:
//!
//! - [`InputAdapter`]: user-controllable widgets. The host reads the current
//!   value, pushes restores and programmatic updates, and subscribes to
//!   user-driven changes.
//! - [`OutputAdapter`]: display widgets. The host pushes values in; nothing
//!   flows back out.
//!
//! Both share one lifecycle contract: a handle is acquired lazily, on the
//! first operation that needs it, and stored in an explicit side-table
//! ([`HandleTable`]) keyed by the element's stable ID. The host may invoke
//! lifecycle methods in any order; attach-if-absent makes every entry point
//! safe.
//!
//! # Invariants
//!
//! 1. At most one handle exists per element ID; it is created lazily and
//!    never recreated while present.
//! 2. An input element without a stable ID never acquires a handle and never
//!    raises; the same condition on the output side is a hard error at
//!    [`OutputBinding::id`](registry::OutputBinding::id).
//! 3. A failing output render is logged and swallowed; it never escapes into
//!    the host's render loop.
//! 4. Input-side widget failures propagate unwrapped to the host.
//! 5. Change callbacks are forwarded to the widget module, never stored here.
//!
//! # Architecture
//!
//! Everything is single-threaded and event-driven: `Rc` handles, `RefCell`
//! interior state, no locks. Adapters are plain values implementing the
//! [`InputBinding`](registry::InputBinding) / [`OutputBinding`](registry::OutputBinding)
//! capability traits and are registered with a [`BindingRegistry`] under a
//! unique name at composition time. Per-component configuration lives in a
//! small [`Component`] descriptor (marker class, registry name) instead of
//! stamped-out per-component source files.

pub mod component;
pub mod error;
pub mod handle;
pub mod input;
pub mod mock;
pub mod output;
pub mod registry;
pub mod widget;

pub use component::Component;
pub use error::{BindingError, WidgetError};
pub use handle::HandleTable;
pub use input::{INITIAL_VALUE_ATTR, InputAdapter, RateMode, RatePolicy, UpdateMessage};
pub use mock::{MockError, MockHandle, MockWidget};
pub use output::{ErrorPayload, OutputAdapter};
pub use registry::{BindingRegistry, InputBinding, OutputBinding};
pub use widget::{ChangeCallback, WidgetModule};
