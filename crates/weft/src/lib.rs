#![forbid(unsafe_code)]

//! Weft public facade crate.
//!
//! Re-exports the member crates plus the types most compositions touch:
//! build a [`Component`] descriptor, wrap a widget module in an
//! [`InputAdapter`] or [`OutputAdapter`], and register both with a
//! [`BindingRegistry`].

pub use weft_binding as binding;
pub use weft_dom as dom;

pub mod prelude {
    pub use weft_binding::{
        BindingRegistry, Component, ErrorPayload, InputAdapter, InputBinding, OutputAdapter,
        OutputBinding, RatePolicy, UpdateMessage, WidgetModule,
    };
    pub use weft_dom::Element;
}

pub use prelude::{BindingRegistry, Component, InputAdapter, OutputAdapter, WidgetModule};
