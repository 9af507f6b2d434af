#![forbid(unsafe_code)]

//! Error taxonomy for the binding layer.
//!
//! The adapters themselves raise almost nothing:
//!
//! - A missing element ID on the *input* side is silence, not an error.
//! - The same condition on the *output* side is [`BindingError::MissingId`],
//!   since the host cannot route output updates without an ID.
//! - Widget-module failures keep their own types on the input side and cross
//!   the host-facing trait seam boxed as [`WidgetError`]; on the output side
//!   they are logged and swallowed inside `render_value`.

/// Widget-module failure as it crosses the host-facing trait boundary.
pub type WidgetError = Box<dyn std::error::Error>;

/// Errors raised by the binding adapters themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// An output element has no stable ID to route updates by.
    MissingId {
        /// Binding name of the component the element belongs to.
        component: String,
    },
}

impl std::fmt::Display for BindingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingId { component } => {
                write!(f, "output element for '{component}' is missing an id")
            }
        }
    }
}

impl std::error::Error for BindingError {}
