#![forbid(unsafe_code)]

//! Per-component descriptor: marker class and registry name.
//!
//! One [`Component`] value configures one adapter pair at composition time.
//! The host stamps the [`marker_class`](Component::marker_class) onto every
//! element belonging to the component, and the adapters register under the
//! [`binding_name`](Component::binding_name).

use core::fmt;

/// Identity of one component kind: a package namespace plus a component name.
///
/// Hosts conventionally use lowercase kebab- or snake-case tokens so the
/// derived marker class is a valid CSS class.
///
/// ```
/// use weft_binding::Component;
///
/// let dial = Component::new("acme", "dial");
/// assert_eq!(dial.marker_class(), "acme-dial-container");
/// assert_eq!(dial.binding_name(), "acme.dial");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Component {
    namespace: String,
    name: String,
}

impl Component {
    /// Create a descriptor from a package namespace and a component name.
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Package namespace token.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Component name within the namespace.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// CSS class the host stamps on every bound element of this component.
    #[must_use]
    pub fn marker_class(&self) -> String {
        format!("{}-{}-container", self.namespace, self.name)
    }

    /// Unique name the adapter pair registers under.
    #[must_use]
    pub fn binding_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}
