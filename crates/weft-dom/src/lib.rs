#![forbid(unsafe_code)]

//! Host element surface for Weft.
//!
//! The host framework owns a tree of [`Element`]s; binding adapters only
//! observe it. This crate provides the minimal surface those adapters need:
//! stable IDs, class markers, string attributes, and document-order traversal.

pub mod element;

pub use element::{Descendants, Element};
