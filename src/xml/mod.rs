//! Namespace-aware XML document model
//!
//! Parses an XML document into an element tree and exposes the accessors
//! the mapping layer works with. Element and attribute lookups match on
//! local names; namespace URIs are resolved and kept alongside.

pub mod element;
pub mod parser;

pub use element::{Attribute, Element, Node};
pub use parser::{Document, XmlError};

/// The MODS v3 namespace.
pub const MODS_NS: &str = "http://www.loc.gov/mods/v3";

/// The xlink namespace, used for `xlink:href` references.
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
