//! Adapters that normalize model frameworks for entity-relationship diagrams.
//!
//! An adapter wraps one framework-native model class or field descriptor
//! and exposes it through the uniform [`Model`]/[`Field`] traits, so a
//! diagram pipeline never needs to know which framework defined a class.
//!
//! # Available Adapters
//!
//! - [`PydanticModel`] / [`PydanticField`] - Pydantic `BaseModel` subclasses, key `"pydantic"`
//!
//! Adapters are looked up through the static [`registry`], and
//! [`EntityGraph`] turns a set of adapted models into node and edge data.

mod base;
mod docstring;
mod error;
pub mod graph;
mod pydantic;
pub mod registry;

pub use base::{Field, Model, base_docstring};
pub use docstring::format_attribute_line;
pub use error::{AdapterError, InvalidFieldError, InvalidModelError, UnevaluatedForwardRefError};
pub use graph::{Edge, Entity, EntityGraph, FieldRow};
pub use pydantic::{FORWARD_REF_HELP, PydanticField, PydanticModel};
pub use registry::{AdapterKind, AnyField, AnyModel};
