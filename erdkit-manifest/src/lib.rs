//! Loading model definitions from `erd.toml`.
//!
//! The manifest declares classes, their bases and their fields; loading it
//! produces an [`erdkit_core::Namespace`] ready to be adapted.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;

pub use error::{Error, Result, SourceContext};
pub use manifest::{
    ClassSpec, ErdToml, FieldSpec, Manifest, ParseContext, ProjectConfig, parse_manifest,
};
