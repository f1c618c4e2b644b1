//! Core operations.
//!
//! This module contains the business logic for erdkit commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod graph;
pub mod inspect;
pub mod list;

pub use check::check;
pub use graph::graph;
pub use inspect::inspect;
pub use list::list;

use erdkit_core::{ClassRef, Namespace};
use eyre::{Result, eyre};

/// Look up a class by bare or qualified name.
fn find_class<'ns>(ns: &'ns Namespace, name: &str) -> Result<ClassRef<'ns>> {
    ns.get(name).ok_or_else(|| {
        let known: Vec<_> = ns.declared().map(|c| c.name()).collect();
        eyre!(
            "no class named '{}' is declared (known classes: {})",
            name,
            known.join(", ")
        )
    })
}
