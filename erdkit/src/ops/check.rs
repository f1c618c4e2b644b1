//! Check operation - manifest validation.

use std::path::Path;

use erdkit_adapters::registry;
use erdkit_core::Object;
use erdkit_manifest::Manifest;

use crate::reports::{CheckReport, UnresolvedInfo};

/// Execute the check operation.
///
/// The manifest has already been validated while loading; this collects what
/// it declares and every forward reference that is still unresolved.
pub fn check(manifest: &Manifest, manifest_path: &Path) -> CheckReport {
    let ns = manifest.namespace();

    let mut models = 0;
    let mut classes = 0;
    let mut unresolved = Vec::new();
    for class in ns.declared() {
        if registry::select(&Object::from(class)).is_some() {
            models += 1;
        } else {
            classes += 1;
        }

        for (field, info) in class.own_fields() {
            for name in info.info().annotation.forward_refs() {
                unresolved.push(UnresolvedInfo {
                    class: class.qualified_name(),
                    field: field.to_string(),
                    name: name.to_string(),
                });
            }
        }
    }

    CheckReport {
        manifest_path: manifest_path.to_path_buf(),
        project: manifest.project.name.clone(),
        description: manifest.project.description.clone(),
        models,
        classes,
        unresolved,
    }
}
