//! List operation - declared classes.

use erdkit_adapters::registry;
use erdkit_core::{Namespace, Object};

use crate::reports::{ClassInfo, ListReport};

pub fn list(ns: &Namespace, models_only: bool) -> ListReport {
    let classes = ns
        .declared()
        .filter_map(|class| {
            let adapter = registry::select(&Object::from(class)).map(|kind| kind.key());
            if models_only && adapter.is_none() {
                return None;
            }
            Some(ClassInfo {
                key: class.qualified_name(),
                bases: class.bases().map(|b| b.name().to_string()).collect(),
                fields: class.model_fields().len(),
                adapter,
            })
        })
        .collect();

    ListReport { classes }
}
