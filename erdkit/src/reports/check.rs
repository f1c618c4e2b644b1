//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from manifest validation.
#[derive(Debug)]
pub struct CheckReport {
    pub manifest_path: PathBuf,
    pub project: String,
    pub description: Option<String>,
    /// Classes some adapter accepts as a model.
    pub models: usize,
    /// Declared classes no adapter accepts.
    pub classes: usize,
    pub unresolved: Vec<UnresolvedInfo>,
}

/// A forward reference still waiting for its class to be declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedInfo {
    pub class: String,
    pub field: String,
    pub name: String,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for u in &self.unresolved {
            out.warning(&format!(
                "{}.{} refers to '{}', which is not resolved; set `rebuild = true` on {} or `rebuild_all = true` under [project]",
                u.class, u.field, u.name, u.class
            ));
        }
        if !self.unresolved.is_empty() {
            out.newline();
        }

        out.preformatted(&format!(
            "✓ {} is valid ({} {}, {} {})",
            self.manifest_path.display(),
            self.models,
            plural(self.models, "model", "models"),
            self.classes,
            plural(self.classes, "other class", "other classes"),
        ));
    }
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}
