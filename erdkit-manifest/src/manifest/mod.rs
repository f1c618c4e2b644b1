//! Manifest types and parsing for erd.toml files.

mod file;
mod parse;
mod validate;

pub use file::ErdToml;
use erdkit_core::Namespace;
use indexmap::IndexMap;
pub use parse::parse_manifest;
use serde::Deserialize;
pub use validate::ParseContext;

/// Root manifest for erd.toml
///
/// Classes are declared in document order, so a class may only name bases
/// and field types declared above it (or quote them as forward references).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub project: ProjectConfig,

    #[serde(default)]
    pub classes: IndexMap<String, ClassSpec>,

    /// Built from `classes` once the manifest is validated
    #[serde(skip)]
    namespace: Namespace,
}

impl Manifest {
    /// The loaded classes.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn class(&self, name: &str) -> Option<&ClassSpec> {
        self.classes.get(name)
    }
}

/// `[project]`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    pub name: String,

    /// Module for classes that do not set their own; defaults to `name`.
    pub module: Option<String>,

    pub description: Option<String>,

    /// Resolve forward references in every class once all are declared.
    #[serde(default)]
    pub rebuild_all: bool,
}

impl ProjectConfig {
    pub fn module(&self) -> &str {
        self.module.as_deref().unwrap_or(&self.name)
    }
}

fn default_bases() -> Vec<String> {
    vec!["BaseModel".to_string()]
}

/// `[classes.<Name>]`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassSpec {
    #[serde(default = "default_bases")]
    pub bases: Vec<String>,

    pub doc: Option<String>,

    pub module: Option<String>,

    /// Resolve forward references right after this class is declared.
    #[serde(default)]
    pub rebuild: bool,

    #[serde(default)]
    pub fields: IndexMap<String, FieldSpec>,
}

/// `[classes.<Name>.fields.<field>]`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    /// Annotation in Python typing syntax
    #[serde(rename = "type")]
    pub ty: toml::Spanned<String>,

    pub description: Option<String>,

    pub default: Option<toml::Value>,

    pub default_factory: Option<String>,

    /// TOML has no null, so a `None` default is spelled out
    #[serde(default)]
    pub default_none: bool,

    pub title: Option<String>,

    pub alias: Option<String>,
}
