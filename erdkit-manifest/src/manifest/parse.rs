//! Manifest parsing from files and strings.

use std::{ops::Range, path::Path, str::FromStr};

use erdkit_core::{ClassDecl, DefaultValue, FieldInfo, Namespace, Value};
use log::{debug, warn};
use miette::SourceSpan;

use super::{FieldSpec, Manifest, validate::ParseContext};
use crate::{Error, Result, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "erd.toml")
    }
}

impl Manifest {
    /// Parse an erd.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse an erd.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest and build its namespace.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let mut manifest: Manifest =
        toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;

    manifest.namespace = build_namespace(&manifest, content, filename)?;
    debug!(
        file = filename,
        classes = manifest.classes.len();
        "Loaded manifest"
    );
    Ok(manifest)
}

/// Declare every class of the manifest, in document order.
fn build_namespace(manifest: &Manifest, src: &str, filename: &str) -> Result<Namespace> {
    let ctx = ParseContext::new(src, filename);
    let source = ctx.source_context();

    if manifest.project.name.trim().is_empty() {
        return Err(source.validation_error("project name cannot be empty"));
    }

    let mut ns = Namespace::new();
    let classes_ctx = ctx.push("classes");

    for (class_name, spec) in &manifest.classes {
        classes_ctx.validate_name(class_name, "class")?;

        let module = spec
            .module
            .as_deref()
            .unwrap_or_else(|| manifest.project.module());
        let mut decl = ClassDecl::new(module, class_name.as_str());
        decl.bases = spec.bases.clone();
        decl.doc = spec.doc.clone();

        let fields_ctx = classes_ctx.push(class_name).push("fields");
        for (field_name, field) in &spec.fields {
            fields_ctx.validate_name(field_name, "field")?;
            if field_name.starts_with('_') {
                return Err(source.validation_error_at(
                    format!(
                        "field '{}' starts with an underscore and would be a private attribute",
                        field_name
                    ),
                    fields_ctx.find_span(field_name),
                ));
            }
            let info = field_info(field, field_name, &ns, &fields_ctx)?;
            decl = decl.field(field_name.as_str(), info);
        }

        let id = ns
            .declare(decl)
            .map_err(|e| source.object_error(e, classes_ctx.find_span(class_name)))?;

        if spec.rebuild {
            for unresolved in ns.resolve_forward_refs(id) {
                warn!(
                    class = class_name.as_str(),
                    field = unresolved.field.as_str(),
                    name = unresolved.name.as_str();
                    "Forward reference is still unresolved after rebuild"
                );
            }
        }
    }

    if manifest.project.rebuild_all {
        for unresolved in ns.resolve_all_forward_refs() {
            warn!(
                class = ns.class(unresolved.class).qualified_name().as_str(),
                field = unresolved.field.as_str(),
                name = unresolved.name.as_str();
                "Forward reference is still unresolved after rebuild"
            );
        }
    }

    Ok(ns)
}

/// Turn a field table into a descriptor, parsing its annotation against the
/// classes declared so far.
fn field_info(
    spec: &FieldSpec,
    name: &str,
    ns: &Namespace,
    ctx: &ParseContext<'_>,
) -> Result<FieldInfo> {
    let source = ctx.source_context();

    let declared: Vec<&str> = [
        ("default", spec.default.is_some()),
        ("default_factory", spec.default_factory.is_some()),
        ("default_none", spec.default_none),
    ]
    .into_iter()
    .filter_map(|(key, set)| set.then_some(key))
    .collect();
    if declared.len() > 1 {
        return Err(source.conflicting_defaults_error(name, &declared, ctx.find_span(name)));
    }

    let ty = spec.ty.get_ref();
    let annotation = ns.parse_type(ty).map_err(|e| {
        let span = type_error_span(ctx.src(), spec.ty.span(), ty, e.offset(), e.len());
        source.invalid_type_error(ty.as_str(), name, e, Some(span))
    })?;

    let mut info = FieldInfo::new(annotation);
    info.description = spec.description.clone();
    info.title = spec.title.clone();
    info.alias = spec.alias.clone();
    info.default = if let Some(value) = &spec.default {
        DefaultValue::Value(Value::from(value))
    } else if let Some(factory) = &spec.default_factory {
        DefaultValue::Factory(factory.clone())
    } else if spec.default_none {
        DefaultValue::Value(Value::None)
    } else {
        DefaultValue::Undefined
    };
    Ok(info)
}

/// Map a byte range of a parsed annotation back into the TOML source.
///
/// Exact when the literal is written without escapes. Otherwise the
/// offending text is searched for inside the literal, and failing that the
/// whole literal is labelled.
fn type_error_span(
    src: &str,
    literal: Range<usize>,
    value: &str,
    offset: usize,
    len: usize,
) -> SourceSpan {
    let whole = SourceSpan::from((literal.start, literal.len()));
    let Some(raw) = src.get(literal.clone()) else {
        return whole;
    };

    let delim = if raw.starts_with("\"\"\"") || raw.starts_with("'''") {
        3
    } else {
        1
    };
    let Some(inner) = raw.get(delim..raw.len().saturating_sub(delim)) else {
        return whole;
    };
    let inner_start = literal.start + delim;

    if inner == value {
        return SourceSpan::from((inner_start + offset, len));
    }

    let Some(needle) = value.get(offset..offset + len).filter(|n| !n.is_empty()) else {
        return whole;
    };
    let mut found = inner.match_indices(needle);
    match (found.next(), found.next()) {
        (Some((pos, _)), None) => SourceSpan::from((inner_start + pos, needle.len())),
        _ => whole,
    }
}
