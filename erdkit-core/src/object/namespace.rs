use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, trace};

use super::{Class, ClassDecl, ClassId, ClassRef, mro};
use crate::{ObjectError, TypeExpr, TypeParseError, typing::parse_type};

/// Classes every namespace starts with: `(module, name, bases)`.
const BUILTINS: &[(&str, &str, &[&str])] = &[
    ("builtins", "object", &[]),
    ("builtins", "NoneType", &["object"]),
    ("builtins", "int", &["object"]),
    ("builtins", "float", &["object"]),
    ("builtins", "complex", &["object"]),
    ("builtins", "str", &["object"]),
    ("builtins", "bytes", &["object"]),
    ("builtins", "bool", &["int"]),
    ("datetime", "date", &["object"]),
    ("datetime", "datetime", &["date"]),
    ("datetime", "time", &["object"]),
    ("datetime", "timedelta", &["object"]),
    ("decimal", "Decimal", &["object"]),
    ("uuid", "UUID", &["object"]),
    ("pathlib", "Path", &["object"]),
    ("pydantic", "BaseModel", &["object"]),
];

/// A forward reference that could not be resolved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedRef {
    pub class: ClassId,
    pub field: String,
    pub name: String,
}

/// Arena of class definitions.
///
/// Classes are looked up by qualified name (`shop.Order`) or bare name
/// (`Order`); a later declaration shadows an earlier bare name.
#[derive(Debug, Clone)]
pub struct Namespace {
    pub(crate) classes: Vec<Class>,
    qualified: HashMap<String, ClassId>,
    names: HashMap<String, ClassId>,
    object: ClassId,
    base_model: ClassId,
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new()
    }
}

impl Namespace {
    /// Create a namespace holding only the builtin classes.
    pub fn new() -> Self {
        let mut ns = Self {
            classes: Vec::with_capacity(BUILTINS.len()),
            qualified: HashMap::new(),
            names: HashMap::new(),
            object: ClassId(0),
            base_model: ClassId(0),
        };

        for (module, name, bases) in BUILTINS {
            let id = ClassId(ns.classes.len() as u32);
            let bases: Vec<ClassId> = bases.iter().map(|b| ns.names[*b]).collect();
            let mut mro = vec![id];
            if let Some(first) = bases.first() {
                mro.extend_from_slice(&ns.classes[first.index()].mro);
            }
            ns.classes.push(Class {
                module: module.to_string(),
                name: name.to_string(),
                bases,
                mro,
                doc: None,
                fields: IndexMap::new(),
                builtin: true,
            });
            ns.qualified.insert(format!("{}.{}", module, name), id);
            ns.names.insert(name.to_string(), id);
        }

        ns.object = ns.names["object"];
        ns.base_model = ns.names["BaseModel"];
        ns
    }

    /// Handle for a class id issued by this namespace.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by another namespace and is out of range
    /// here. Use [`try_class`](Self::try_class) for ids of unknown origin.
    pub fn class(&self, id: ClassId) -> ClassRef<'_> {
        self.try_class(id)
            .unwrap_or_else(|| panic!("class id {} is not in this namespace", id.index()))
    }

    /// Handle for `id`, or `None` if this namespace never issued it.
    pub fn try_class(&self, id: ClassId) -> Option<ClassRef<'_>> {
        (id.index() < self.classes.len()).then_some(ClassRef { ns: self, id })
    }

    /// Look up a class by qualified or bare name.
    pub fn get(&self, name: &str) -> Option<ClassRef<'_>> {
        self.qualified
            .get(name)
            .or_else(|| self.names.get(name))
            .map(|&id| ClassRef { ns: self, id })
    }

    /// `builtins.object`
    pub fn object(&self) -> ClassRef<'_> {
        self.class(self.object)
    }

    /// `pydantic.BaseModel`
    pub fn base_model(&self) -> ClassRef<'_> {
        self.class(self.base_model)
    }

    /// Every class, builtins first, then in declaration order.
    pub fn classes(&self) -> impl Iterator<Item = ClassRef<'_>> {
        (0..self.classes.len()).map(move |i| ClassRef {
            ns: self,
            id: ClassId(i as u32),
        })
    }

    /// Declared (non-builtin) classes in declaration order.
    pub fn declared(&self) -> impl Iterator<Item = ClassRef<'_>> {
        self.classes().filter(|c| !c.is_builtin())
    }

    /// Parse an annotation against the classes declared so far.
    pub fn parse_type(&self, src: &str) -> Result<TypeExpr, TypeParseError> {
        parse_type(src, |name| self.get(name).map(|c| c.id()))
    }

    /// Declare a new class.
    pub fn declare(&mut self, decl: ClassDecl) -> Result<ClassId, ObjectError> {
        let qualname = format!("{}.{}", decl.module, decl.name);
        if self.qualified.contains_key(&qualname) {
            return Err(ObjectError::DuplicateClass { qualname });
        }

        let mut bases = Vec::with_capacity(decl.bases.len().max(1));
        for base in &decl.bases {
            let id = self
                .get(base)
                .map(|c| c.id())
                .ok_or_else(|| ObjectError::UnknownBase {
                    class: qualname.clone(),
                    base: base.clone(),
                })?;
            if bases.contains(&id) {
                return Err(ObjectError::DuplicateBase {
                    class: qualname,
                    base: base.clone(),
                });
            }
            bases.push(id);
        }
        if bases.is_empty() {
            bases.push(self.object);
        }

        let id = ClassId(self.classes.len() as u32);
        let mro = mro::linearize(id, &bases, |b| self.classes[b.index()].mro.as_slice())
            .ok_or_else(|| ObjectError::InconsistentMro {
                class: qualname.clone(),
            })?;

        let mut fields = IndexMap::with_capacity(decl.fields.len());
        for (name, info) in decl.fields {
            if fields.contains_key(&name) {
                return Err(ObjectError::DuplicateField {
                    class: qualname,
                    field: name,
                });
            }
            fields.insert(name, info);
        }

        debug!(class = qualname.as_str(), fields = fields.len(); "Declared class");

        self.classes.push(Class {
            module: decl.module,
            name: decl.name.clone(),
            bases,
            mro,
            doc: decl.doc,
            fields,
            builtin: false,
        });
        self.qualified.insert(qualname, id);
        self.names.insert(decl.name, id);
        Ok(id)
    }

    /// Replace forward references in a class's fields with the classes they
    /// name, now that those may be declared.
    ///
    /// Returns the references that still cannot be resolved.
    pub fn resolve_forward_refs(&mut self, id: ClassId) -> Vec<UnresolvedRef> {
        let annotations: Vec<(String, TypeExpr)> = self.classes[id.index()]
            .fields
            .iter()
            .map(|(name, info)| (name.clone(), info.annotation.clone()))
            .collect();

        let mut unresolved = Vec::new();
        let mut rewritten = Vec::with_capacity(annotations.len());
        for (field, annotation) in annotations {
            let annotation = annotation.map(&mut |expr| match expr {
                TypeExpr::ForwardRef(name) => match self.parse_type(&name) {
                    Ok(resolved) => {
                        trace!(field = field.as_str(), name = name.as_str(); "Resolved forward reference");
                        resolved
                    }
                    Err(_) => {
                        unresolved.push(UnresolvedRef {
                            class: id,
                            field: field.clone(),
                            name: name.clone(),
                        });
                        TypeExpr::ForwardRef(name)
                    }
                },
                other => other,
            });
            rewritten.push((field, annotation));
        }

        let class = &mut self.classes[id.index()];
        for (field, annotation) in rewritten {
            if let Some(info) = class.fields.get_mut(&field) {
                info.annotation = annotation;
            }
        }

        debug!(class = self.class(id).qualified_name().as_str(), unresolved = unresolved.len(); "Resolved forward references");
        unresolved
    }

    /// [`resolve_forward_refs`](Self::resolve_forward_refs) for every declared class.
    pub fn resolve_all_forward_refs(&mut self) -> Vec<UnresolvedRef> {
        let ids: Vec<ClassId> = self.declared().map(|c| c.id()).collect();
        ids.into_iter()
            .flat_map(|id| self.resolve_forward_refs(id))
            .collect()
    }
}
