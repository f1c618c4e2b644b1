use std::fmt;

use indexmap::IndexMap;

use super::{FieldRef, Namespace};
use crate::{FieldInfo, utils::cleandoc};

/// Index of a class inside its [`Namespace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub(crate) u32);

impl ClassId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Stored class definition. Accessed through [`ClassRef`].
#[derive(Debug, Clone)]
pub(crate) struct Class {
    pub(crate) module: String,
    pub(crate) name: String,
    pub(crate) bases: Vec<ClassId>,
    /// Includes the class itself first
    pub(crate) mro: Vec<ClassId>,
    pub(crate) doc: Option<String>,
    pub(crate) fields: IndexMap<String, FieldInfo>,
    pub(crate) builtin: bool,
}

/// A class declaration handed to [`Namespace::declare`].
///
/// # Example
///
/// ```ignore
/// let decl = ClassDecl::new("shop", "Order")
///     .base("BaseModel")
///     .doc("An order.")
///     .field("total", FieldInfo::new(ns.parse_type("float")?));
/// let id = ns.declare(decl)?;
/// ```
#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub module: String,
    pub name: String,
    /// Base class names, bare or qualified. Empty means `object`.
    pub bases: Vec<String>,
    pub doc: Option<String>,
    pub fields: Vec<(String, FieldInfo)>,
}

impl ClassDecl {
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
            bases: Vec::new(),
            doc: None,
            fields: Vec::new(),
        }
    }

    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.bases.push(base.into());
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, info: FieldInfo) -> Self {
        self.fields.push((name.into(), info));
        self
    }
}

/// Borrowed handle to a class in a [`Namespace`].
#[derive(Clone, Copy)]
pub struct ClassRef<'a> {
    pub(crate) ns: &'a Namespace,
    pub(crate) id: ClassId,
}

impl<'a> ClassRef<'a> {
    fn class(self) -> &'a Class {
        &self.ns.classes[self.id.index()]
    }

    pub fn id(self) -> ClassId {
        self.id
    }

    pub fn namespace(self) -> &'a Namespace {
        self.ns
    }

    pub fn name(self) -> &'a str {
        &self.class().name
    }

    pub fn module(self) -> &'a str {
        &self.class().module
    }

    /// `module.Name`
    pub fn qualified_name(self) -> String {
        format!("{}.{}", self.module(), self.name())
    }

    pub fn is_builtin(self) -> bool {
        self.class().builtin
    }

    /// The class's own docstring, as declared.
    pub fn doc(self) -> Option<&'a str> {
        self.class().doc.as_deref()
    }

    /// Cleaned docstring, falling back to the nearest declared ancestor.
    pub fn docstring(self) -> Option<String> {
        self.mro()
            .filter(|c| !c.is_builtin())
            .filter_map(|c| c.doc())
            .map(cleandoc)
            .find(|doc| !doc.is_empty())
    }

    pub fn bases(self) -> impl Iterator<Item = ClassRef<'a>> {
        let ns = self.ns;
        self.class()
            .bases
            .iter()
            .map(move |&id| ClassRef { ns, id })
    }

    /// Method resolution order, starting with the class itself.
    pub fn mro(self) -> impl Iterator<Item = ClassRef<'a>> {
        let ns = self.ns;
        self.class().mro.iter().map(move |&id| ClassRef { ns, id })
    }

    /// Whether `other` appears in this class's MRO (a class is its own subclass).
    pub fn is_subclass_of(self, other: ClassId) -> bool {
        self.class().mro.contains(&other)
    }

    /// Fields declared directly on this class, in declaration order.
    pub fn own_fields(self) -> impl Iterator<Item = (&'a str, FieldRef<'a>)> {
        let ns = self.ns;
        self.class()
            .fields
            .iter()
            .map(move |(name, info)| (name.as_str(), FieldRef::new(ns, info)))
    }

    /// All fields including inherited ones.
    ///
    /// Base-class fields come first; a redeclared field keeps the position of
    /// the declaration it overrides.
    pub fn model_fields(self) -> Vec<(&'a str, FieldRef<'a>)> {
        let mut fields: IndexMap<&'a str, FieldRef<'a>> = IndexMap::new();
        let mro: Vec<_> = self.mro().collect();
        for class in mro.into_iter().rev() {
            for (name, field) in class.own_fields() {
                fields.insert(name, field);
            }
        }
        fields.into_iter().collect()
    }

    /// Look up one of [`model_fields`](Self::model_fields) by name.
    pub fn field(self, name: &str) -> Option<FieldRef<'a>> {
        self.model_fields()
            .into_iter()
            .find_map(|(n, f)| (n == name).then_some(f))
    }

    /// `<class 'module.Name'>`, with the `builtins` module left out.
    pub fn repr(self) -> String {
        if self.module() == "builtins" {
            format!("<class '{}'>", self.name())
        } else {
            format!("<class '{}'>", self.qualified_name())
        }
    }
}

impl PartialEq for ClassRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.ns, other.ns) && self.id == other.id
    }
}

impl Eq for ClassRef<'_> {}

impl fmt::Debug for ClassRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClassRef")
            .field(&self.qualified_name())
            .finish()
    }
}
