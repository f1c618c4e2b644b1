//! Classes, field descriptors and the objects adapters are handed.

mod class;
mod mro;
mod namespace;

use std::fmt;

pub use class::{ClassDecl, ClassId, ClassRef};
pub(crate) use class::Class;
pub use namespace::{Namespace, UnresolvedRef};

use crate::{DefaultValue, FieldInfo, TypeExpr, Value, typing::UnionStyle, value::repr_str};

/// Borrowed field descriptor together with the namespace it belongs to.
#[derive(Clone, Copy)]
pub struct FieldRef<'a> {
    ns: &'a Namespace,
    info: &'a FieldInfo,
}

impl<'a> FieldRef<'a> {
    pub fn new(ns: &'a Namespace, info: &'a FieldInfo) -> Self {
        Self { ns, info }
    }

    pub fn info(self) -> &'a FieldInfo {
        self.info
    }

    pub fn namespace(self) -> &'a Namespace {
        self.ns
    }

    /// The declared annotation.
    pub fn annotation(self) -> TypeRef<'a> {
        TypeRef::new(self.ns, &self.info.annotation)
    }

    /// `FieldInfo(annotation=int, required=False, default=0)`
    pub fn repr(self) -> String {
        let info = self.info;
        let mut parts = vec![
            format!("annotation={}", info.annotation.display(self.ns)),
            format!("required={}", if info.is_required() { "True" } else { "False" }),
        ];
        match &info.default {
            DefaultValue::Undefined => {}
            DefaultValue::Value(v) => parts.push(format!("default={}", v.repr())),
            DefaultValue::Factory(name) => parts.push(format!("default_factory={}", name)),
        }
        if let Some(alias) = &info.alias {
            parts.push(format!("alias={}", repr_str(alias)));
        }
        if let Some(title) = &info.title {
            parts.push(format!("title={}", repr_str(title)));
        }
        if let Some(description) = &info.description {
            parts.push(format!("description={}", repr_str(description)));
        }
        format!("FieldInfo({})", parts.join(", "))
    }
}

impl fmt::Debug for FieldRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

/// Borrowed type expression together with the namespace it resolves in.
#[derive(Clone, Copy)]
pub struct TypeRef<'a> {
    ns: &'a Namespace,
    expr: &'a TypeExpr,
}

impl<'a> TypeRef<'a> {
    pub fn new(ns: &'a Namespace, expr: &'a TypeExpr) -> Self {
        Self { ns, expr }
    }

    pub fn expr(self) -> &'a TypeExpr {
        self.expr
    }

    pub fn namespace(self) -> &'a Namespace {
        self.ns
    }
}

impl fmt::Display for TypeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr.display(self.ns))
    }
}

impl fmt::Debug for TypeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeRef({})", self)
    }
}

/// Anything that can be handed to an adapter constructor.
///
/// Adapters validate the kind of object they receive, so a caller may pass a
/// value, a type expression or an arbitrary class where a model is expected.
#[derive(Debug, Clone, Copy)]
pub enum Object<'a> {
    Class(ClassRef<'a>),
    FieldInfo(FieldRef<'a>),
    Type(TypeRef<'a>),
    Value(&'a Value),
}

impl<'a> Object<'a> {
    /// Python-style repr of the object.
    pub fn repr(&self) -> String {
        match self {
            Object::Class(class) => class.repr(),
            Object::FieldInfo(field) => field.repr(),
            Object::Type(ty) => ty.to_string(),
            Object::Value(value) => value.repr(),
        }
    }

    /// Repr of the object's type, e.g. `<class 'int'>` for `3`.
    pub fn type_repr(&self) -> String {
        match self {
            Object::Class(_) => "<class 'type'>".to_string(),
            Object::FieldInfo(_) => "<class 'pydantic.fields.FieldInfo'>".to_string(),
            Object::Type(ty) => match ty.expr() {
                TypeExpr::Class(_) => "<class 'type'>".to_string(),
                TypeExpr::None => "<class 'NoneType'>".to_string(),
                TypeExpr::Union {
                    style: UnionStyle::Pipe,
                    ..
                } => "<class 'types.UnionType'>".to_string(),
                TypeExpr::Generic { spelling, .. }
                    if spelling.starts_with(|c: char| c.is_ascii_lowercase()) =>
                {
                    "<class 'types.GenericAlias'>".to_string()
                }
                _ => "<class 'typing._GenericAlias'>".to_string(),
            },
            Object::Value(value) => format!("<class '{}'>", value.type_name()),
        }
    }

    pub fn as_class(&self) -> Option<ClassRef<'a>> {
        match self {
            Object::Class(class) => Some(*class),
            Object::Type(ty) => match ty.expr() {
                TypeExpr::Class(id) => Some(ty.namespace().class(*id)),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn as_field_info(&self) -> Option<FieldRef<'a>> {
        match self {
            Object::FieldInfo(field) => Some(*field),
            _ => None,
        }
    }
}

impl<'a> From<ClassRef<'a>> for Object<'a> {
    fn from(class: ClassRef<'a>) -> Self {
        Object::Class(class)
    }
}

impl<'a> From<FieldRef<'a>> for Object<'a> {
    fn from(field: FieldRef<'a>) -> Self {
        Object::FieldInfo(field)
    }
}

impl<'a> From<TypeRef<'a>> for Object<'a> {
    fn from(ty: TypeRef<'a>) -> Self {
        Object::Type(ty)
    }
}

impl<'a> From<&'a Value> for Object<'a> {
    fn from(value: &'a Value) -> Self {
        Object::Value(value)
    }
}
