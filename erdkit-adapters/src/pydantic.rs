//! Adapters for Pydantic-style models.
//!
//! A model is any class deriving from the builtin `pydantic.BaseModel`; its
//! fields are the [`FieldInfo`] descriptors declared along its MRO.

use erdkit_core::{
    ClassRef, DefaultValue, FieldInfo, FieldRef, Namespace, Object, TypeExpr, is_many,
    is_nullable, repr_type_with_mro,
};
use log::trace;

use crate::{
    InvalidFieldError, InvalidModelError,
    base::{Field, Model, base_docstring},
    docstring::format_attribute_line,
};

/// How to resolve a forward reference left in a Pydantic field annotation.
pub const FORWARD_REF_HELP: &str = "Set 'rebuild = true' on the model in erd.toml, or call \
     'Namespace::resolve_forward_refs' once the referenced model is declared.";

/// Field adapter for a Pydantic [`FieldInfo`].
#[derive(Debug, Clone, Copy)]
pub struct PydanticField<'ns> {
    name: &'ns str,
    field: FieldRef<'ns>,
}

impl<'ns> PydanticField<'ns> {
    /// Wrap `field_info`, which must be a field descriptor.
    pub fn new(name: &'ns str, field_info: Object<'ns>) -> Result<Self, InvalidFieldError> {
        let field = field_info.as_field_info().ok_or_else(|| {
            InvalidFieldError::new(format!(
                "field_info must be of type pydantic.fields.FieldInfo. Got: {}",
                field_info.type_repr()
            ))
        })?;
        Ok(Self { name, field })
    }

    /// The wrapped descriptor.
    pub fn field(&self) -> &'ns FieldInfo {
        self.field.info()
    }

    pub fn description(&self) -> Option<&'ns str> {
        self.field().description.as_deref()
    }

    pub fn default(&self) -> &'ns DefaultValue {
        &self.field().default
    }
}

impl<'ns> Field<'ns> for PydanticField<'ns> {
    fn name(&self) -> &str {
        self.name
    }

    fn type_obj(&self) -> &'ns TypeExpr {
        &self.field().annotation
    }

    fn namespace(&self) -> &'ns Namespace {
        self.field.namespace()
    }

    fn is_many(&self) -> bool {
        is_many(self.type_obj())
    }

    fn is_nullable(&self) -> bool {
        is_nullable(self.type_obj())
    }
}

/// Model adapter for a Pydantic `BaseModel` subclass.
#[derive(Debug, Clone, Copy)]
pub struct PydanticModel<'ns> {
    model: ClassRef<'ns>,
}

impl<'ns> PydanticModel<'ns> {
    pub fn new(model: Object<'ns>) -> Result<Self, InvalidModelError> {
        let class = match model.as_class() {
            Some(class) if Self::is_model_type(&model) => class,
            _ => {
                return Err(InvalidModelError::new(format!(
                    "Argument model must be a subclass of pydantic.BaseModel. Got {}",
                    repr_type_with_mro(&model)
                )));
            }
        };
        trace!(model = class.qualified_name().as_str(); "Adapted pydantic model");
        Ok(Self { model: class })
    }

    /// Whether `obj` is a class deriving from `pydantic.BaseModel`.
    ///
    /// The base is compared by identity, so a declared class that merely
    /// shares its name does not count.
    pub fn is_model_type(obj: &Object<'_>) -> bool {
        obj.as_class().is_some_and(|class| {
            let base = class.namespace().base_model();
            class.is_subclass_of(base.id())
        })
    }

    /// `(field, forward reference)` pairs still waiting to be resolved.
    pub fn unresolved_forward_refs(&self) -> Vec<(&'ns str, &'ns str)> {
        self.fields()
            .into_iter()
            .flat_map(|field| {
                let name = field.name;
                field
                    .type_obj()
                    .forward_refs()
                    .into_iter()
                    .map(move |r| (name, r))
            })
            .collect()
    }
}

impl<'ns> Model<'ns> for PydanticModel<'ns> {
    type Field = PydanticField<'ns>;

    fn model(&self) -> ClassRef<'ns> {
        self.model
    }

    fn fields(&self) -> Vec<PydanticField<'ns>> {
        self.model
            .model_fields()
            .into_iter()
            .map(|(name, field)| PydanticField { name, field })
            .collect()
    }

    /// The class docstring, followed by an `Attributes:` block built from
    /// field descriptions when any field has one.
    fn docstring(&self) -> String {
        let mut out = base_docstring(self.model);

        let fields = self.fields();
        let described: Vec<_> = fields
            .iter()
            .filter_map(|f| {
                f.description()
                    .filter(|d| !d.trim().is_empty())
                    .map(|d| (f, d))
            })
            .collect();
        if described.is_empty() {
            return out;
        }

        out.push_str("\nAttributes:\n");
        for (field, description) in described {
            out.push_str("    ");
            out.push_str(&format_attribute_line(
                field.name,
                &field.type_name(),
                description,
                field.default(),
            ));
            out.push('\n');
        }
        out
    }

    fn forward_ref_help(&self) -> Option<&'static str> {
        Some(FORWARD_REF_HELP)
    }
}

#[cfg(test)]
mod tests {
    use erdkit_core::{ClassDecl, TypeRef, Value};

    use super::*;

    fn field(ns: &Namespace, ty: &str) -> FieldInfo {
        FieldInfo::new(ns.parse_type(ty).unwrap())
    }

    #[test]
    fn test_is_model_type_never_fails() {
        let mut ns = Namespace::new();
        let model = ns
            .declare(ClassDecl::new("m", "User").base("BaseModel"))
            .unwrap();
        let plain = ns.declare(ClassDecl::new("m", "Plain")).unwrap();
        let fake = ns.declare(ClassDecl::new("pydantic", "Fake")).unwrap();
        let int = ns.parse_type("int").unwrap();
        let list = ns.parse_type("List[int]").unwrap();
        let info = field(&ns, "int");
        let value = Value::Int(1);

        assert!(PydanticModel::is_model_type(&ns.class(model).into()));
        assert!(PydanticModel::is_model_type(&ns.base_model().into()));

        assert!(!PydanticModel::is_model_type(&ns.class(plain).into()));
        assert!(!PydanticModel::is_model_type(&ns.class(fake).into()));
        assert!(!PydanticModel::is_model_type(&TypeRef::new(&ns, &int).into()));
        assert!(!PydanticModel::is_model_type(&TypeRef::new(&ns, &list).into()));
        assert!(!PydanticModel::is_model_type(&FieldRef::new(&ns, &info).into()));
        assert!(!PydanticModel::is_model_type(&(&value).into()));
    }

    #[test]
    fn test_model_from_bare_class_type() {
        let mut ns = Namespace::new();
        let id = ns
            .declare(ClassDecl::new("m", "User").base("BaseModel"))
            .unwrap();
        let expr = TypeExpr::Class(id);
        let model = PydanticModel::new(TypeRef::new(&ns, &expr).into()).unwrap();
        assert_eq!(model.key(), "m.User");
    }

    #[test]
    fn test_invalid_model_message() {
        let mut ns = Namespace::new();
        let plain = ns.declare(ClassDecl::new("m", "Plain")).unwrap();

        let err = PydanticModel::new(ns.class(plain).into()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Argument model must be a subclass of pydantic.BaseModel. \
             Got <class 'm.Plain'> <mro (<class 'm.Plain'>, <class 'object'>)>"
        );

        let value = Value::Str("User".into());
        let err = PydanticModel::new((&value).into()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Argument model must be a subclass of pydantic.BaseModel. Got 'User' <no mro>"
        );
    }

    #[test]
    fn test_field_construction() {
        let ns = Namespace::new();
        let info = field(&ns, "Optional[List[int]]");

        let adapted = PydanticField::new("scores", FieldRef::new(&ns, &info).into()).unwrap();
        assert_eq!(adapted.name(), "scores");
        assert!(adapted.is_many());
        assert!(adapted.is_nullable());
        assert_eq!(adapted.type_name(), "Optional[List[int]]");
        assert_eq!(adapted.field(), &info);

        let value = Value::Int(3);
        let err = PydanticField::new("scores", (&value).into()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "field_info must be of type pydantic.fields.FieldInfo. Got: <class 'int'>"
        );
        let err = PydanticField::new("scores", ns.base_model().into()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "field_info must be of type pydantic.fields.FieldInfo. Got: <class 'type'>"
        );
    }

    #[test]
    fn test_docstring_with_unicode_indent() {
        let mut ns = Namespace::new();
        let id = ns
            .declare(
                ClassDecl::new("m", "Note")
                    .base("BaseModel")
                    .doc("Summary.\n x\n\u{a0}y"),
            )
            .unwrap();

        let model = PydanticModel::new(ns.class(id).into()).unwrap();
        assert_eq!(model.docstring(), "m.Note\n\nSummary.\nx\ny\n");
    }

    #[test]
    fn test_unresolved_forward_refs() {
        let mut ns = Namespace::new();
        let id = ns
            .declare(
                ClassDecl::new("tree", "Node")
                    .base("BaseModel")
                    .field("value", field(&ns, "int"))
                    .field("children", field(&ns, "List['Node']")),
            )
            .unwrap();

        let model = PydanticModel::new(ns.class(id).into()).unwrap();
        assert_eq!(model.unresolved_forward_refs(), vec![("children", "Node")]);
        assert_eq!(model.forward_ref_help(), Some(FORWARD_REF_HELP));

        ns.resolve_forward_refs(id);
        let model = PydanticModel::new(ns.class(id).into()).unwrap();
        assert!(model.unresolved_forward_refs().is_empty());
    }
}
