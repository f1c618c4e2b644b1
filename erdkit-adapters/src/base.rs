//! The uniform model/field contract every framework adapter implements.

use erdkit_core::{ClassRef, Namespace, TypeExpr};

/// A framework-native field, normalized.
pub trait Field<'ns> {
    /// The field's identifier on its model.
    fn name(&self) -> &str;

    /// The declared type expression. May contain unresolved forward references.
    fn type_obj(&self) -> &'ns TypeExpr;

    /// Namespace the type expression resolves in.
    fn namespace(&self) -> &'ns Namespace;

    /// Whether the field holds a collection of values.
    fn is_many(&self) -> bool;

    /// Whether the field's type admits `None`.
    fn is_nullable(&self) -> bool;

    /// Display form of [`type_obj`](Self::type_obj).
    fn type_name(&self) -> String {
        self.type_obj().display(self.namespace()).to_string()
    }
}

/// A framework-native model class, normalized.
pub trait Model<'ns> {
    type Field: Field<'ns>;

    /// The wrapped model class.
    fn model(&self) -> ClassRef<'ns>;

    /// Fields in declaration order. Recreated on every call.
    fn fields(&self) -> Vec<Self::Field>;

    fn name(&self) -> &'ns str {
        self.model().name()
    }

    /// Unique key of the model, `module.Name`.
    fn key(&self) -> String {
        self.model().qualified_name()
    }

    fn docstring(&self) -> String {
        base_docstring(self.model())
    }

    /// Instructions for resolving an unevaluated forward reference, if the
    /// framework has any.
    fn forward_ref_help(&self) -> Option<&'static str> {
        None
    }
}

/// `module.Name`, followed by the cleaned class docstring when there is one.
pub fn base_docstring(model: ClassRef<'_>) -> String {
    let mut out = model.qualified_name();
    if let Some(doc) = model.docstring() {
        out.push_str("\n\n");
        out.push_str(&doc);
        out.push('\n');
    }
    out
}
