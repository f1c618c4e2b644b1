use super::TypeExpr;
use crate::Object;

/// Whether the type denotes a collection of elements rather than a single value.
///
/// One level of `Optional` is unwrapped first, so `Optional[List[T]]` is still
/// many. A union with several non-None alternatives is not.
///
/// A bare collection class (`list`, `dict`) also counts as many, unlike
/// erdantic where an unparameterized builtin has no origin.
pub fn is_many(tp: &TypeExpr) -> bool {
    match unwrap_optional(tp.strip_annotated()).strip_annotated() {
        TypeExpr::Generic { origin, .. } => origin.is_collection(),
        _ => false,
    }
}

/// Whether `None` is one of the top-level alternatives of the type.
pub fn is_nullable(tp: &TypeExpr) -> bool {
    match tp.strip_annotated() {
        TypeExpr::None => true,
        TypeExpr::Union { args, .. } => args
            .iter()
            .any(|arg| matches!(arg.strip_annotated(), TypeExpr::None)),
        _ => false,
    }
}

/// `Optional[T]` (in any spelling) becomes `T`; everything else is returned as-is.
fn unwrap_optional(tp: &TypeExpr) -> &TypeExpr {
    if let TypeExpr::Union { args, .. } = tp {
        let mut non_none = args
            .iter()
            .filter(|arg| !matches!(arg.strip_annotated(), TypeExpr::None));
        if let (Some(inner), None) = (non_none.next(), non_none.next()) {
            return inner;
        }
    }
    tp
}

/// Render an object with its full ancestry, for "wrong kind of object" errors.
///
/// Classes render as `<class 'mod.Name'> <mro (<class 'mod.Name'>, ...)>`;
/// anything without an MRO renders as its repr followed by `<no mro>`.
pub fn repr_type_with_mro(obj: &Object<'_>) -> String {
    match obj.as_class() {
        Some(class) => {
            let mro: Vec<String> = class.mro().map(|c| c.repr()).collect();
            format!("{} <mro ({})>", class.repr(), mro.join(", "))
        }
        None => format!("{} <no mro>", obj.repr()),
    }
}
