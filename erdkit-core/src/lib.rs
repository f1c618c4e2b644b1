//! Object model and type classification for erdkit.
//!
//! Models are described by an explicit [`Namespace`] of classes rather than
//! by runtime reflection. Each class carries its bases, a C3 method
//! resolution order, an optional docstring, and the [`FieldInfo`]
//! descriptors it declares. Annotations are parsed from Python typing
//! syntax into [`TypeExpr`] trees, which the [`typing`] module classifies.

mod error;
mod field_info;
mod object;
pub mod typing;
mod utils;
mod value;

pub use error::{ObjectError, TypeParseError};
pub use field_info::{DefaultValue, FieldInfo};
pub use object::{
    ClassDecl, ClassId, ClassRef, FieldRef, Namespace, Object, TypeRef, UnresolvedRef,
};
pub use typing::{
    Origin, TypeExpr, UnionStyle, is_many, is_nullable, parse_type, repr_type_with_mro,
};
pub use utils::cleandoc;
pub use value::Value;
