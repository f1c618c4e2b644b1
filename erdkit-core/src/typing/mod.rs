//! Type expressions and the structural classifier.
//!
//! A [`TypeExpr`] is the parsed form of a field annotation such as
//! `Optional[List['Node']]`. Multiplicity and nullability are derived from
//! the expression's shape alone, see [`is_many`] and [`is_nullable`].

mod classify;
mod parse;

use std::fmt;

pub use classify::{is_many, is_nullable, repr_type_with_mro};
pub use parse::parse_type;

use crate::{ClassId, Namespace, Value};

/// Generic origins understood by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    List,
    Set,
    FrozenSet,
    Tuple,
    Dict,
    Deque,
    Sequence,
    MutableSequence,
    AbstractSet,
    MutableSet,
    Mapping,
    MutableMapping,
    Iterable,
    Collection,
    Container,
    Type,
}

impl Origin {
    /// Look up an origin by the name used in an annotation.
    ///
    /// Module prefixes (`typing.`, `collections.abc.`) must already be stripped.
    pub fn from_name(name: &str) -> Option<Self> {
        let origin = match name {
            "list" | "List" => Origin::List,
            "set" | "Set" => Origin::Set,
            "frozenset" | "FrozenSet" => Origin::FrozenSet,
            "tuple" | "Tuple" => Origin::Tuple,
            "dict" | "Dict" => Origin::Dict,
            "deque" | "Deque" => Origin::Deque,
            "Sequence" => Origin::Sequence,
            "MutableSequence" => Origin::MutableSequence,
            "AbstractSet" => Origin::AbstractSet,
            "MutableSet" => Origin::MutableSet,
            "Mapping" => Origin::Mapping,
            "MutableMapping" => Origin::MutableMapping,
            "Iterable" => Origin::Iterable,
            "Collection" => Origin::Collection,
            "Container" => Origin::Container,
            "type" | "Type" => Origin::Type,
            _ => return None,
        };
        Some(origin)
    }

    /// Whether values of this origin hold many elements.
    pub fn is_collection(self) -> bool {
        !matches!(self, Origin::Type)
    }
}

/// How a union was spelled, kept so it renders the way it was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnionStyle {
    /// `Optional[T]`
    Optional,
    /// `Union[A, B]`
    Union,
    /// `A | B`
    Pipe,
}

/// A parsed type annotation.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    Any,
    None,
    /// `...` inside `Tuple[int, ...]`
    Ellipsis,
    Class(ClassId),
    Generic {
        origin: Origin,
        /// Name as written, without module prefix (`List` or `list`)
        spelling: String,
        args: Vec<TypeExpr>,
    },
    Union {
        style: UnionStyle,
        args: Vec<TypeExpr>,
    },
    Annotated {
        inner: Box<TypeExpr>,
        metadata: Vec<String>,
    },
    Literal(Vec<Value>),
    /// A quoted name that has not been resolved to a class yet
    ForwardRef(String),
}

impl TypeExpr {
    /// Build a union, flattening nested unions and dropping duplicates.
    ///
    /// A union of a single alternative collapses to that alternative.
    pub fn union(style: UnionStyle, args: impl IntoIterator<Item = TypeExpr>) -> TypeExpr {
        let mut flat: Vec<TypeExpr> = Vec::new();
        let mut nested_alternatives = false;
        for arg in args {
            match arg {
                TypeExpr::Union { args: inner, .. } => {
                    nested_alternatives = true;
                    for a in inner {
                        if !flat.contains(&a) {
                            flat.push(a);
                        }
                    }
                }
                other => {
                    if !flat.contains(&other) {
                        flat.push(other);
                    }
                }
            }
        }

        if flat.len() == 1 {
            return flat.remove(0);
        }

        // Optional[Union[A, B]] has more than one non-None alternative
        let style = if style == UnionStyle::Optional && nested_alternatives {
            let non_none = flat.iter().filter(|a| **a != TypeExpr::None).count();
            if non_none > 1 {
                UnionStyle::Union
            } else {
                style
            }
        } else {
            style
        };

        TypeExpr::Union { style, args: flat }
    }

    /// Wrap in `Optional[...]`.
    pub fn optional(inner: TypeExpr) -> TypeExpr {
        TypeExpr::union(UnionStyle::Optional, [inner, TypeExpr::None])
    }

    /// Shorthand for a parameterized collection, spelled like `typing`.
    pub fn generic(origin: Origin, args: impl IntoIterator<Item = TypeExpr>) -> TypeExpr {
        let spelling = match origin {
            Origin::List => "List",
            Origin::Set => "Set",
            Origin::FrozenSet => "FrozenSet",
            Origin::Tuple => "Tuple",
            Origin::Dict => "Dict",
            Origin::Deque => "Deque",
            Origin::Sequence => "Sequence",
            Origin::MutableSequence => "MutableSequence",
            Origin::AbstractSet => "AbstractSet",
            Origin::MutableSet => "MutableSet",
            Origin::Mapping => "Mapping",
            Origin::MutableMapping => "MutableMapping",
            Origin::Iterable => "Iterable",
            Origin::Collection => "Collection",
            Origin::Container => "Container",
            Origin::Type => "Type",
        };
        TypeExpr::Generic {
            origin,
            spelling: spelling.to_string(),
            args: args.into_iter().collect(),
        }
    }

    /// The expression with any `Annotated[...]` wrapper removed.
    pub fn strip_annotated(&self) -> &TypeExpr {
        match self {
            TypeExpr::Annotated { inner, .. } => inner.strip_annotated(),
            other => other,
        }
    }

    /// Every concrete class reachable through arguments and alternatives,
    /// in first-occurrence order.
    pub fn referenced_classes(&self) -> Vec<ClassId> {
        let mut out = Vec::new();
        self.walk(&mut |expr| {
            if let TypeExpr::Class(id) = expr {
                if !out.contains(id) {
                    out.push(*id);
                }
            }
        });
        out
    }

    /// Names of all forward references that are still unresolved.
    pub fn forward_refs(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.walk(&mut |expr| {
            if let TypeExpr::ForwardRef(name) = expr {
                out.push(name.as_str());
            }
        });
        out
    }

    fn walk<'a>(&'a self, f: &mut impl FnMut(&'a TypeExpr)) {
        f(self);
        match self {
            TypeExpr::Generic { args, .. } | TypeExpr::Union { args, .. } => {
                for arg in args {
                    arg.walk(f);
                }
            }
            TypeExpr::Annotated { inner, .. } => inner.walk(f),
            _ => {}
        }
    }

    /// Rewrite every node bottom-up.
    pub(crate) fn map(self, f: &mut impl FnMut(TypeExpr) -> TypeExpr) -> TypeExpr {
        let mapped = match self {
            TypeExpr::Generic {
                origin,
                spelling,
                args,
            } => TypeExpr::Generic {
                origin,
                spelling,
                args: args.into_iter().map(|a| a.map(&mut *f)).collect(),
            },
            TypeExpr::Union { style, args } => {
                TypeExpr::union(style, args.into_iter().map(|a| a.map(&mut *f)).collect::<Vec<_>>())
            }
            TypeExpr::Annotated { inner, metadata } => TypeExpr::Annotated {
                inner: Box::new(inner.map(&mut *f)),
                metadata,
            },
            other => other,
        };
        f(mapped)
    }

    /// Human-readable rendering, resolving class names through `ns`.
    pub fn display<'a>(&'a self, ns: &'a Namespace) -> TypeDisplay<'a> {
        TypeDisplay { expr: self, ns }
    }
}

/// Display adapter returned by [`TypeExpr::display`].
pub struct TypeDisplay<'a> {
    expr: &'a TypeExpr,
    ns: &'a Namespace,
}

impl TypeDisplay<'_> {
    fn child<'b>(&'b self, expr: &'b TypeExpr) -> TypeDisplay<'b> {
        TypeDisplay { expr, ns: self.ns }
    }

    fn write_list(&self, f: &mut fmt::Formatter<'_>, args: &[TypeExpr], sep: &str) -> fmt::Result {
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                f.write_str(sep)?;
            }
            write!(f, "{}", self.child(arg))?;
        }
        Ok(())
    }
}

impl fmt::Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.expr {
            TypeExpr::Any => f.write_str("Any"),
            TypeExpr::None => f.write_str("None"),
            TypeExpr::Ellipsis => f.write_str("..."),
            TypeExpr::Class(id) => f.write_str(self.ns.class(*id).name()),
            TypeExpr::Generic { spelling, args, .. } => {
                f.write_str(spelling)?;
                if !args.is_empty() {
                    f.write_str("[")?;
                    self.write_list(f, args, ", ")?;
                    f.write_str("]")?;
                }
                Ok(())
            }
            TypeExpr::Union { style, args } => match style {
                UnionStyle::Optional => {
                    let inner: Vec<TypeExpr> = args
                        .iter()
                        .filter(|a| **a != TypeExpr::None)
                        .cloned()
                        .collect();
                    f.write_str("Optional[")?;
                    self.write_list(f, &inner, ", ")?;
                    f.write_str("]")
                }
                UnionStyle::Union => {
                    f.write_str("Union[")?;
                    self.write_list(f, args, ", ")?;
                    f.write_str("]")
                }
                UnionStyle::Pipe => self.write_list(f, args, " | "),
            },
            TypeExpr::Annotated { inner, metadata } => {
                write!(f, "Annotated[{}", self.child(inner))?;
                for m in metadata {
                    write!(f, ", {}", m)?;
                }
                f.write_str("]")
            }
            TypeExpr::Literal(values) => {
                let values: Vec<_> = values.iter().map(Value::repr).collect();
                write!(f, "Literal[{}]", values.join(", "))
            }
            TypeExpr::ForwardRef(name) => write!(f, "ForwardRef('{}')", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(src: &str) -> String {
        let ns = Namespace::new();
        let expr = ns.parse_type(src).unwrap();
        expr.display(&ns).to_string()
    }

    #[test]
    fn test_display_keeps_spelling() {
        assert_eq!(render("int"), "int");
        assert_eq!(render("List[int]"), "List[int]");
        assert_eq!(render("list[int]"), "list[int]");
        assert_eq!(render("typing.List[str]"), "List[str]");
        assert_eq!(render("Dict[str, float]"), "Dict[str, float]");
        assert_eq!(render("Tuple[int, ...]"), "Tuple[int, ...]");
        assert_eq!(render("list"), "list");
    }

    #[test]
    fn test_display_unions() {
        assert_eq!(render("Optional[int]"), "Optional[int]");
        assert_eq!(render("Union[int, str]"), "Union[int, str]");
        assert_eq!(render("int | None"), "int | None");
        assert_eq!(render("Optional[Union[int, str]]"), "Union[int, str, None]");
    }

    #[test]
    fn test_display_special_forms() {
        assert_eq!(render("Literal['a', 1]"), "Literal['a', 1]");
        assert_eq!(render("Annotated[int, Gt(0)]"), "Annotated[int, Gt(0)]");
        assert_eq!(render("List['Node']"), "List[ForwardRef('Node')]");
        assert_eq!(render("Any"), "Any");
    }

    #[test]
    fn test_union_flattening() {
        let expr = TypeExpr::union(
            UnionStyle::Union,
            [
                TypeExpr::Any,
                TypeExpr::union(UnionStyle::Union, [TypeExpr::None, TypeExpr::Any]),
            ],
        );
        assert_eq!(
            expr,
            TypeExpr::Union {
                style: UnionStyle::Union,
                args: vec![TypeExpr::Any, TypeExpr::None],
            }
        );

        assert_eq!(TypeExpr::union(UnionStyle::Union, [TypeExpr::Any]), TypeExpr::Any);
    }

    #[test]
    fn test_referenced_classes_and_forward_refs() {
        let ns = Namespace::new();
        let int = ns.get("int").unwrap().id();
        let str_ = ns.get("str").unwrap().id();
        let expr = ns
            .parse_type("Dict[str, List[Optional[int]]] | Tuple[int, 'Later']")
            .unwrap();

        assert_eq!(expr.referenced_classes(), vec![str_, int]);
        assert_eq!(expr.forward_refs(), vec!["Later"]);
    }
}
