use thiserror::Error;

/// Errors raised while declaring classes in a [`Namespace`](crate::Namespace).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectError {
    #[error("class '{qualname}' is already declared")]
    DuplicateClass { qualname: String },

    #[error("base '{base}' of class '{class}' is not declared")]
    UnknownBase { class: String, base: String },

    #[error("duplicate base class '{base}' in class '{class}'")]
    DuplicateBase { class: String, base: String },

    #[error("cannot create a consistent method resolution order for class '{class}'")]
    InconsistentMro { class: String },

    #[error("field '{field}' is declared twice in class '{class}'")]
    DuplicateField { class: String, field: String },
}

/// Errors raised while parsing a type expression such as `Optional[List[int]]`.
///
/// Offsets are byte positions into the parsed string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeParseError {
    #[error("type expression is empty")]
    Empty,

    #[error("unexpected end of type expression")]
    UnexpectedEnd { offset: usize },

    #[error("unexpected character '{found}'")]
    UnexpectedChar { found: char, offset: usize },

    #[error("name '{name}' is not defined")]
    UnknownName { name: String, offset: usize },

    #[error("{name}[...] expects {expected}, got {found} argument(s)")]
    Arity {
        name: String,
        expected: &'static str,
        found: usize,
        offset: usize,
    },

    #[error("'{name}' must be subscripted")]
    NotSubscripted { name: String, offset: usize },

    #[error("'{name}' cannot be subscripted")]
    NotGeneric { name: String, offset: usize },

    #[error("invalid Literal value")]
    InvalidLiteral { offset: usize },

    #[error("unterminated string")]
    UnterminatedString { offset: usize },
}

impl TypeParseError {
    /// Byte offset of the problem within the parsed expression.
    pub fn offset(&self) -> usize {
        match self {
            TypeParseError::Empty => 0,
            TypeParseError::UnexpectedEnd { offset }
            | TypeParseError::UnexpectedChar { offset, .. }
            | TypeParseError::UnknownName { offset, .. }
            | TypeParseError::Arity { offset, .. }
            | TypeParseError::NotSubscripted { offset, .. }
            | TypeParseError::NotGeneric { offset, .. }
            | TypeParseError::InvalidLiteral { offset }
            | TypeParseError::UnterminatedString { offset } => *offset,
        }
    }

    /// Length of the offending text, for labelling.
    pub fn len(&self) -> usize {
        match self {
            TypeParseError::UnknownName { name, .. }
            | TypeParseError::NotSubscripted { name, .. }
            | TypeParseError::NotGeneric { name, .. } => name.len(),
            _ => 1,
        }
    }
}
