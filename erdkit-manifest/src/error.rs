use std::path::PathBuf;

use erdkit_core::{ObjectError, TypeParseError};
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename, reducing parameter passing
/// in error factory functions.
///
/// # Example
///
/// ```ignore
/// let ctx = SourceContext::new(content, "erd.toml");
/// ctx.validation_error("missing required field");
/// ctx.reserved_keyword_error("class", "field", span);
/// ```
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error without a span.
    pub fn validation_error(&self, message: impl Into<String>) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: None,
            message: message.into(),
        })
    }

    /// Create a validation error with an optional span.
    pub fn validation_error_at(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    pub fn reserved_keyword_error(
        &self,
        name: impl Into<String>,
        context: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::ReservedKeyword {
            src: self.named_source(),
            span,
            name: name.into(),
            context: context.into(),
        })
    }

    pub fn invalid_identifier_error(
        &self,
        name: impl Into<String>,
        context: impl Into<String>,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidIdentifier {
            src: self.named_source(),
            span,
            name: name.into(),
            context: context.into(),
            reason: reason.into(),
        })
    }

    /// Create an error for an annotation that failed to parse.
    ///
    /// `span` covers the annotation text itself, without quotes.
    pub fn invalid_type_error(
        &self,
        ty: impl Into<String>,
        field: impl Into<String>,
        source: TypeParseError,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        let help = match &source {
            TypeParseError::UnknownName { name, .. } => Some(format!(
                "declare '{name}' before this class, or quote it ('{name}') to make it a forward reference"
            )),
            TypeParseError::NotGeneric { name, .. } => {
                Some(format!("'{name}' is a class and cannot be subscripted"))
            }
            _ => None,
        };
        Box::new(Error::InvalidType {
            src: self.named_source(),
            span,
            ty: ty.into(),
            field: field.into(),
            source,
            help,
        })
    }

    pub fn object_error(&self, source: ObjectError, span: Option<SourceSpan>) -> Box<Error> {
        Box::new(Error::Object {
            src: self.named_source(),
            span,
            source,
        })
    }

    pub fn conflicting_defaults_error(
        &self,
        field: impl Into<String>,
        keys: &[&str],
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::ConflictingDefaults {
            src: self.named_source(),
            span,
            field: field.into(),
            keys: keys.join(", "),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(
        code(erdkit::io_error),
        help("pass the path of an erd.toml file with --manifest")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse erd.toml")]
    #[diagnostic(code(erdkit::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(erdkit::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("'{name}' is a Python reserved keyword")]
    #[diagnostic(
        code(erdkit::reserved_keyword),
        help("rename the {context} '{name}', e.g. to '{name}_'")
    )]
    ReservedKeyword {
        #[source_code]
        src: NamedSource<String>,
        #[label("reserved keyword used here")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
    },

    #[error("invalid {context} name '{name}'")]
    #[diagnostic(
        code(erdkit::invalid_identifier),
        help(
            "{reason}. Use only letters, numbers, and underscores, starting with a letter or underscore."
        )
    )]
    InvalidIdentifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid identifier")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
        reason: String,
    },

    #[error("invalid type '{ty}' for field '{field}'")]
    #[diagnostic(code(erdkit::invalid_type))]
    InvalidType {
        #[source_code]
        src: NamedSource<String>,
        #[label("{source}")]
        span: Option<SourceSpan>,
        ty: String,
        field: String,
        #[source]
        source: TypeParseError,
        #[help]
        help: Option<String>,
    },

    #[error("{source}")]
    #[diagnostic(code(erdkit::invalid_class))]
    Object {
        #[source_code]
        src: NamedSource<String>,
        #[label("declared here")]
        span: Option<SourceSpan>,
        source: ObjectError,
    },

    #[error("field '{field}' declares more than one default")]
    #[diagnostic(
        code(erdkit::conflicting_defaults),
        help("keep only one of: {keys}")
    )]
    ConflictingDefaults {
        #[source_code]
        src: NamedSource<String>,
        #[label("field declared here")]
        span: Option<SourceSpan>,
        field: String,
        keys: String,
    },
}
