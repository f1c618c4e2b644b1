use miette::Diagnostic;
use thiserror::Error;

/// The object handed to a model adapter is not a model of its framework.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(erdkit::invalid_model))]
pub struct InvalidModelError {
    pub message: String,
}

impl InvalidModelError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The object handed to a field adapter is not a field descriptor of its
/// framework.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(erdkit::invalid_field))]
pub struct InvalidFieldError {
    pub message: String,
}

impl InvalidFieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A field's type still holds a forward reference that was never resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("unevaluated forward reference '{forward_ref}' for field '{field}' on model '{model}'")]
#[diagnostic(code(erdkit::forward_ref))]
pub struct UnevaluatedForwardRefError {
    pub model: String,
    pub field: String,
    pub forward_ref: String,
    #[help]
    pub help: Option<String>,
}

#[derive(Debug, Error, Diagnostic)]
pub enum AdapterError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidModel(#[from] InvalidModelError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidField(#[from] InvalidFieldError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    UnevaluatedForwardRef(#[from] UnevaluatedForwardRefError),

    #[error("no model adapter is registered under '{key}'")]
    #[diagnostic(
        code(erdkit::unknown_adapter),
        help("registered adapters: {available}")
    )]
    UnknownAdapter { key: String, available: String },
}
