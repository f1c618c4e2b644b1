use crate::{TypeExpr, Value};

/// Default of a field declaration.
///
/// `Undefined` (the field is required) is distinct from an explicit
/// `Value(Value::None)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DefaultValue {
    #[default]
    Undefined,
    Value(Value),
    /// Produced by calling a factory, e.g. `list`
    Factory(String),
}

impl DefaultValue {
    /// The concrete default value, if one was declared.
    pub fn value(&self) -> Option<&Value> {
        match self {
            DefaultValue::Value(v) => Some(v),
            _ => None,
        }
    }
}

/// Native descriptor of one model field.
///
/// The field's name is not stored here; it is the key under which the
/// descriptor is declared on its class.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInfo {
    pub annotation: TypeExpr,
    pub default: DefaultValue,
    pub description: Option<String>,
    pub title: Option<String>,
    pub alias: Option<String>,
}

impl FieldInfo {
    pub fn new(annotation: TypeExpr) -> Self {
        Self {
            annotation,
            default: DefaultValue::Undefined,
            description: None,
            title: None,
            alias: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = DefaultValue::Value(value);
        self
    }

    pub fn with_default_factory(mut self, factory: impl Into<String>) -> Self {
        self.default = DefaultValue::Factory(factory.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// A field is required when it has neither a default nor a factory.
    pub fn is_required(&self) -> bool {
        self.default == DefaultValue::Undefined
    }
}
