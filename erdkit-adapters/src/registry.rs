//! Static registry of model adapters.
//!
//! Adapters are registered under a string key and tried in a fixed order
//! when a model has to be adapted without knowing its framework:
//!
//! 1. `pydantic` - [`PydanticModel`]
//!
//! # Example
//!
//! ```ignore
//! let kind = registry::select(&object).ok_or(...)?;
//! let model = kind.adapt(object)?;
//!
//! // or by key
//! let model = registry::adapt("pydantic", object)?;
//! for field in model.fields() {
//!     println!("{}: {}", field.name(), field.type_name());
//! }
//! ```

use erdkit_core::{ClassRef, DefaultValue, Namespace, Object, TypeExpr, repr_type_with_mro};

use crate::{
    AdapterError, InvalidModelError,
    base::{Field, Model},
    pydantic::{PydanticField, PydanticModel},
};

/// The closed set of model adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterKind {
    Pydantic,
}

impl AdapterKind {
    /// Every adapter, in selection order.
    pub const ALL: &'static [AdapterKind] = &[AdapterKind::Pydantic];

    /// Key the adapter is registered under.
    pub fn key(self) -> &'static str {
        match self {
            AdapterKind::Pydantic => "pydantic",
        }
    }

    /// Whether this adapter can wrap `obj`.
    pub fn is_model_type(self, obj: &Object<'_>) -> bool {
        match self {
            AdapterKind::Pydantic => PydanticModel::is_model_type(obj),
        }
    }

    pub fn adapt<'ns>(self, obj: Object<'ns>) -> Result<AnyModel<'ns>, AdapterError> {
        match self {
            AdapterKind::Pydantic => Ok(AnyModel::Pydantic(PydanticModel::new(obj)?)),
        }
    }
}

/// Registered keys, in selection order.
pub fn keys() -> impl Iterator<Item = &'static str> {
    AdapterKind::ALL.iter().map(|kind| kind.key())
}

/// Look up an adapter by key.
pub fn get(key: &str) -> Option<AdapterKind> {
    AdapterKind::ALL.iter().copied().find(|kind| kind.key() == key)
}

/// The first adapter that accepts `obj`.
pub fn select(obj: &Object<'_>) -> Option<AdapterKind> {
    AdapterKind::ALL
        .iter()
        .copied()
        .find(|kind| kind.is_model_type(obj))
}

/// Adapt `obj` with the adapter registered under `key`.
pub fn adapt<'ns>(key: &str, obj: Object<'ns>) -> Result<AnyModel<'ns>, AdapterError> {
    let kind = get(key).ok_or_else(|| AdapterError::UnknownAdapter {
        key: key.to_string(),
        available: keys().collect::<Vec<_>>().join(", "),
    })?;
    kind.adapt(obj)
}

/// Adapt `obj` with the first adapter that accepts it.
pub fn adapt_any(obj: Object<'_>) -> Result<AnyModel<'_>, AdapterError> {
    match select(&obj) {
        Some(kind) => kind.adapt(obj),
        None => Err(InvalidModelError::new(format!(
            "Argument model is not supported by any registered adapter ({}). Got {}",
            keys().collect::<Vec<_>>().join(", "),
            repr_type_with_mro(&obj)
        ))
        .into()),
    }
}

/// A model wrapped by any registered adapter.
#[derive(Debug, Clone, Copy)]
pub enum AnyModel<'ns> {
    Pydantic(PydanticModel<'ns>),
}

impl AnyModel<'_> {
    pub fn kind(&self) -> AdapterKind {
        match self {
            AnyModel::Pydantic(_) => AdapterKind::Pydantic,
        }
    }
}

impl<'ns> Model<'ns> for AnyModel<'ns> {
    type Field = AnyField<'ns>;

    fn model(&self) -> ClassRef<'ns> {
        match self {
            AnyModel::Pydantic(m) => m.model(),
        }
    }

    fn fields(&self) -> Vec<AnyField<'ns>> {
        match self {
            AnyModel::Pydantic(m) => m.fields().into_iter().map(AnyField::Pydantic).collect(),
        }
    }

    fn docstring(&self) -> String {
        match self {
            AnyModel::Pydantic(m) => m.docstring(),
        }
    }

    fn forward_ref_help(&self) -> Option<&'static str> {
        match self {
            AnyModel::Pydantic(m) => m.forward_ref_help(),
        }
    }
}

/// A field wrapped by any registered adapter.
#[derive(Debug, Clone, Copy)]
pub enum AnyField<'ns> {
    Pydantic(PydanticField<'ns>),
}

impl<'ns> Field<'ns> for AnyField<'ns> {
    fn name(&self) -> &str {
        match self {
            AnyField::Pydantic(f) => f.name(),
        }
    }

    fn type_obj(&self) -> &'ns TypeExpr {
        match self {
            AnyField::Pydantic(f) => f.type_obj(),
        }
    }

    fn namespace(&self) -> &'ns Namespace {
        match self {
            AnyField::Pydantic(f) => f.namespace(),
        }
    }

    fn is_many(&self) -> bool {
        match self {
            AnyField::Pydantic(f) => f.is_many(),
        }
    }

    fn is_nullable(&self) -> bool {
        match self {
            AnyField::Pydantic(f) => f.is_nullable(),
        }
    }
}

impl AnyField<'_> {
    /// Field description, if the framework stores one.
    pub fn description(&self) -> Option<&str> {
        match self {
            AnyField::Pydantic(f) => f.description(),
        }
    }

    pub fn default(&self) -> &DefaultValue {
        match self {
            AnyField::Pydantic(f) => f.default(),
        }
    }
}
