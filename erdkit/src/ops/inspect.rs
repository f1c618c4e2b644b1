//! Inspect operation - one model through its adapter.

use erdkit_adapters::{AdapterError, AnyModel, Field, Model, registry};
use erdkit_core::{DefaultValue, Namespace};
use eyre::Result;
use log::debug;

use super::find_class;
use crate::reports::{FieldInfoRow, InspectReport};

/// Adapt `name` with the adapter registered under `adapter`, or the first
/// adapter that accepts it.
///
/// The outer error is a lookup failure; the inner one comes from the adapter.
pub fn inspect(
    ns: &Namespace,
    name: &str,
    adapter: Option<&str>,
) -> Result<std::result::Result<InspectReport, AdapterError>> {
    let class = find_class(ns, name)?;
    let model = match adapter {
        Some(key) => registry::adapt(key, class.into()),
        None => registry::adapt_any(class.into()),
    };
    Ok(model.map(|model| build_report(&model)))
}

fn build_report(model: &AnyModel<'_>) -> InspectReport {
    debug!(model = model.key().as_str(); "Inspecting model");

    let fields = model
        .fields()
        .iter()
        .map(|field| FieldInfoRow {
            name: field.name().to_string(),
            type_name: field.type_name(),
            is_many: field.is_many(),
            is_nullable: field.is_nullable(),
            default: match field.default() {
                DefaultValue::Undefined => None,
                DefaultValue::Value(v) => Some(v.repr()),
                DefaultValue::Factory(f) => Some(format!("{}()", f)),
            },
        })
        .collect();

    InspectReport {
        key: model.key(),
        adapter: model.kind().key(),
        mro: model.model().mro().map(|c| c.qualified_name()).collect(),
        docstring: model.docstring(),
        fields,
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use erdkit_manifest::Manifest;

    use super::*;

    const SRC: &str = r#"
        [project]
        name = "shop"

        [classes.Item]
        doc = "A thing for sale."

        [classes.Item.fields.sku]
        type = "str"
        description = "Stock keeping unit"

        [classes.Item.fields.tags]
        type = "Set[str]"
        default_factory = "set"

        [classes.Item.fields.price]
        type = "Optional[float]"
        default = 9.5

        [classes.Plain]
        bases = []
    "#;

    #[test]
    fn test_inspect_model() {
        let manifest = Manifest::from_str(SRC).unwrap();
        let report = inspect(manifest.namespace(), "Item", None)
            .unwrap()
            .unwrap();

        assert_eq!(report.key, "shop.Item");
        assert_eq!(report.adapter, "pydantic");
        assert_eq!(
            report.mro,
            ["shop.Item", "pydantic.BaseModel", "builtins.object"]
        );
        assert_eq!(
            report.docstring,
            "shop.Item\n\nA thing for sale.\n\nAttributes:\n    sku (str): Stock keeping unit.\n"
        );

        let defaults: Vec<_> = report.fields.iter().map(|f| f.default.as_deref()).collect();
        assert_eq!(defaults, [None, Some("set()"), Some("9.5")]);
        assert!(report.fields[1].is_many);
        assert!(report.fields[2].is_nullable);
    }

    #[test]
    fn test_inspect_errors() {
        let manifest = Manifest::from_str(SRC).unwrap();
        let ns = manifest.namespace();

        assert!(inspect(ns, "Missing", None).is_err());
        assert!(matches!(
            inspect(ns, "Plain", None).unwrap(),
            Err(AdapterError::InvalidModel(_))
        ));
        assert!(matches!(
            inspect(ns, "Item", Some("attrs")).unwrap(),
            Err(AdapterError::UnknownAdapter { .. })
        ));
    }
}
