//! Behaviour of the Pydantic adapters on models loaded from erd.toml.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use std::str::FromStr;

use erdkit_adapters::{
    Field, InvalidModelError, Model, PydanticField, PydanticModel, registry,
};
use erdkit_core::{ClassDecl, FieldInfo, FieldRef, Namespace, Object, TypeRef, Value};
use erdkit_manifest::Manifest;

const SHOP: &str = r#"
    [project]
    name = "shop"

    [classes.Customer]
    doc = "Someone who places orders."

    [classes.Customer.fields.name]
    type = "str"

    [classes.Order]
    doc = """
    An order placed by a customer.

    Totals are in cents.
    """

    [classes.Order.fields.id]
    type = "int"
    description = "Order number"

    [classes.Order.fields.customer]
    type = "Customer"
    description = "Who placed it"

    [classes.Order.fields.items]
    type = "List[str]"
    description = "SKUs in the order"
    default_factory = "list"

    [classes.Order.fields.total]
    type = "float"
    description = "Total in cents."
    default = 0.0

    [classes.Order.fields.coupon]
    type = "Optional[str]"
    description = "Applied coupon code"
    default = "NONE"

    [classes.Order.fields.note]
    type = "str | None"
    default_none = true

    [classes.Point]
    bases = []

    [classes.Point.fields.x]
    type = "float"
"#;

fn shop() -> Manifest {
    Manifest::from_str(SHOP).expect("Failed to parse manifest")
}

fn model<'ns>(ns: &'ns Namespace, name: &str) -> PydanticModel<'ns> {
    let class = ns.get(name).expect("class not declared");
    PydanticModel::new(class.into()).expect("not a pydantic model")
}

/// A one-field model `m.M` with docstring "A model." and field `x: int`.
fn single_field_namespace(info: impl FnOnce(FieldInfo) -> FieldInfo) -> Namespace {
    let mut ns = Namespace::new();
    let int = FieldInfo::new(ns.parse_type("int").unwrap());
    ns.declare(
        ClassDecl::new("m", "M")
            .base("BaseModel")
            .doc("A model.")
            .field("x", info(int)),
    )
    .unwrap();
    ns
}

#[test]
fn test_is_model_type_rejects_everything_else() {
    let manifest = shop();
    let ns = manifest.namespace();
    let list = ns.parse_type("List[Order]").unwrap();
    let info = FieldInfo::new(ns.parse_type("int").unwrap());
    let values = [
        Value::None,
        Value::Int(0),
        Value::Str("Order".into()),
        Value::List(vec![]),
    ];

    let mut rejected: Vec<Object<'_>> = vec![
        ns.get("Point").unwrap().into(),
        ns.get("int").unwrap().into(),
        ns.object().into(),
        TypeRef::new(ns, &list).into(),
        FieldRef::new(ns, &info).into(),
    ];
    rejected.extend(values.iter().map(Object::from));

    for obj in rejected {
        assert!(!PydanticModel::is_model_type(&obj), "{}", obj.repr());
        let err = PydanticModel::new(obj).unwrap_err();
        assert!(
            err.message
                .starts_with("Argument model must be a subclass of pydantic.BaseModel. Got ")
        );
    }

    for name in ["Customer", "Order"] {
        let obj: Object<'_> = ns.get(name).unwrap().into();
        assert!(PydanticModel::is_model_type(&obj));
        assert!(PydanticModel::new(obj).is_ok());
    }
}

#[test]
fn test_invalid_model_error_carries_mro() {
    let manifest = shop();
    let ns = manifest.namespace();

    let err = PydanticModel::new(ns.get("Point").unwrap().into()).unwrap_err();
    assert_eq!(
        err,
        InvalidModelError::new(
            "Argument model must be a subclass of pydantic.BaseModel. \
             Got <class 'shop.Point'> <mro (<class 'shop.Point'>, <class 'object'>)>"
        )
    );
}

#[test]
fn test_field_adapter_keeps_name() {
    let manifest = shop();
    let ns = manifest.namespace();
    let order = ns.get("Order").unwrap();
    let total = order.field("total").unwrap();

    let field = PydanticField::new("renamed_total", total.into()).unwrap();
    assert_eq!(field.name(), "renamed_total");
    assert_eq!(field.type_name(), "float");

    let value = Value::Float(1.5);
    assert!(PydanticField::new("total", Object::from(&value)).is_err());
    assert!(PydanticField::new("total", order.into()).is_err());
}

#[test]
fn test_fields_in_declaration_order() {
    let manifest = shop();
    let order = model(manifest.namespace(), "Order");

    let names: Vec<_> = order.fields().iter().map(|f| f.name().to_string()).collect();
    assert_eq!(names, ["id", "customer", "items", "total", "coupon", "note"]);

    // recreated on every call, never cached
    assert_eq!(order.fields().len(), order.fields().len());
}

#[test]
fn test_field_multiplicity_and_nullability() {
    let manifest = shop();
    let order = model(manifest.namespace(), "Order");
    let summary: Vec<_> = order
        .fields()
        .iter()
        .map(|f| (f.name().to_string(), f.is_many(), f.is_nullable()))
        .collect();

    assert_eq!(
        summary,
        [
            ("id".to_string(), false, false),
            ("customer".to_string(), false, false),
            ("items".to_string(), true, false),
            ("total".to_string(), false, false),
            ("coupon".to_string(), false, true),
            ("note".to_string(), false, true),
        ]
    );
}

#[test]
fn test_docstring_adds_period() {
    let ns = single_field_namespace(|f| f.with_description("An int"));
    let doc = model(&ns, "M").docstring();
    assert_eq!(doc, "m.M\n\nA model.\n\nAttributes:\n    x (int): An int.\n");
}

#[test]
fn test_docstring_with_defaults() {
    let ns = single_field_namespace(|f| f.with_description("An int").with_default(Value::Int(0)));
    assert!(
        model(&ns, "M")
            .docstring()
            .ends_with("Attributes:\n    x (int): An int. Default is 0.\n")
    );

    let ns = single_field_namespace(|f| {
        f.with_description("An int")
            .with_default(Value::Str("hi".into()))
    });
    assert!(
        model(&ns, "M")
            .docstring()
            .ends_with("x (int): An int. Default is 'hi'.\n")
    );
}

#[test]
fn test_docstring_without_descriptions() {
    let ns = single_field_namespace(|f| f.with_default(Value::Int(1)));
    assert_eq!(model(&ns, "M").docstring(), "m.M\n\nA model.\n");

    let ns = single_field_namespace(|f| f.with_description("   "));
    assert!(!model(&ns, "M").docstring().contains("Attributes:"));
}

#[test]
fn test_order_docstring() {
    let manifest = shop();
    let docstring = model(manifest.namespace(), "Order").docstring();
    insta::assert_snapshot!("order_docstring", docstring);
}

#[test]
fn test_registry_adapts_the_same_model() {
    let manifest = shop();
    let ns = manifest.namespace();
    let class = ns.get("Order").unwrap();

    let any = registry::adapt("pydantic", class.into()).unwrap();
    let direct = model(ns, "Order");
    assert_eq!(any.key(), "shop.Order");
    assert_eq!(any.docstring(), direct.docstring());
    assert_eq!(any.fields().len(), direct.fields().len());
}
