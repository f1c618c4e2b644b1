//! Entity graph traversal over manifests.

use std::str::FromStr;

use erdkit_adapters::{
    AdapterError, Edge, EntityGraph, FORWARD_REF_HELP, FieldRow, UnevaluatedForwardRefError,
    registry,
};
use erdkit_manifest::Manifest;

const TREE: &str = r#"
    [project]
    name = "tree"
    rebuild_all = true

    [classes.Node]
    doc = "A node in a tree."

    [classes.Node.fields.value]
    type = "int"

    [classes.Node.fields.children]
    type = "List['Node']"
    default_factory = "list"

    [classes.Node.fields.parent]
    type = "Optional['Node']"
    default_none = true

    [classes.Node.fields.owner]
    type = "'Owner'"

    [classes.Node.fields.position]
    type = "Optional['Point']"
    default_none = true

    [classes.Owner]

    [classes.Owner.fields.name]
    type = "str"

    [classes.Point]
    bases = []
"#;

fn graph_for(src: &str, roots: &[&str]) -> Result<EntityGraph, AdapterError> {
    let manifest = Manifest::from_str(src).expect("Failed to parse manifest");
    let ns = manifest.namespace();
    let models = roots
        .iter()
        .map(|name| registry::adapt("pydantic", ns.get(name).unwrap().into()))
        .collect::<Result<Vec<_>, _>>()?;
    EntityGraph::from_models(models)
}

#[test]
fn test_traverses_referenced_models() {
    let graph = graph_for(TREE, &["Node"]).unwrap();

    let keys: Vec<_> = graph.entities.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, ["tree.Node", "tree.Owner"]);

    let owner = graph.entity("tree.Owner").unwrap();
    assert_eq!(owner.docstring, "tree.Owner");
    assert_eq!(
        owner.fields,
        [FieldRow {
            name: "name".into(),
            type_name: "str".into(),
            is_many: false,
            is_nullable: false,
        }]
    );
}

#[test]
fn test_self_reference_and_edges() {
    let graph = graph_for(TREE, &["Node"]).unwrap();

    let edge = |field: &str, target: &str, is_many, is_nullable| Edge {
        source: "tree.Node".into(),
        source_field: field.into(),
        target: target.into(),
        is_many,
        is_nullable,
    };
    assert_eq!(
        graph.edges,
        [
            edge("children", "tree.Node", true, false),
            edge("owner", "tree.Owner", false, false),
            edge("parent", "tree.Node", false, true),
        ]
    );
    assert_eq!(graph.edges_from("tree.Owner").count(), 0);

    // non-model classes are attributes, not entities
    let node = graph.entity("tree.Node").unwrap();
    let position = node.fields.iter().find(|f| f.name == "position").unwrap();
    assert_eq!(position.type_name, "Optional[Point]");
    assert!(graph.entity("tree.Point").is_none());
}

#[test]
fn test_roots_are_deduplicated() {
    let graph = graph_for(TREE, &["Owner", "Node", "Owner"]).unwrap();
    assert_eq!(graph.entities.len(), 2);
    assert_eq!(graph.edges.len(), 3);
}

#[test]
fn test_unresolved_forward_ref() {
    let src = TREE.replace("rebuild_all = true", "");
    let err = graph_for(&src, &["Node"]).unwrap_err();

    match err {
        AdapterError::UnevaluatedForwardRef(err) => assert_eq!(
            err,
            UnevaluatedForwardRefError {
                model: "tree.Node".into(),
                field: "children".into(),
                forward_ref: "Node".into(),
                help: Some(FORWARD_REF_HELP.into()),
            }
        ),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_serializes_to_json() {
    let graph = graph_for(TREE, &["Node"]).unwrap();
    let json = serde_json::to_value(&graph).unwrap();

    assert_eq!(json["entities"][0]["key"], "tree.Node");
    assert_eq!(json["entities"][0]["fields"][1]["type_name"], "List[Node]");
    assert_eq!(json["edges"][0]["source_field"], "children");
    assert_eq!(json["edges"][0]["is_many"], true);
}
