//! Graph operation - entity-relationship data reachable from root models.

use erdkit_adapters::{AdapterError, EntityGraph, registry};
use erdkit_core::{Namespace, Object};
use eyre::Result;

use super::find_class;
use crate::reports::GraphReport;

/// Build the graph from the named roots, or from every declared model when
/// `roots` is `None`.
///
/// The outer error is a lookup failure; the inner one comes from the adapters.
pub fn graph(
    ns: &Namespace,
    roots: Option<&[String]>,
) -> Result<std::result::Result<GraphReport, AdapterError>> {
    let objects = match roots {
        Some(names) => names
            .iter()
            .map(|name| find_class(ns, name).map(Object::from))
            .collect::<Result<Vec<_>>>()?,
        None => ns
            .declared()
            .map(Object::from)
            .filter(|obj| registry::select(obj).is_some())
            .collect(),
    };

    let graph = objects
        .into_iter()
        .map(registry::adapt_any)
        .collect::<std::result::Result<Vec<_>, _>>()
        .and_then(EntityGraph::from_models);

    Ok(graph.map(|graph| GraphReport { graph }))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use erdkit_manifest::Manifest;

    use super::*;

    const SRC: &str = r#"
        [project]
        name = "hr"

        [classes.Company.fields.name]
        type = "str"

        [classes.Employee.fields.employer]
        type = "Company"

        [classes.Employee.fields.reports]
        type = "List['Employee']"

        [classes.Team.fields.members]
        type = "List[Employee]"
    "#;

    #[test]
    fn test_graph_from_root() {
        let manifest = Manifest::from_str(SRC).unwrap();
        let roots = vec!["Company".to_string()];
        let report = graph(manifest.namespace(), Some(&roots)).unwrap().unwrap();
        assert_eq!(report.graph.entities.len(), 1);
        assert!(report.graph.edges.is_empty());
    }

    #[test]
    fn test_graph_all_fails_on_unresolved_reference() {
        let manifest = Manifest::from_str(SRC).unwrap();
        let result = graph(manifest.namespace(), None).unwrap();
        assert!(matches!(
            result,
            Err(AdapterError::UnevaluatedForwardRef(_))
        ));
    }

    #[test]
    fn test_graph_all_after_rebuild() {
        let src = SRC.replace("name = \"hr\"", "name = \"hr\"\nrebuild_all = true");
        let manifest = Manifest::from_str(&src).unwrap();
        let report = graph(manifest.namespace(), None).unwrap().unwrap();

        let keys: Vec<_> = report.graph.entities.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["hr.Company", "hr.Employee", "hr.Team"]);
        assert_eq!(report.graph.edges.len(), 3);
    }

    #[test]
    fn test_graph_unknown_root() {
        let manifest = Manifest::from_str(SRC).unwrap();
        let roots = vec!["Nobody".to_string()];
        assert!(graph(manifest.namespace(), Some(&roots)).is_err());
    }
}
