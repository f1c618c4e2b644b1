//! Normalized entity/relationship data for diagram renderers.
//!
//! [`EntityGraph::from_models`] walks breadth-first from a set of root
//! models. Every field whose type refers to another model class becomes an
//! [`Edge`], and every model reached becomes an [`Entity`].

use std::collections::{HashSet, VecDeque};

use erdkit_core::Object;
use log::{debug, trace};
use serde::Serialize;

use crate::{
    AdapterError, UnevaluatedForwardRefError,
    base::{Field, Model},
    registry::{self, AnyModel},
};

/// One attribute row of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRow {
    pub name: String,
    pub type_name: String,
    pub is_many: bool,
    pub is_nullable: bool,
}

/// A model node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    /// `module.Name`
    pub key: String,
    pub name: String,
    pub docstring: String,
    pub fields: Vec<FieldRow>,
}

/// A relationship from a model field to another model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub source: String,
    pub source_field: String,
    pub target: String,
    pub is_many: bool,
    pub is_nullable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntityGraph {
    pub entities: Vec<Entity>,
    pub edges: Vec<Edge>,
}

impl EntityGraph {
    /// Traverse from `roots` through every field that references a model.
    ///
    /// Fails on the first field whose type still holds a forward reference.
    pub fn from_models<'ns>(
        roots: impl IntoIterator<Item = AnyModel<'ns>>,
    ) -> Result<Self, AdapterError> {
        let mut graph = EntityGraph::default();
        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();

        for root in roots {
            if seen.insert(root.key()) {
                queue.push_back(root);
            }
        }

        while let Some(model) = queue.pop_front() {
            let key = model.key();
            trace!(model = key.as_str(); "Visiting model");

            let fields = model.fields();
            let mut rows = Vec::with_capacity(fields.len());
            for field in &fields {
                if let Some(forward_ref) = field.type_obj().forward_refs().first() {
                    return Err(UnevaluatedForwardRefError {
                        model: key,
                        field: field.name().to_string(),
                        forward_ref: forward_ref.to_string(),
                        help: model.forward_ref_help().map(str::to_string),
                    }
                    .into());
                }

                rows.push(FieldRow {
                    name: field.name().to_string(),
                    type_name: field.type_name(),
                    is_many: field.is_many(),
                    is_nullable: field.is_nullable(),
                });

                let ns = field.namespace();
                for id in field.type_obj().referenced_classes() {
                    let target: Object<'ns> = ns.class(id).into();
                    let Some(kind) = registry::select(&target) else {
                        continue;
                    };
                    let target = kind.adapt(target)?;
                    let target_key = target.key();

                    graph.edges.push(Edge {
                        source: key.clone(),
                        source_field: field.name().to_string(),
                        target: target_key.clone(),
                        is_many: field.is_many(),
                        is_nullable: field.is_nullable(),
                    });
                    if seen.insert(target_key) {
                        queue.push_back(target);
                    }
                }
            }

            graph.entities.push(Entity {
                name: model.name().to_string(),
                docstring: model.docstring(),
                fields: rows,
                key,
            });
        }

        graph.entities.sort_by(|a, b| a.key.cmp(&b.key));
        graph.edges.sort_by(|a, b| {
            (&a.source, &a.source_field, &a.target).cmp(&(&b.source, &b.source_field, &b.target))
        });

        debug!(entities = graph.entities.len(), edges = graph.edges.len(); "Built entity graph");
        Ok(graph)
    }

    pub fn entity(&self, key: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.key == key)
    }

    /// Edges leaving the entity with the given key.
    pub fn edges_from<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.source == key)
    }
}
