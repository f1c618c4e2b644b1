//! Graph command report data structures.

use erdkit_adapters::EntityGraph;

use super::output::{Output, Report};

#[derive(Debug)]
pub struct GraphReport {
    pub graph: EntityGraph,
}

impl Report for GraphReport {
    fn render(&self, out: &mut dyn Output) {
        for entity in &self.graph.entities {
            out.section(&entity.key);
            for field in &entity.fields {
                out.key_value_indented(&field.name, &field.type_name);
            }
            out.newline();
        }

        if self.graph.edges.is_empty() {
            return;
        }
        out.section("Relationships");
        for edge in &self.graph.edges {
            let cardinality = match (edge.is_many, edge.is_nullable) {
                (true, _) => "many",
                (false, true) => "zero or one",
                (false, false) => "one",
            };
            out.list_item(&format!(
                "{}.{} -> {} ({})",
                edge.source, edge.source_field, edge.target, cardinality
            ));
        }
    }
}
