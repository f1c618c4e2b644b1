//! Inspect command report data structures.

use super::output::{Output, Report};

/// One model as seen through its adapter.
#[derive(Debug)]
pub struct InspectReport {
    pub key: String,
    /// Key of the adapter that wrapped the model.
    pub adapter: &'static str,
    pub mro: Vec<String>,
    /// Merged docstring, including the `Attributes:` block.
    pub docstring: String,
    pub fields: Vec<FieldInfoRow>,
}

#[derive(Debug)]
pub struct FieldInfoRow {
    pub name: String,
    pub type_name: String,
    pub is_many: bool,
    pub is_nullable: bool,
    /// Default repr, or `factory()` for a default factory.
    pub default: Option<String>,
}

impl Report for InspectReport {
    fn render(&self, out: &mut dyn Output) {
        out.title(&self.key);
        out.key_value("adapter", self.adapter);
        out.key_value("mro", &self.mro.join(" -> "));
        out.newline();

        out.section("Fields");
        for field in &self.fields {
            let mut flags = Vec::new();
            if field.is_many {
                flags.push("many");
            }
            if field.is_nullable {
                flags.push("nullable");
            }
            let mut line = field.type_name.clone();
            if !flags.is_empty() {
                line.push_str(&format!(" [{}]", flags.join(", ")));
            }
            if let Some(default) = &field.default {
                line.push_str(&format!(" = {}", default));
            }
            out.key_value_indented(&field.name, &line);
        }
        out.newline();

        out.section("Docstring");
        out.preformatted(self.docstring.trim_end());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::RecordingOutput;

    #[test]
    fn test_render() {
        let report = InspectReport {
            key: "shop.Item".into(),
            adapter: "pydantic",
            mro: vec![
                "shop.Item".into(),
                "pydantic.BaseModel".into(),
                "builtins.object".into(),
            ],
            docstring: "shop.Item\n".into(),
            fields: vec![
                FieldInfoRow {
                    name: "tags".into(),
                    type_name: "List[str]".into(),
                    is_many: true,
                    is_nullable: false,
                    default: Some("list()".into()),
                },
                FieldInfoRow {
                    name: "note".into(),
                    type_name: "Optional[str]".into(),
                    is_many: false,
                    is_nullable: true,
                    default: Some("None".into()),
                },
            ],
        };
        let mut out = RecordingOutput::default();
        report.render(&mut out);

        insta::assert_snapshot!(out.text(), @r"
        # shop.Item
        adapter: pydantic
        mro: shop.Item -> pydantic.BaseModel -> builtins.object

        Fields:
          tags: List[str] [many] = list()
          note: Optional[str] [nullable] = None

        Docstring:
        shop.Item
        ");
    }
}
