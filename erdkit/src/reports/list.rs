//! List command report data structures.

use super::output::{Output, Report};

#[derive(Debug)]
pub struct ListReport {
    pub classes: Vec<ClassInfo>,
}

#[derive(Debug)]
pub struct ClassInfo {
    /// `module.Name`
    pub key: String,
    pub bases: Vec<String>,
    /// Number of fields, inherited ones included.
    pub fields: usize,
    /// Key of the first adapter that accepts the class.
    pub adapter: Option<&'static str>,
}

impl Report for ListReport {
    fn render(&self, out: &mut dyn Output) {
        if self.classes.is_empty() {
            out.preformatted("No classes declared.");
            return;
        }

        for class in &self.classes {
            let adapter = class
                .adapter
                .map(|a| format!(" [{}]", a))
                .unwrap_or_default();
            out.list_item(&format!(
                "{}({}) {} fields{}",
                class.key,
                class.bases.join(", "),
                class.fields,
                adapter
            ));
        }
    }
}
