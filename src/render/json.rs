//! JSON renderer: structured output for tooling integration.

use crate::model::{Document, Entity};
use crate::render::Renderer;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, doc: &Document) -> String {
        let mut out = String::new();
        out.push_str("{\n");
        out.push_str(&format!(
            "  \"filepath\": \"{}\",\n",
            json_escape(&doc.filepath)
        ));
        out.push_str(&format!(
            "  \"module_name\": \"{}\",\n",
            json_escape(&doc.module_name)
        ));
        out.push_str(&format!(
            "  \"generated_at\": \"{}\",\n",
            json_escape(&doc.generated_at)
        ));
        match doc.doc {
            Some(ref text) => {
                out.push_str(&format!("  \"doc\": \"{}\",\n", json_escape(text)));
            }
            None => out.push_str("  \"doc\": null,\n"),
        }
        out.push_str("  \"entities\": [\n");
        for (i, entity) in doc.entities.iter().enumerate() {
            out.push_str(&render_entity(entity));
            if i < doc.entities.len() - 1 {
                out.push_str(",\n");
            } else {
                out.push('\n');
            }
        }
        out.push_str("  ]\n");
        out.push_str("}\n");
        out
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

/// Optional fields are omitted rather than emitted as null.
fn render_entity(entity: &Entity) -> String {
    let mut fields = Vec::new();
    fields.push(format!("      \"name\": \"{}\"", json_escape(&entity.name)));
    fields.push(format!("      \"kind\": \"{}\"", entity.kind.label()));
    fields.push(format!("      \"line\": {}", entity.line));
    fields.push(format!(
        "      \"signature\": \"{}\"",
        json_escape(&entity.signature)
    ));
    if let Some(ref return_type) = entity.return_type {
        fields.push(format!(
            "      \"return_type\": \"{}\"",
            json_escape(return_type)
        ));
    }
    if !entity.qualifiers.is_empty() {
        let labels: Vec<String> = entity
            .qualifiers
            .labels()
            .iter()
            .map(|label| format!("\"{}\"", label))
            .collect();
        fields.push(format!("      \"qualifiers\": [{}]", labels.join(", ")));
    }
    if let Some(ref doc) = entity.doc {
        fields.push(format!("      \"doc\": \"{}\"", json_escape(doc)));
    }
    format!("    {{\n{}\n    }}", fields.join(",\n"))
}

pub(crate) fn json_escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
