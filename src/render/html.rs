//! HTML renderer: a standalone page with no external assets.

use crate::model::{Document, Entity, EntityKind};
use crate::render::Renderer;

pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, doc: &Document) -> String {
        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        out.push_str("<meta charset=\"utf-8\">\n");
        out.push_str(&format!(
            "<title>{}</title>\n",
            html_escape(&doc.module_name)
        ));
        out.push_str("<style>\n");
        out.push_str(
            "body { font-family: system-ui, sans-serif; max-width: 48em; margin: 2em auto; padding: 0 1em; }\n",
        );
        out.push_str("code { background: #f4f4f4; padding: 0.15em 0.3em; border-radius: 3px; }\n");
        out.push_str("pre { background: #f4f4f4; padding: 1em; border-radius: 5px; overflow-x: auto; }\n");
        out.push_str("dt { font-weight: bold; margin-top: 0.5em; }\n");
        out.push_str("dd { margin: 0 0 0.5em 1.5em; }\n");
        out.push_str(
            ".kind { font-size: 0.75em; padding: 0.1em 0.4em; border-radius: 3px; margin-left: 0.5em; background: #e8e8f8; }\n",
        );
        out.push_str(".meta { color: #555; }\n");
        out.push_str("</style>\n</head>\n<body>\n");

        out.push_str(&format!("<h1>{}</h1>\n", html_escape(&doc.module_name)));
        out.push_str(&format!(
            "<p class=\"meta\"><code>{}</code> &middot; generated {}</p>\n",
            html_escape(&doc.filepath),
            html_escape(&doc.generated_at)
        ));

        if let Some(ref text) = doc.doc {
            out.push_str("<h2>Description</h2>\n");
            out.push_str(&format!("<pre>{}</pre>\n", html_escape(text)));
        }

        let includes: Vec<&Entity> = doc.of_kind(EntityKind::Include).collect();
        if !includes.is_empty() {
            out.push_str("<h2>Includes</h2>\n<ul>\n");
            for entity in includes {
                out.push_str(&format!(
                    "  <li><code>{}</code></li>\n",
                    html_escape(&entity.signature)
                ));
            }
            out.push_str("</ul>\n");
        }

        section(&mut out, "Macros", doc.of_kind(EntityKind::Macro).collect());
        section(&mut out, "Data", doc.of_kind(EntityKind::Variable).collect());
        section(&mut out, "Types", doc.types().collect());
        section(&mut out, "Functions", doc.of_kind(EntityKind::Function).collect());

        out.push_str("</body>\n</html>\n");
        out
    }

    fn file_extension(&self) -> &str {
        "html"
    }
}

fn section(out: &mut String, title: &str, entities: Vec<&Entity>) {
    if entities.is_empty() {
        return;
    }
    out.push_str(&format!("<h2>{}</h2>\n<dl>\n", title));
    for entity in entities {
        out.push_str(&format!(
            "  <dt id=\"{}\">{}<span class=\"kind\">{}</span></dt>\n",
            anchor(&entity.name),
            html_escape(&entity.name),
            entity.kind.label()
        ));
        out.push_str(&format!(
            "  <dd><code>{}</code></dd>\n",
            html_escape(&entity.signature)
        ));
        if let Some(ref doc) = entity.doc {
            out.push_str(&format!("  <dd>{}</dd>\n", html_escape(doc)));
        }
    }
    out.push_str("</dl>\n");
}

/// Anchor id: lowercased, alphanumerics and dashes only.
fn anchor(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect()
}

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
