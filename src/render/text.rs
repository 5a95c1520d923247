//! Plain-text renderer: the terminal report, with optional ANSI color.

use crate::model::{Document, Entity, EntityKind};
use crate::render::{RenderConfig, Renderer};
use owo_colors::{OwoColorize, Style};

const RULER_WIDTH: usize = 70;

pub struct TextRenderer {
    color: bool,
}

impl TextRenderer {
    pub fn new(config: &RenderConfig) -> Self {
        TextRenderer {
            color: config.color,
        }
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    fn ruler(&self) -> String {
        self.paint(&"=".repeat(RULER_WIDTH), Style::new().bold().bright_magenta())
    }

    fn section_header(&self, out: &mut String, title: &str) {
        out.push('\n');
        out.push_str(&self.paint(title, Style::new().bright_blue()));
        out.push('\n');
    }

    fn entity_name(&self, out: &mut String, entity: &Entity, markers: &[&str]) {
        out.push_str("    ");
        out.push_str(&self.paint(&entity.name, Style::new().bright_green()));
        for marker in markers {
            out.push_str(&format!(" [{}]", marker));
        }
        out.push('\n');
    }

    fn entity_doc(&self, out: &mut String, entity: &Entity) {
        if let Some(ref doc) = entity.doc {
            out.push_str(&format!(
                "        {}\n",
                self.paint(doc, Style::new().bright_cyan())
            ));
        }
    }
}

impl Renderer for TextRenderer {
    fn render(&self, doc: &Document) -> String {
        let mut out = String::new();

        out.push_str(&self.ruler());
        out.push('\n');
        out.push_str(&self.paint(&format!("Module: {}", doc.module_name), Style::new().bold()));
        out.push('\n');
        out.push_str(&format!("File: {}\n", doc.filepath));
        out.push_str(&format!("Generated: {}\n", doc.generated_at));
        out.push_str(&self.ruler());
        out.push('\n');

        if let Some(ref text) = doc.doc {
            out.push('\n');
            out.push_str(&self.paint("DESCRIPTION", Style::new().bright_cyan()));
            out.push('\n');
            out.push_str(&format!("    {}\n", text));
        }

        // The includes header prints even when the list is empty.
        self.section_header(&mut out, "INCLUDES");
        for entity in doc.of_kind(EntityKind::Include) {
            out.push_str("    ");
            out.push_str(&self.paint(&entity.name, Style::new().bright_green()));
            out.push('\n');
        }

        let macros: Vec<&Entity> = doc.of_kind(EntityKind::Macro).collect();
        if !macros.is_empty() {
            self.section_header(&mut out, "MACROS");
            for entity in macros {
                self.entity_name(&mut out, entity, &[]);
                self.entity_doc(&mut out, entity);
            }
        }

        let variables: Vec<&Entity> = doc.of_kind(EntityKind::Variable).collect();
        if !variables.is_empty() {
            self.section_header(&mut out, "DATA");
            for entity in variables {
                self.entity_name(&mut out, entity, &entity.qualifiers.labels());
                out.push_str(&format!("        {}\n", entity.signature));
                self.entity_doc(&mut out, entity);
            }
        }

        let types: Vec<&Entity> = doc.types().collect();
        if !types.is_empty() {
            self.section_header(&mut out, "TYPES");
            for entity in types {
                out.push_str("    ");
                out.push_str(&self.paint(&entity.name, Style::new().bright_green()));
                out.push_str(&format!(" ({})\n", entity.kind.label()));
                self.entity_doc(&mut out, entity);
            }
        }

        let functions: Vec<&Entity> = doc.of_kind(EntityKind::Function).collect();
        if !functions.is_empty() {
            self.section_header(&mut out, "FUNCTIONS");
            for entity in functions {
                self.entity_name(&mut out, entity, &entity.qualifiers.labels());
                out.push_str(&format!("        {}\n", entity.signature));
                self.entity_doc(&mut out, entity);
            }
        }

        out.push('\n');
        out.push_str(&self.ruler());
        out.push('\n');
        out
    }

    fn file_extension(&self) -> &str {
        "txt"
    }
}
