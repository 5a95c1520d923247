//! Heuristic line scanner for C sources.
//!
//! One pass over the file: comments are tracked, declaration lines are
//! classified by an ordered rule table, and per-kind extractors pull the
//! name and signature out of a reconstructed logical line. There is no
//! preprocessor and no AST; exotic code may misclassify, but nothing makes
//! the scan fail short of an unreadable file.

pub mod classify;
pub mod comment;
pub mod extract;

use crate::model::{Document, Entity, EntityKind};
use anyhow::{Context, Result};
use classify::Line;
use comment::Pending;
use std::fs;
use std::path::Path;

/// Default per-file entity cap.
pub const MAX_ENTITIES: usize = 2048;

/// Scan limits.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub max_entities: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            max_entities: MAX_ENTITIES,
        }
    }
}

/// Scan one file from disk.
pub fn scan_file(path: &Path, options: &ScanOptions) -> Result<Document> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(scan_source(&source, path, options))
}

/// Scan in-memory source. Never fails: heuristic gaps degrade to skipped
/// lines or best-effort entities.
pub fn scan_source(source: &str, path: &Path, options: &ScanOptions) -> Document {
    let doc = Document {
        filepath: path.display().to_string(),
        module_name: module_name(path),
        generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        ..Document::default()
    };
    let mut scanner = Scanner {
        lines: source.lines().collect(),
        cursor: 0,
        line_num: 0,
        pending: None,
        max_entities: options.max_entities,
        truncated: false,
        doc,
    };
    scanner.run();
    scanner.doc
}

/// Module name is the file stem: `src/point.c` gives `point`.
fn module_name(path: &Path) -> String {
    path.file_stem()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

struct Scanner<'a> {
    lines: Vec<&'a str>,
    /// Next index into `lines`.
    cursor: usize,
    /// 1-based number of the most recently read line.
    line_num: usize,
    pending: Option<Pending>,
    max_entities: usize,
    truncated: bool,
    doc: Document,
}

impl<'a> Scanner<'a> {
    fn run(&mut self) {
        while let Some((text, column_zero)) = self.next_content_line() {
            if comment::opens_block(text) {
                self.block_comment(text);
                continue;
            }
            if comment::is_line_comment(text) {
                self.pending = Some(Pending {
                    text: comment::clean(text),
                    closed_at: self.line_num,
                });
                continue;
            }

            let line = Line { text, column_zero };
            if let Some(kind) = classify::classify(&line) {
                self.entity(kind, text, self.line_num);
                continue;
            }

            if classify::is_declaration_head(text) && self.join_declaration(text, column_zero) {
                continue;
            }

            // A pending comment dies on the first unclassified line at
            // least two lines past its closer.
            if let Some(p) = &self.pending {
                if p.closed_at + 1 < self.line_num {
                    self.pending = None;
                }
            }
        }
    }

    /// Advance to the next non-blank line, trimmed.
    fn next_content_line(&mut self) -> Option<(&'a str, bool)> {
        while self.cursor < self.lines.len() {
            let raw = self.lines[self.cursor];
            self.cursor += 1;
            self.line_num += 1;
            let text = raw.trim();
            if !text.is_empty() {
                let column_zero = raw.starts_with(|c: char| !c.is_whitespace());
                return Some((text, column_zero));
            }
        }
        None
    }

    /// Advance one line unconditionally, untrimmed.
    fn next_raw_line(&mut self) -> Option<&'a str> {
        if self.cursor < self.lines.len() {
            let raw = self.lines[self.cursor];
            self.cursor += 1;
            self.line_num += 1;
            Some(raw)
        } else {
            None
        }
    }

    /// Consume a block comment. The first one in the file becomes the file
    /// doc; every block comment also becomes the pending doc for whatever
    /// entity follows.
    fn block_comment(&mut self, first: &str) {
        let opened_at = self.line_num;
        let mut raw = first.to_string();
        let mut closed = first.contains("*/");
        while !closed {
            match self.next_raw_line() {
                Some(line) => {
                    raw.push('\n');
                    raw.push_str(line);
                    closed = line.contains("*/");
                }
                None => break,
            }
        }
        if !closed {
            eprintln!(
                "warning: unterminated block comment starting at line {} in {}",
                opened_at, self.doc.filepath
            );
        }
        let cleaned = comment::clean(&raw);
        if self.doc.entities.is_empty() && self.doc.doc.is_none() && !cleaned.is_empty() {
            self.doc.doc = Some(cleaned.clone());
        }
        self.pending = Some(Pending {
            text: cleaned,
            closed_at: self.line_num,
        });
    }

    /// Join a bare declaration head with the next content line and
    /// classify the pair. Rolls back unless the joined text classifies.
    fn join_declaration(&mut self, head: &str, column_zero: bool) -> bool {
        let head_line = self.line_num;
        let saved_cursor = self.cursor;
        let saved_line_num = self.line_num;
        let Some((next, _)) = self.next_content_line() else {
            return false;
        };
        let joined = format!("{} {}", head, next);
        let line = Line {
            text: &joined,
            column_zero,
        };
        match classify::classify(&line) {
            Some(kind) => {
                self.entity(kind, &joined, head_line);
                true
            }
            None => {
                self.cursor = saved_cursor;
                self.line_num = saved_line_num;
                false
            }
        }
    }

    fn entity(&mut self, kind: EntityKind, first_line: &str, start_line: usize) {
        let entity = match kind {
            EntityKind::Include => extract::include(first_line, start_line),
            EntityKind::Macro => {
                let logical = self.macro_text(first_line);
                extract::macro_def(&logical, start_line)
            }
            EntityKind::Struct | EntityKind::Union | EntityKind::Enum => {
                extract::aggregate(kind, first_line, start_line)
            }
            EntityKind::Typedef => {
                let logical = self.reconstruct(first_line, |acc| acc.contains(';'));
                extract::typedef(&logical, start_line)
            }
            EntityKind::Function => {
                let qualifiers = classify::qualifiers(first_line);
                let logical =
                    self.reconstruct(first_line, |acc| acc.contains('{') || acc.contains(';'));
                extract::function(&logical, start_line, qualifiers)
            }
            EntityKind::Variable => {
                let qualifiers = classify::qualifiers(first_line);
                self.consume_initializer(first_line);
                extract::variable(first_line, start_line, qualifiers)
            }
        };
        self.push(entity);
    }

    /// Accumulate raw lines, space-joined and trimmed, until `done`
    /// accepts the accumulated text or input runs out.
    fn reconstruct(&mut self, first_line: &str, done: impl Fn(&str) -> bool) -> String {
        let mut acc = first_line.to_string();
        while !done(&acc) {
            match self.next_raw_line() {
                Some(line) => {
                    acc.push(' ');
                    acc.push_str(line.trim());
                }
                None => break,
            }
        }
        acc
    }

    /// Join backslash continuations; the trailing `\` becomes one space.
    fn macro_text(&mut self, first_line: &str) -> String {
        let mut acc = first_line.to_string();
        while acc.ends_with('\\') {
            acc.pop();
            acc.truncate(acc.trim_end().len());
            acc.push(' ');
            match self.next_raw_line() {
                Some(line) => acc.push_str(line.trim()),
                None => break,
            }
        }
        acc
    }

    /// A brace initializer spills onto following lines; consume them so
    /// the scan resumes after it. The consumed text never joins the
    /// signature.
    fn consume_initializer(&mut self, first_line: &str) {
        if first_line.contains('{') && !first_line.contains('}') {
            while let Some(line) = self.next_raw_line() {
                if line.contains('}') || line.contains(';') {
                    break;
                }
            }
        }
    }

    fn push(&mut self, mut entity: Entity) {
        self.attach_doc(&mut entity);
        if self.doc.entities.len() >= self.max_entities {
            if !self.truncated {
                eprintln!(
                    "warning: entity limit ({}) reached in {}, ignoring the rest",
                    self.max_entities, self.doc.filepath
                );
                self.truncated = true;
            }
            return;
        }
        self.doc.entities.push(entity);
    }

    /// A pending comment attaches when it closed on the line directly
    /// above the entity. Functions also tolerate a close on their own
    /// first line. Includes never take a doc.
    fn attach_doc(&mut self, entity: &mut Entity) {
        if entity.kind == EntityKind::Include {
            return;
        }
        let adjacent = self.pending.as_ref().is_some_and(|p| {
            p.closed_at + 1 == entity.line
                || (entity.kind == EntityKind::Function && p.closed_at == entity.line)
        });
        if adjacent {
            if let Some(p) = self.pending.take() {
                if !p.text.is_empty() {
                    entity.doc = Some(p.text);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> Document {
        scan_source(source, Path::new("test.c"), &ScanOptions::default())
    }

    #[test]
    fn records_entities_in_scan_order() {
        let doc = scan(
            "#include <stdio.h>\n\
             #define MAX 100\n\
             static int count = 0;\n\
             int main(void) {\n\
             }\n",
        );
        let kinds: Vec<EntityKind> = doc.entities.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EntityKind::Include,
                EntityKind::Macro,
                EntityKind::Variable,
                EntityKind::Function
            ]
        );
        let lines: Vec<usize> = doc.entities.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![1, 2, 3, 4]);
    }

    #[test]
    fn macro_keeps_its_definition() {
        let doc = scan("#define MAX 100\n");
        assert_eq!(doc.entities[0].name, "MAX");
        assert_eq!(doc.entities[0].signature, "#define MAX 100");
    }

    #[test]
    fn macro_continuations_join_with_single_spaces() {
        let doc = scan("#define BIG(x) \\\n    ((x) * \\\n     (x))\n");
        assert_eq!(doc.entities.len(), 1);
        assert_eq!(doc.entities[0].name, "BIG");
        assert_eq!(doc.entities[0].signature, "#define BIG(x) ((x) * (x))");
    }

    #[test]
    fn comment_attaches_when_adjacent() {
        let doc = scan("// doubles the input\nint twice(int x) {\n    return x * 2;\n}\n");
        assert_eq!(doc.entities[0].doc.as_deref(), Some("doubles the input"));
    }

    #[test]
    fn blank_line_breaks_attachment() {
        let doc = scan("// stale note\n\nint f(void);\n");
        assert!(doc.entities[0].doc.is_none());
    }

    #[test]
    fn comment_dropped_after_passing_plain_lines() {
        let doc = scan("// note\nx = 1;\ny = 2;\nint f(void);\n");
        assert_eq!(doc.entities.len(), 1);
        assert!(doc.entities[0].doc.is_none());
    }

    #[test]
    fn first_block_comment_is_the_file_doc() {
        let doc = scan("/**\n * Point helpers.\n */\nint f(void);\n");
        assert_eq!(doc.doc.as_deref(), Some("Point helpers."));
        // Adjacency also hands it to the first entity.
        assert_eq!(doc.entities[0].doc.as_deref(), Some("Point helpers."));
    }

    #[test]
    fn later_block_comments_document_entities_not_the_file() {
        let doc = scan("/* one */\n\n/* two */\nint f(void);\n");
        assert_eq!(doc.doc.as_deref(), Some("one"));
        assert_eq!(doc.entities[0].doc.as_deref(), Some("two"));
    }

    #[test]
    fn include_never_takes_a_doc() {
        let doc = scan("// for printf\n#include <stdio.h>\n");
        assert!(doc.entities[0].doc.is_none());
    }

    #[test]
    fn split_declaration_joins_with_the_head() {
        let doc = scan(
            "/* adds */\n\
             static int\n\
             add(int a, int b)\n\
             {\n\
                 return a + b;\n\
             }\n",
        );
        assert_eq!(doc.entities.len(), 1);
        let f = &doc.entities[0];
        assert_eq!(f.kind, EntityKind::Function);
        assert_eq!(f.name, "add");
        assert_eq!(f.line, 2);
        assert_eq!(f.signature, "static int add(int a, int b)");
        assert_eq!(f.return_type.as_deref(), Some("static int"));
        assert!(f.qualifiers.is_static);
        assert_eq!(f.doc.as_deref(), Some("adds"));
    }

    #[test]
    fn head_join_rolls_back_when_the_pair_is_nonsense() {
        let doc = scan("static int\n#define LATE 1\n");
        assert_eq!(doc.entities.len(), 1);
        assert_eq!(doc.entities[0].kind, EntityKind::Macro);
        assert_eq!(doc.entities[0].name, "LATE");
    }

    #[test]
    fn struct_members_are_not_entities() {
        let doc = scan("struct Point {\n    int x;\n    int y;\n};\n");
        assert_eq!(doc.entities.len(), 1);
        assert_eq!(doc.entities[0].kind, EntityKind::Struct);
        assert_eq!(doc.entities[0].name, "Point");
        assert_eq!(doc.entities[0].signature, "struct Point");
    }

    #[test]
    fn one_line_struct_records_no_member_entities() {
        let doc = scan("struct Point { int x; int y; };\n");
        assert_eq!(doc.entities.len(), 1);
        assert_eq!(doc.entities[0].kind, EntityKind::Struct);
        assert_eq!(doc.entities[0].name, "Point");
        assert_eq!(doc.entities[0].signature, "struct Point");
    }

    #[test]
    fn typedef_struct_stays_one_entity() {
        let doc = scan("typedef struct {\n    int x;\n    int y;\n} Point;\n");
        assert_eq!(doc.entities.len(), 1);
        assert_eq!(doc.entities[0].kind, EntityKind::Typedef);
        // Reconstruction stops at the first member terminator, so the
        // name degrades to the member. Heuristic, recorded as-is.
        assert_eq!(doc.entities[0].name, "x");
        assert_eq!(doc.entities[0].line, 1);
    }

    #[test]
    fn anonymous_enum_gets_a_placeholder() {
        let doc = scan("enum { PATH_OK, PATH_FULL };\n");
        assert_eq!(doc.entities[0].name, "(anonymous enum)");
    }

    #[test]
    fn multiline_initializer_is_consumed() {
        let doc = scan(
            "static const int offsets[4] = {\n    -1, 0,\n    1, 0,\n};\nint after(void);\n",
        );
        assert_eq!(doc.entities.len(), 2);
        assert_eq!(doc.entities[0].name, "offsets");
        assert_eq!(doc.entities[0].signature, "static const int offsets[4]");
        assert_eq!(doc.entities[1].name, "after");
        assert_eq!(doc.entities[1].line, 5);
    }

    #[test]
    fn unterminated_comment_swallows_the_rest() {
        let doc = scan("/* never closed\nint f(void);\n");
        assert!(doc.entities.is_empty());
        assert!(doc.doc.as_deref().is_some_and(|d| d.contains("never closed")));
    }

    #[test]
    fn entity_cap_truncates() {
        let options = ScanOptions { max_entities: 2 };
        let doc = scan_source(
            "#define A 1\n#define B 2\n#define C 3\n",
            Path::new("test.c"),
            &options,
        );
        assert_eq!(doc.entities.len(), 2);
        assert_eq!(doc.entities[1].name, "B");
    }

    #[test]
    fn scanning_twice_yields_identical_documents() {
        let source = "/* doc */\n#define A 1\nstatic int x = 2;\nint f(void);\n";
        let mut first = scan(source);
        let mut second = scan(source);
        first.generated_at.clear();
        second.generated_at.clear();
        assert_eq!(first, second);
    }

    #[test]
    fn module_name_is_the_file_stem() {
        assert_eq!(module_name(Path::new("src/point.c")), "point");
        assert_eq!(module_name(Path::new("noext")), "noext");
    }

    #[test]
    fn generated_at_is_a_space_separated_timestamp() {
        let doc = scan("int f(void);\n");
        assert_eq!(doc.generated_at.len(), 19);
        assert_eq!(doc.generated_at.as_bytes()[10], b' ');
    }
}
