//! Per-kind name, signature and return-type extraction.
//!
//! Every extractor is a pure function over the (possibly reconstructed)
//! logical line. Names are best-effort: a name the heuristics cannot reach
//! comes back empty, and the entity is still recorded.

use crate::model::{Entity, EntityKind, Qualifiers};
use regex::Regex;
use std::sync::LazyLock;

// -- Include targets ----------------------------------------------------------

static RE_ANGLE_TARGET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<([^>]*)>").unwrap());

static RE_QUOTE_TARGET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""([^"]*)""#).unwrap());

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Cut a logical line before its body or terminator, then trim.
fn strip_body(text: &str) -> String {
    match text.find(['{', ';']) {
        Some(pos) => text[..pos].trim().to_string(),
        None => text.trim().to_string(),
    }
}

/// Split at the identifier run touching the last non-space character:
/// `"static int add"` becomes `("static int ", "add")`. The anchor
/// character is part of the run even when it is not an identifier
/// character, so degenerate declarators keep their quirks instead of
/// panicking.
fn split_trailing_ident(text: &str) -> Option<(&str, &str)> {
    let trimmed = text.trim_end();
    let (anchor, _) = trimmed.char_indices().last()?;
    let bytes = trimmed.as_bytes();
    let mut start = anchor;
    while start > 0 && is_ident_byte(bytes[start - 1]) {
        start -= 1;
    }
    Some((&trimmed[..start], &trimmed[start..]))
}

/// Function: name is the identifier run before the first `(`, return type
/// is the trimmed text before the name.
pub fn function(logical: &str, line: usize, qualifiers: Qualifiers) -> Entity {
    let signature = strip_body(logical);
    let mut name = String::new();
    let mut return_type = String::new();
    if let Some(paren) = signature.find('(') {
        if let Some((before, run)) = split_trailing_ident(&signature[..paren]) {
            name = run.to_string();
            return_type = before.trim().to_string();
        }
    }
    Entity {
        name,
        kind: EntityKind::Function,
        line,
        signature,
        return_type: Some(return_type),
        doc: None,
        qualifiers,
    }
}

/// Struct/union/enum: the name follows the first occurrence of the bare
/// keyword; anonymous forms get a placeholder.
pub fn aggregate(kind: EntityKind, first_line: &str, line: usize) -> Entity {
    let keyword = kind.label();
    let mut name = String::new();
    if let Some(pos) = first_line.find(keyword) {
        let after = first_line[pos + keyword.len()..].trim_start();
        let bytes = after.as_bytes();
        let mut end = 0;
        while end < bytes.len() && is_ident_byte(bytes[end]) {
            end += 1;
        }
        name = after[..end].to_string();
    }
    if name.is_empty() {
        name = format!("(anonymous {})", keyword);
    }
    Entity {
        name,
        kind,
        line,
        signature: strip_body(first_line),
        return_type: None,
        doc: None,
        qualifiers: Qualifiers::default(),
    }
}

/// Typedef: cut at the first `;`; the name is the identifier run touching
/// the last character. Simple typedefs name correctly; function-pointer
/// and array forms degrade, which is a documented limitation.
pub fn typedef(logical: &str, line: usize) -> Entity {
    let cut = match logical.find(';') {
        Some(pos) => &logical[..pos],
        None => logical,
    };
    let signature = cut.trim().to_string();
    let name = split_trailing_ident(&signature)
        .map(|(_, run)| run.to_string())
        .unwrap_or_default();
    Entity {
        name,
        kind: EntityKind::Typedef,
        line,
        signature,
        return_type: None,
        doc: None,
        qualifiers: Qualifiers::default(),
    }
}

/// Macro: name is the identifier run after `#define`, stopping at `(` for
/// function-like macros. The signature keeps the whole joined definition.
pub fn macro_def(logical: &str, line: usize) -> Entity {
    let signature = logical.trim().to_string();
    let after = signature.strip_prefix("#define").unwrap_or("").trim_start();
    let bytes = after.as_bytes();
    let mut end = 0;
    while end < bytes.len() && is_ident_byte(bytes[end]) {
        end += 1;
    }
    Entity {
        name: after[..end].to_string(),
        kind: EntityKind::Macro,
        line,
        signature,
        return_type: None,
        doc: None,
        qualifiers: Qualifiers::default(),
    }
}

/// Include: the target between `<...>` or `"..."`, angle form first.
pub fn include(text: &str, line: usize) -> Entity {
    let name = RE_ANGLE_TARGET
        .captures(text)
        .or_else(|| RE_QUOTE_TARGET.captures(text))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    Entity {
        name,
        kind: EntityKind::Include,
        line,
        signature: text.trim().to_string(),
        return_type: None,
        doc: None,
        qualifiers: Qualifiers::default(),
    }
}

/// Variable: the signature stops before the initializer. The name walk
/// runs over the uncut line because the terminator check needs the
/// character after the identifier run. Only `static` is recorded.
pub fn variable(first_line: &str, line: usize, qualifiers: Qualifiers) -> Entity {
    let signature = match first_line.find(" = ") {
        Some(pos) => &first_line[..pos],
        None => match first_line.find('{') {
            Some(pos) => &first_line[..pos],
            None => first_line,
        },
    };
    Entity {
        name: variable_name(first_line),
        kind: EntityKind::Variable,
        line,
        signature: signature.trim().to_string(),
        return_type: None,
        doc: None,
        qualifiers: Qualifiers {
            is_static: qualifiers.is_static,
            ..Qualifiers::default()
        },
    }
}

/// Declarator walk: skip one `static ` and one `const ` prefix, then take
/// the first identifier run whose next non-space character is `[`, `=` or
/// `;`. Pointer declarators yield no name.
fn variable_name(text: &str) -> String {
    let mut s = text;
    if let Some(rest) = s.strip_prefix("static ") {
        s = rest;
    }
    s = s.trim_start();
    if let Some(rest) = s.strip_prefix("const ") {
        s = rest;
    }
    s = s.trim_start();

    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() && (is_ident_byte(bytes[i]) || bytes[i] == b' ' || bytes[i] == b'*') {
        if bytes[i] == b' ' && i + 1 < bytes.len() && is_ident_byte(bytes[i + 1]) {
            let start = i + 1;
            let mut end = start;
            while end < bytes.len() && is_ident_byte(bytes[end]) {
                end += 1;
            }
            let mut after = end;
            while after < bytes.len() && bytes[after].is_ascii_whitespace() {
                after += 1;
            }
            if after < bytes.len() && matches!(bytes[after], b'[' | b'=' | b';') {
                return s[start..end].to_string();
            }
            i = start;
        }
        i += 1;
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_name_return_type_and_signature() {
        let e = function("int add(int a, int b) {", 3, Qualifiers::default());
        assert_eq!(e.name, "add");
        assert_eq!(e.signature, "int add(int a, int b)");
        assert_eq!(e.return_type.as_deref(), Some("int"));
    }

    #[test]
    fn function_with_pointer_return() {
        let e = function("char *name_dup(const char *s);", 5, Qualifiers::default());
        assert_eq!(e.name, "name_dup");
        assert_eq!(e.signature, "char *name_dup(const char *s)");
        assert_eq!(e.return_type.as_deref(), Some("char *"));
    }

    #[test]
    fn function_pointer_declaration_degrades() {
        // The run before the first paren is the type itself.
        let e = function("void (*callback)(int)", 8, Qualifiers::default());
        assert_eq!(e.name, "void");
        assert_eq!(e.return_type.as_deref(), Some(""));
    }

    #[test]
    fn aggregate_names() {
        let e = aggregate(EntityKind::Struct, "struct Point {", 17);
        assert_eq!(e.name, "Point");
        assert_eq!(e.signature, "struct Point");

        let e = aggregate(EntityKind::Enum, "enum { A, B };", 31);
        assert_eq!(e.name, "(anonymous enum)");
        assert_eq!(e.signature, "enum");

        let e = aggregate(EntityKind::Struct, "static struct Config defaults = {0};", 4);
        assert_eq!(e.name, "Config");
    }

    #[test]
    fn typedef_simple_name() {
        let e = typedef("typedef unsigned long word_t;", 7);
        assert_eq!(e.name, "word_t");
        assert_eq!(e.signature, "typedef unsigned long word_t");
    }

    #[test]
    fn typedef_function_pointer_degrades() {
        // Known limitation: the trailing run ends at the closing paren.
        let e = typedef("typedef void (*cb)(int);", 9);
        assert_eq!(e.name, "int)");
    }

    #[test]
    fn macro_names() {
        let e = macro_def("#define MAX_POINTS 64", 9);
        assert_eq!(e.name, "MAX_POINTS");
        assert_eq!(e.signature, "#define MAX_POINTS 64");

        let e = macro_def("#define DIST2(a, b) ((a) * (a) + (b) * (b))", 12);
        assert_eq!(e.name, "DIST2");
    }

    #[test]
    fn include_targets() {
        assert_eq!(include("#include <stdio.h>", 1).name, "stdio.h");
        assert_eq!(include("#include \"point.h\"", 2).name, "point.h");
        assert_eq!(include("#include", 3).name, "");
    }

    #[test]
    fn include_signature_is_the_line() {
        let e = include("#include <stdio.h>", 1);
        assert_eq!(e.signature, "#include <stdio.h>");
        assert!(e.doc.is_none());
    }

    #[test]
    fn variable_names() {
        let quals = Qualifiers { is_static: true, ..Qualifiers::default() };
        let e = variable("static int grid_limit = 128;", 23, quals);
        assert_eq!(e.name, "grid_limit");
        assert_eq!(e.signature, "static int grid_limit");
        assert!(e.qualifiers.is_static);

        let e = variable("static const int offsets[4] = {", 26, quals);
        assert_eq!(e.name, "offsets");
        assert_eq!(e.signature, "static const int offsets[4]");
    }

    #[test]
    fn pointer_variable_has_no_name() {
        let quals = Qualifiers { is_static: true, ..Qualifiers::default() };
        let e = variable("static char *version = \"1.0\";", 4, quals);
        assert_eq!(e.name, "");
        assert_eq!(e.signature, "static char *version");
    }

    #[test]
    fn variable_drops_inline_and_extern() {
        let quals = Qualifiers { is_static: false, is_inline: true, is_extern: true };
        let e = variable("extern const char tag[8];", 2, quals);
        assert!(e.qualifiers.is_empty());
    }

    #[test]
    fn splits_trailing_ident_runs() {
        assert_eq!(split_trailing_ident("static int add"), Some(("static int ", "add")));
        assert_eq!(split_trailing_ident("void "), Some(("", "void")));
        assert_eq!(split_trailing_ident(""), None);
    }
}
