//! Ordered classification rules for trimmed source lines.
//!
//! Classification is textual: no tokenizer, no AST. Each rule is a named
//! predicate over one trimmed line, and the first match decides the kind.
//! The order is part of the contract: aggregate keywords win over typedef,
//! typedef over function, function over variable.

use crate::model::{EntityKind, Qualifiers};

/// A trimmed source line plus where it sat in the raw text.
#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    pub text: &'a str,
    /// First character of the raw line was non-whitespace.
    pub column_zero: bool,
}

/// One classification rule.
struct Rule {
    /// Table label; pins the order in tests.
    #[allow(dead_code)]
    name: &'static str,
    kind: EntityKind,
    matches: fn(&Line) -> bool,
}

static RULES: &[Rule] = &[
    Rule { name: "include", kind: EntityKind::Include, matches: is_include },
    Rule { name: "macro", kind: EntityKind::Macro, matches: is_macro },
    Rule { name: "struct", kind: EntityKind::Struct, matches: is_struct },
    Rule { name: "union", kind: EntityKind::Union, matches: is_union },
    Rule { name: "enum", kind: EntityKind::Enum, matches: is_enum },
    Rule { name: "typedef", kind: EntityKind::Typedef, matches: is_typedef },
    Rule { name: "function", kind: EntityKind::Function, matches: is_function },
    Rule { name: "variable", kind: EntityKind::Variable, matches: is_variable },
];

// Prefix match, not word match: "interval(x)" passes the type check via
// "int" and "iffy(x)" fails via "if". Accepted heuristic cost.
const TYPE_KEYWORDS: &[&str] = &[
    "void", "int", "char", "long", "short", "unsigned", "signed", "float", "double", "size_t",
    "const",
];

const CONTROL_KEYWORDS: &[&str] = &["if", "while", "for", "switch", "return"];

/// Classify one line. `None` for plain code, body interiors, and
/// directives other than `#include`/`#define`.
pub fn classify(line: &Line) -> Option<EntityKind> {
    if line.text.starts_with('#')
        && !line.text.starts_with("#include")
        && !line.text.starts_with("#define")
    {
        return None;
    }
    RULES
        .iter()
        .find(|rule| (rule.matches)(line))
        .map(|rule| rule.kind)
}

/// Substring qualifier detection over a trimmed declaration line.
pub fn qualifiers(text: &str) -> Qualifiers {
    Qualifiers {
        is_static: text.contains("static "),
        is_inline: text.contains("inline "),
        is_extern: text.contains("extern "),
    }
}

/// A line holding only the type words of a declaration (`static int`,
/// `unsigned long`) with the declarator on the next line. The scanner joins
/// such a line with its successor and reclassifies the pair.
pub fn is_declaration_head(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let plain = text
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '*' || c == ' ' || c == '\t');
    if !plain {
        return false;
    }
    !qualifiers(text).is_empty() || TYPE_KEYWORDS.iter().any(|kw| text.starts_with(kw))
}

fn is_include(line: &Line) -> bool {
    line.text.starts_with("#include")
}

fn is_macro(line: &Line) -> bool {
    line.text.starts_with("#define")
}

fn has_aggregate_keyword(text: &str, keyword: &str) -> bool {
    text.contains(keyword) && !text.contains("typedef")
}

fn is_struct(line: &Line) -> bool {
    has_aggregate_keyword(line.text, "struct ")
}

fn is_union(line: &Line) -> bool {
    has_aggregate_keyword(line.text, "union ")
}

fn is_enum(line: &Line) -> bool {
    has_aggregate_keyword(line.text, "enum ")
}

fn is_typedef(line: &Line) -> bool {
    line.text.starts_with("typedef")
}

fn is_function(line: &Line) -> bool {
    let text = line.text;
    if !text.contains('(') {
        return false;
    }
    if CONTROL_KEYWORDS.iter().any(|kw| text.starts_with(kw)) {
        return false;
    }
    // Assignments, member calls and sizeof expressions are statements,
    // not declarations.
    if text.contains("sizeof") || text.contains("= ") || text.contains("->") || text.contains('.')
    {
        return false;
    }
    !qualifiers(text).is_empty()
        || TYPE_KEYWORDS.iter().any(|kw| text.starts_with(kw))
        || text.contains("* ")
        || text.contains("*\t")
}

fn is_variable(line: &Line) -> bool {
    let text = line.text;
    let file_scope = line.column_zero || text.contains("static ") || text.contains("extern ");
    if !file_scope {
        return false;
    }
    if !(text.contains("static ") || text.starts_with("const ")) {
        return false;
    }
    if text.contains('(') || text.contains("->") {
        return false;
    }
    text.contains('=') || text.contains('[')
}
