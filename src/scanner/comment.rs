//! Comment bookkeeping: raw comment cleaning and the pending record.

/// A cleaned comment waiting for the entity it may document.
#[derive(Debug, Clone)]
pub struct Pending {
    pub text: String,
    /// Line the comment closed on: the `*/` line, or the `//` line itself.
    pub closed_at: usize,
}

/// True when the trimmed line opens a block comment.
pub fn opens_block(line: &str) -> bool {
    line.starts_with("/*")
}

/// True when the trimmed line is a `//` comment.
pub fn is_line_comment(line: &str) -> bool {
    line.starts_with("//")
}

/// Strip the comment delimiters and per-line `*` gutters from raw comment
/// text. Inner blank lines survive; the result is trimmed as a whole.
pub fn clean(raw: &str) -> String {
    let mut text = raw.trim();
    for opener in ["/**", "/*", "//"] {
        if let Some(rest) = text.strip_prefix(opener) {
            text = rest;
            break;
        }
    }

    let mut lines = Vec::new();
    for line in text.split('\n') {
        let mut line = line.trim_start_matches([' ', '\t']);
        // One gutter star per line, but never eat into the closer.
        if line.starts_with('*') && !line.starts_with("*/") {
            line = &line[1..];
            line = line.strip_prefix(' ').unwrap_or(line);
        }
        lines.push(line.replace("*/", ""));
    }
    lines.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_line_comment() {
        assert_eq!(clean("// increment the counter"), "increment the counter");
    }

    #[test]
    fn cleans_single_line_block() {
        assert_eq!(clean("/* width in cells */"), "width in cells");
    }

    #[test]
    fn cleans_doc_block_with_gutter() {
        let raw = "/**\n * Sum two points.\n * Returns a new point.\n */";
        assert_eq!(clean(raw), "Sum two points.\nReturns a new point.");
    }

    #[test]
    fn keeps_inner_blank_lines() {
        let raw = "/*\n * first\n *\n * second\n */";
        assert_eq!(clean(raw), "first\n\nsecond");
    }

    #[test]
    fn empty_comment_cleans_to_empty() {
        assert_eq!(clean("/* */"), "");
        assert_eq!(clean("//"), "");
    }

    #[test]
    fn recognizes_openers() {
        assert!(opens_block("/* x"));
        assert!(opens_block("/** doc"));
        assert!(!opens_block("int x;"));
        assert!(is_line_comment("// x"));
        assert!(!is_line_comment("/ x"));
    }
}
