//! Data model for extracted documentation, shared by every renderer.

/// What a scanned construct turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntityKind {
    #[default]
    Function,
    Struct,
    Union,
    Enum,
    Typedef,
    Macro,
    Variable,
    Include,
}

impl EntityKind {
    /// Lowercase label shared by every renderer.
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Function => "function",
            EntityKind::Struct => "struct",
            EntityKind::Union => "union",
            EntityKind::Enum => "enum",
            EntityKind::Typedef => "typedef",
            EntityKind::Macro => "macro",
            EntityKind::Variable => "variable",
            EntityKind::Include => "include",
        }
    }

    /// Kinds grouped under the TYPES section of rendered output.
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            EntityKind::Struct | EntityKind::Union | EntityKind::Enum | EntityKind::Typedef
        )
    }
}

/// Storage-class qualifiers detected on the declaration's first line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Qualifiers {
    pub is_static: bool,
    pub is_inline: bool,
    pub is_extern: bool,
}

impl Qualifiers {
    pub fn is_empty(&self) -> bool {
        !(self.is_static || self.is_inline || self.is_extern)
    }

    /// Present qualifier names, in declaration order.
    pub fn labels(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.is_static {
            out.push("static");
        }
        if self.is_inline {
            out.push("inline");
        }
        if self.is_extern {
            out.push("extern");
        }
        out
    }
}

/// A single top-level construct recognized in the source.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Entity {
    /// Best-effort identifier. May be empty, or a placeholder like
    /// "(anonymous struct)".
    pub name: String,
    pub kind: EntityKind,
    /// 1-based line where the construct begins.
    pub line: usize,
    /// Logical declaration line, cut at the kind's terminator.
    pub signature: String,
    /// Functions only: the text before the name, e.g. "static int".
    pub return_type: Option<String>,
    /// Cleaned adjacent comment. Never `Some("")`.
    pub doc: Option<String>,
    pub qualifiers: Qualifiers,
}

/// Everything extracted from one source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub filepath: String,
    /// File stem, e.g. "point" for src/point.c.
    pub module_name: String,
    /// Local time of the scan, "%Y-%m-%d %H:%M:%S".
    pub generated_at: String,
    /// First block comment, when it precedes every entity.
    pub doc: Option<String>,
    pub entities: Vec<Entity>,
}

impl Document {
    /// Entities of one kind, in source order.
    pub fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |e| e.kind == kind)
    }

    /// Struct, union, enum and typedef entities, in source order.
    pub fn types(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.kind.is_type())
    }
}
