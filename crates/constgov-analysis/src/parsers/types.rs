//! Fact types produced by extraction. Immutable once a run has collected them.

use serde::{Deserialize, Serialize};

/// Value of a named integer constant.
///
/// Anything that is not a plain integer literal is kept as `Unparsed` with its
/// source text, so a failed parse is never mistaken for a real zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ConstantValue {
    Int(i64),
    Unparsed(String),
}

impl ConstantValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Unparsed(_) => None,
        }
    }

    pub fn is_unparsed(&self) -> bool {
        matches!(self, Self::Unparsed(_))
    }
}

impl std::fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Unparsed(expr) => write!(f, "unparsed({expr})"),
        }
    }
}

/// Comments attached to a constant, with comment markers stripped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachedComment {
    /// Doc comment above the `const` keyword of the enclosing group.
    pub group_doc: Vec<String>,
    /// Doc comment directly above the constant's own spec.
    pub doc: Vec<String>,
    /// Comment on the same line as the constant.
    pub trailing: Option<String>,
}

impl AttachedComment {
    /// All non-empty comment lines in source order.
    pub fn lines(&self) -> Vec<String> {
        self.group_doc
            .iter()
            .chain(self.doc.iter())
            .chain(self.trailing.iter())
            .filter(|line| !line.trim().is_empty())
            .cloned()
            .collect()
    }

    /// All comment lines joined with single spaces.
    pub fn text(&self) -> String {
        self.lines().join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.lines().is_empty()
    }
}

/// A named integer constant. Identity is `(name, file)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantDefinition {
    pub name: String,
    pub value: ConstantValue,
    pub file: String,
    pub line: u32,
    /// Declaring package.
    pub package: String,
    pub comment: AttachedComment,
    /// Target of an `@see` annotation in the comment, if present.
    pub reference_tag: Option<String>,
}

/// A bare integer literal outside any constant declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericLiteral {
    pub value: i64,
    pub file: String,
    pub line: u32,
    pub column: u32,
    /// The trimmed source line.
    pub context: String,
}

impl NumericLiteral {
    pub fn position(&self) -> String {
        format!("{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A top-level function declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    pub file: String,
    pub line: u32,
    /// Result type text, e.g. `bool`, `error`, `(int, error)`.
    pub result: Option<String>,
}

/// A package-level variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDecl {
    pub name: String,
    pub file: String,
    pub line: u32,
}

/// Everything extracted from one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFacts {
    pub path: String,
    pub package: String,
    pub constants: Vec<ConstantDefinition>,
    pub literals: Vec<NumericLiteral>,
    pub functions: Vec<FunctionDecl>,
    pub variables: Vec<VariableDecl>,
}

impl FileFacts {
    /// File name component of `path`.
    pub fn file_name(&self) -> &str {
        file_name_of(&self.path)
    }
}

/// File name component of a `/`-separated path.
pub fn file_name_of(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
