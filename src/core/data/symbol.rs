use std::path::Path;

use super::source::SourceContext;

/// A non-source text file handed to the analyzer (a `.resx` resource file).
///
/// Read-only snapshot taken once per compilation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdditionalFile {
    pub path: String,
    pub text: String,
}

impl AdditionalFile {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// File name without its last extension (`Forms/Main.resx` -> `Main`).
    ///
    /// Only the last extension is removed, so culture-specific sidecars such as
    /// `Main.de.resx` keep the culture suffix (`Main.de`).
    pub fn base_name(&self) -> Option<&str> {
        Path::new(&self.path).file_stem().and_then(|s| s.to_str())
    }
}

/// Syntactic kind of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Record,
    Enum,
    Delegate,
}

impl TypeKind {
    /// Whether this kind can carry members and therefore own a fix target.
    ///
    /// Enums and delegates are named types but not type declarations with a
    /// body of members.
    pub fn is_type_declaration(self) -> bool {
        !matches!(self, TypeKind::Enum | TypeKind::Delegate)
    }
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeKind::Class => write!(f, "class"),
            TypeKind::Struct => write!(f, "struct"),
            TypeKind::Interface => write!(f, "interface"),
            TypeKind::Record => write!(f, "record"),
            TypeKind::Enum => write!(f, "enum"),
            TypeKind::Delegate => write!(f, "delegate"),
        }
    }
}

/// A named type seen in the compilation.
///
/// Partial types declared across several files are merged into one symbol,
/// with one location per declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedTypeSymbol {
    /// Simple name, e.g. `MainForm`.
    pub name: String,
    /// Namespace and containing types joined with `.`, e.g. `App.UI.MainForm`.
    pub qualified_name: String,
    pub kind: TypeKind,
    /// Identifier location of every declaration of this symbol.
    pub locations: Vec<SourceContext>,
}
