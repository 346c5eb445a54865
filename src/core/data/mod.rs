pub mod source;
pub mod symbol;

pub use source::{SourceContext, SourceLocation};
pub use symbol::{AdditionalFile, NamedTypeSymbol, TypeKind};
