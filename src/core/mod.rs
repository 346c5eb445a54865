//! Core analysis engine.
//!
//! - `data`: source locations, additional files and named type symbols
//! - `file_scanner`: project walk producing `.cs` and `.resx` file lists
//! - `parsers`: tree-sitter C# declaration parser with a preprocessor pass
//! - `symbols`: merging of partial declarations into named types
//! - `context`: per-run snapshot driving the rules
//! - `cancellation`: cooperative cancellation shared with the host

pub mod cancellation;
pub mod context;
pub mod data;
pub mod file_scanner;
pub mod parsers;
pub mod symbols;

pub use cancellation::{CancellationToken, Cancelled};
pub use context::CheckContext;
pub use data::{AdditionalFile, NamedTypeSymbol, SourceContext, SourceLocation, TypeKind};
