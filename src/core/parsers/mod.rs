pub mod csharp;
mod preprocessor;

pub use csharp::{
    SyntaxTree, TypeDeclarationSyntax, parse_csharp_source, parse_csharp_source_with_symbols,
};
