//! Named type enumeration across all parsed source files.

use std::collections::BTreeMap;

use crate::core::{NamedTypeSymbol, parsers::SyntaxTree};

/// Merge the declarations of every syntax tree into named type symbols.
///
/// Declarations sharing a qualified name (partial types) become one symbol
/// with one location per declaration. Output is ordered by qualified name,
/// and locations by file path then line.
pub fn collect_named_types<'a>(
    trees: impl IntoIterator<Item = &'a SyntaxTree>,
) -> Vec<NamedTypeSymbol> {
    let mut symbols: BTreeMap<String, NamedTypeSymbol> = BTreeMap::new();

    for tree in trees {
        for (index, decl) in tree.declarations.iter().enumerate() {
            let qualified_name = tree.qualified_name(index);
            symbols
                .entry(qualified_name.clone())
                .or_insert_with(|| NamedTypeSymbol {
                    name: decl.identifier.clone(),
                    qualified_name,
                    kind: decl.kind,
                    locations: Vec::new(),
                })
                .locations
                .push(decl.identifier_context.clone());
        }
    }

    symbols
        .into_values()
        .map(|mut symbol| {
            symbol.locations.sort_by(|a, b| a.location.cmp(&b.location));
            symbol
        })
        .collect()
}
