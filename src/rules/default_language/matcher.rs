//! Correlation of marked resource files with declared type names.

use std::collections::HashSet;

use super::marker::MarkerScan;
use crate::core::{NamedTypeSymbol, SourceContext};

/// Base names of resource files that carry the marker.
///
/// Built once per compilation and read-only afterwards, so it can be shared
/// by reference across the threads delivering symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QualifyingNameSet {
    names: HashSet<String>,
}

impl QualifyingNameSet {
    pub fn from_scans<'a>(scans: impl IntoIterator<Item = MarkerScan<'a>>) -> Self {
        let names = scans
            .into_iter()
            .filter(|scan| scan.has_marker)
            .filter_map(|scan| scan.base_name.map(str::to_string))
            .collect();
        Self { names }
    }

    /// Exact, case-sensitive membership test.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Declaration locations of a symbol whose name has a marked resource file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifyingLocations<'a> {
    pub type_name: &'a str,
    pub locations: &'a [SourceContext],
}

/// Test a symbol against the name set.
pub fn match_symbol<'a>(
    names: &QualifyingNameSet,
    symbol: &'a NamedTypeSymbol,
) -> Option<QualifyingLocations<'a>> {
    names.contains(&symbol.name).then_some(QualifyingLocations {
        type_name: &symbol.name,
        locations: &symbol.locations,
    })
}
