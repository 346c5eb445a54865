//! Marker scanning over resource files.

use crate::core::{AdditionalFile, CancellationToken, Cancelled};

/// Literal token a resource file carries when its form explicitly overrides
/// the language instead of inheriting the default culture.
pub const MARKER_TOKEN: &str = "$this.Language";

/// Scan result for a single additional file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerScan<'a> {
    pub path: &'a str,
    /// File name without extension, present only when the marker was found.
    pub base_name: Option<&'a str>,
    pub has_marker: bool,
}

pub fn contains_marker(text: &str) -> bool {
    text.contains(MARKER_TOKEN)
}

/// Scan every file once for the marker token.
///
/// Output preserves input order. Stops with `Cancelled` as soon as the token
/// is cancelled; a file is never reported half-scanned.
pub fn scan_markers<'a>(
    files: &'a [AdditionalFile],
    cancellation: &CancellationToken,
) -> Result<Vec<MarkerScan<'a>>, Cancelled> {
    files
        .iter()
        .map(|file| {
            cancellation.check()?;
            let has_marker = contains_marker(&file.text);
            Ok(MarkerScan {
                path: &file.path,
                base_name: if has_marker { file.base_name() } else { None },
                has_marker,
            })
        })
        .collect()
}
