//! Diagnostic emission for matched declarations.

use super::matcher::QualifyingLocations;
use crate::{config::DESIGNER_FILE_SUFFIX, issues::DefaultLanguageIssue};

/// File-path suffixes excluded from reporting, compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreFilter {
    suffixes: Vec<String>,
}

impl IgnoreFilter {
    pub fn new<S: AsRef<str>>(suffixes: impl IntoIterator<Item = S>) -> Self {
        Self {
            suffixes: suffixes
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn is_ignored(&self, file_path: &str) -> bool {
        let path = file_path.to_lowercase();
        self.suffixes.iter().any(|suffix| path.ends_with(suffix))
    }
}

impl Default for IgnoreFilter {
    fn default() -> Self {
        Self::new([DESIGNER_FILE_SUFFIX])
    }
}

/// One diagnostic per location that is not excluded by the filter.
pub fn report_diagnostics(
    matched: &QualifyingLocations<'_>,
    filter: &IgnoreFilter,
) -> Vec<DefaultLanguageIssue> {
    matched
        .locations
        .iter()
        .filter(|ctx| !filter.is_ignored(ctx.file_path()))
        .map(|ctx| DefaultLanguageIssue {
            context: ctx.clone(),
            type_name: matched.type_name.to_string(),
        })
        .collect()
}
