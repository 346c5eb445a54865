//! Default language override detection rule.
//!
//! Flags every declaration of a type whose companion `.resx` file still
//! contains the `$this.Language` marker. The marker means the form's
//! `Language` property was switched away from the default culture, which
//! makes the designer serialize every localizable property of the form into
//! the culture-specific resource set.
//!
//! The rule is split into host-facing handlers:
//! - [`DefaultLanguageAnalyzer::on_compilation_start`] scans the additional
//!   files once and captures the qualifying names in a [`CompilationAnalysis`];
//! - [`CompilationAnalysis::on_symbol`] is invoked per named type, possibly
//!   from several threads at once.

pub mod marker;
pub mod matcher;
pub mod reporter;

use anyhow::Result;
use rayon::prelude::*;

pub use marker::{MARKER_TOKEN, contains_marker, scan_markers};
pub use matcher::{QualifyingLocations, QualifyingNameSet, match_symbol};
pub use reporter::{IgnoreFilter, report_diagnostics};

use crate::{
    core::{AdditionalFile, CancellationToken, Cancelled, CheckContext, NamedTypeSymbol},
    issues::{DefaultLanguageIssue, DiagnosticDescriptor, Severity},
};

pub const DIAGNOSTIC_ID: &str = "A0001";

pub static DEFAULT_LANGUAGE_RULE: DiagnosticDescriptor = DiagnosticDescriptor {
    id: DIAGNOSTIC_ID,
    title: "Resource file overrides the default language",
    message_format: "Type '{0}' has a resource file that overrides the default language",
    category: "Naming",
    default_severity: Severity::Error,
    enabled_by_default: true,
};

pub struct DefaultLanguageAnalyzer {
    ignore_filter: IgnoreFilter,
}

impl DefaultLanguageAnalyzer {
    pub fn new(ignore_filter: IgnoreFilter) -> Self {
        Self { ignore_filter }
    }

    pub fn supported_diagnostics() -> &'static [DiagnosticDescriptor] {
        std::slice::from_ref(&DEFAULT_LANGUAGE_RULE)
    }

    /// Scan the additional files of a new compilation.
    ///
    /// The returned analysis owns the qualifying names of this compilation
    /// only; nothing outlives it.
    pub fn on_compilation_start(
        &self,
        additional_files: &[AdditionalFile],
        cancellation: &CancellationToken,
    ) -> Result<CompilationAnalysis<'_>, Cancelled> {
        let scans = scan_markers(additional_files, cancellation)?;
        Ok(CompilationAnalysis {
            qualifying_names: QualifyingNameSet::from_scans(scans),
            ignore_filter: &self.ignore_filter,
        })
    }
}

impl Default for DefaultLanguageAnalyzer {
    fn default() -> Self {
        Self::new(IgnoreFilter::default())
    }
}

/// Per-compilation state handed to the symbol handler.
#[derive(Debug)]
pub struct CompilationAnalysis<'a> {
    qualifying_names: QualifyingNameSet,
    ignore_filter: &'a IgnoreFilter,
}

impl CompilationAnalysis<'_> {
    pub fn qualifying_names(&self) -> &QualifyingNameSet {
        &self.qualifying_names
    }

    /// Diagnostics for one named type.
    ///
    /// Pure with respect to `self`; safe to call concurrently.
    pub fn on_symbol(
        &self,
        symbol: &NamedTypeSymbol,
        cancellation: &CancellationToken,
    ) -> Result<Vec<DefaultLanguageIssue>, Cancelled> {
        cancellation.check()?;
        Ok(match_symbol(&self.qualifying_names, symbol)
            .map(|matched| report_diagnostics(&matched, self.ignore_filter))
            .unwrap_or_default())
    }
}

/// Run the rule over the whole project held by `ctx`.
pub fn check_default_language_issues(ctx: &CheckContext) -> Result<Vec<DefaultLanguageIssue>> {
    let analyzer = DefaultLanguageAnalyzer::new(ctx.ignore_filter());
    let cancellation = ctx.cancellation();

    let analysis = analyzer.on_compilation_start(ctx.additional_files(), cancellation)?;
    if analysis.qualifying_names().is_empty() {
        return Ok(Vec::new());
    }

    let per_symbol = ctx
        .named_types()
        .par_iter()
        .map(|symbol| analysis.on_symbol(symbol, cancellation))
        .collect::<Result<Vec<_>, Cancelled>>()?;

    let mut issues: Vec<DefaultLanguageIssue> = per_symbol.into_iter().flatten().collect();
    issues.sort_by(|a, b| a.context.location.cmp(&b.context.location));

    Ok(issues)
}
