//! Issue types for analysis results.
//!
//! Each issue is self-contained with all information needed by:
//! - Reporter: to display the issue to users
//! - Action: to fix the issue (restore the default language of a resource file)

use enum_dispatch::enum_dispatch;

use crate::core::SourceContext;

// ============================================================
// Severity, Category and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    DefaultLanguage,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::DefaultLanguage => write!(f, "default-language"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Diagnostic Descriptor
// ============================================================

/// Fixed identity of a reported rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticDescriptor {
    pub id: &'static str,
    pub title: &'static str,
    /// Message template; `{0}`, `{1}`, ... are replaced by the message arguments.
    pub message_format: &'static str,
    pub category: &'static str,
    pub default_severity: Severity,
    pub enabled_by_default: bool,
}

impl DiagnosticDescriptor {
    pub fn format_message(&self, args: &[&str]) -> String {
        args.iter()
            .enumerate()
            .fold(self.message_format.to_string(), |message, (i, arg)| {
                message.replace(&format!("{{{}}}", i), arg)
            })
    }
}

// ============================================================
// Issue Types
// ============================================================

/// Type whose companion resource file still overrides the default language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultLanguageIssue {
    /// Identifier location of one declaration of the type.
    pub context: SourceContext,
    /// Simple name of the offending type.
    pub type_name: String,
}

impl DefaultLanguageIssue {
    pub fn descriptor() -> &'static DiagnosticDescriptor {
        &crate::rules::default_language::DEFAULT_LANGUAGE_RULE
    }

    pub fn severity() -> Severity {
        Self::descriptor().default_severity
    }

    pub fn rule() -> Rule {
        Rule::DefaultLanguage
    }

    pub fn rule_id(&self) -> &'static str {
        Self::descriptor().id
    }
}

/// File could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// An issue found during analysis.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    DefaultLanguage(DefaultLanguageIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::DefaultLanguage(_) => DefaultLanguageIssue::severity(),
            Issue::ParseError(_) => ParseErrorIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::DefaultLanguage(_) => DefaultLanguageIssue::rule(),
            Issue::ParseError(_) => ParseErrorIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Source code location (has source_line for context display).
    Source(&'a SourceContext),
    /// File-level only (for ParseError - no line context).
    File { path: &'a str },
}

/// Trait for types that can be reported to CLI.
///
/// Uses `enum_dispatch` for zero-cost dispatch on the `Issue` enum.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Rule id shown next to the message (e.g. `A0001`).
    fn code(&self) -> Option<&'static str> {
        None
    }

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }
}

impl Report for DefaultLanguageIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        Self::descriptor().format_message(&[&self.type_name])
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn code(&self) -> Option<&'static str> {
        Some(self.rule_id())
    }

    fn hint(&self) -> Option<&str> {
        Some("run `relang fix --apply` to restore the default language")
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}
