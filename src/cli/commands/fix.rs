//! Fix command - Restore the default language of flagged resource files.
//!
//! For every default-language issue, the `$this.Language` metadata block is
//! removed from the `<TypeName>.resx` file next to the declaring source file.
//! Issues whose directory has no such file are left alone.
//!
//! Use `--apply` to actually rewrite files (default is dry-run mode, which
//! prints a unified diff per resource file).

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::{args::FixCommand, exit_status::ExitStatus, report};
use crate::{
    actions::{Action, FixPlan, RestoreDefaultLanguage},
    core::CheckContext,
    issues::DefaultLanguageIssue,
    rules::default_language::check_default_language_issues,
};

pub fn fix(cmd: FixCommand) -> Result<ExitStatus> {
    let verbose = cmd.common.verbose;
    let ctx = CheckContext::new(&cmd.common)?;

    let mut issues = check_default_language_issues(&ctx)?;
    if let Some(document) = &cmd.document {
        issues = filter_document(issues, document)?;
    }

    let parse_error_count = ctx.parse_errors().len();

    if issues.is_empty() {
        report::print_success(ctx.source_files.len(), ctx.resource_files.len());
        report::print_parse_warning(parse_error_count, verbose);
        return Ok(exit_status(parse_error_count, false));
    }

    let mut failed = 0;
    let pending = if cmd.apply {
        let stats = RestoreDefaultLanguage::run(&ctx, &issues)?;
        if stats.files_modified > 0 {
            println!(
                "{} the default language in {} resource file(s) (processed {} issue(s)).",
                "Restored".green().bold(),
                stats.files_modified,
                stats.processed
            );
        } else {
            print_nothing_to_fix(issues.len());
        }
        print_skipped(stats.skipped);
        if stats.failed > 0 {
            println!(
                "{} {} fix(es) failed",
                report::FAILURE_MARK.red(),
                stats.failed
            );
        }
        failed = stats.failed;
        false
    } else {
        let preview = RestoreDefaultLanguage::preview(&ctx, &issues)?;
        for plan in &preview.plans {
            print_plan(plan);
        }
        if preview.plans.is_empty() {
            print_nothing_to_fix(issues.len());
        } else {
            println!(
                "{} the default language in {} resource file(s).",
                "Would restore".yellow().bold(),
                preview.plans.len()
            );
            println!("Run with {} to rewrite these files.", "--apply".cyan());
        }
        print_skipped(preview.stats.skipped);
        !preview.plans.is_empty()
    };

    report::print_parse_warning(parse_error_count, verbose);

    Ok(exit_status(parse_error_count + failed, pending))
}

/// Unreadable sources and failed fixes are errors (exit 2). In dry-run
/// mode, pending changes are a "Failure" (exit 1) to signal that there's
/// work to be done.
fn exit_status(error_count: usize, pending: bool) -> ExitStatus {
    if error_count > 0 {
        ExitStatus::Error
    } else if pending {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    }
}

/// Keep the issues reported in `document`.
fn filter_document(
    issues: Vec<DefaultLanguageIssue>,
    document: &Path,
) -> Result<Vec<DefaultLanguageIssue>> {
    let document = document
        .canonicalize()
        .with_context(|| format!("Document not found: {}", document.display()))?;

    Ok(issues
        .into_iter()
        .filter(|issue| {
            Path::new(issue.context.file_path())
                .canonicalize()
                .is_ok_and(|path| path == document)
        })
        .collect())
}

fn print_plan(plan: &FixPlan) {
    for line in plan.render_diff().lines() {
        let colored_line = if line.starts_with("+++") || line.starts_with("---") {
            line.bold()
        } else if line.starts_with('+') {
            line.green()
        } else if line.starts_with('-') {
            line.red()
        } else if line.starts_with("@@") {
            line.cyan()
        } else {
            line.normal()
        };
        println!("{}", colored_line);
    }
    println!();
}

fn print_nothing_to_fix(issue_count: usize) {
    println!(
        "{} {} issue(s) found, but no companion resource file needs changes.",
        report::FAILURE_MARK.red(),
        issue_count
    );
}

fn print_skipped(skipped: usize) {
    if skipped > 0 {
        println!(
            "  - skipped: {} issue(s) without a resolvable type declaration",
            skipped
        );
    }
}
