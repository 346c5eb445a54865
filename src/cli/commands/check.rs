use anyhow::Result;

use super::super::{args::CheckCommand, exit_status::ExitStatus, report};
use crate::{
    core::CheckContext,
    issues::{Issue, Severity},
    rules::default_language::check_default_language_issues,
};

pub fn check(cmd: CheckCommand) -> Result<ExitStatus> {
    let verbose = cmd.common.verbose;
    let ctx = CheckContext::new(&cmd.common)?;

    let mut issues: Vec<Issue> = check_default_language_issues(&ctx)?
        .into_iter()
        .map(Issue::DefaultLanguage)
        .collect();

    let parse_errors = ctx.parse_errors();
    issues.extend(parse_errors.iter().cloned().map(Issue::ParseError));

    if issues.is_empty() {
        report::print_success(ctx.source_files.len(), ctx.resource_files.len());
    } else {
        report::report(&issues);
    }
    report::print_parse_warning(parse_errors.len(), verbose);

    if issues.iter().any(|i| i.severity() == Severity::Error) {
        Ok(ExitStatus::Failure)
    } else {
        Ok(ExitStatus::Success)
    }
}
