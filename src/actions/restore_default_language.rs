//! RestoreDefaultLanguage action - strip the language marker from a resource file.
//!
//! For each default-language issue, resolves the type declaration enclosing
//! the diagnostic and registers a deferred fix that removes the marker block
//! from `<TypeName>.resx` next to the declaring file.

use std::path::PathBuf;

use anyhow::{Context, Result};

use super::{
    apply::apply_plan,
    deferred::DeferredFix,
    plan::plan_fix,
    traits::Action,
};
use crate::{
    core::{CheckContext, parsers::SyntaxTree},
    issues::DefaultLanguageIssue,
    rules::default_language::DIAGNOSTIC_ID,
};

/// Title shown to the user; also the equivalence key.
pub const FIX_TITLE: &str = "Restore the default language";

pub struct RestoreDefaultLanguage;

impl RestoreDefaultLanguage {
    pub fn fixable_diagnostic_ids() -> &'static [&'static str] {
        &[DIAGNOSTIC_ID]
    }

    /// Register the fix for `issue`, whose location lies in `tree`.
    ///
    /// Only the declaration lookup happens here; the resource file is not
    /// touched until the returned fix is computed.
    pub fn register_fix(issue: &DefaultLanguageIssue, tree: &SyntaxTree) -> Result<DeferredFix> {
        let ctx = &issue.context;
        let declaration = tree
            .find_enclosing_type_declaration(ctx.line(), ctx.col())
            .with_context(|| {
                format!(
                    "No type declaration found at {}:{}:{}",
                    ctx.file_path(),
                    ctx.line(),
                    ctx.col()
                )
            })?;

        let type_name = declaration.identifier.clone();
        let declaring_file = PathBuf::from(declaration.identifier_context.file_path());

        let fix = DeferredFix::builder()
            .title(FIX_TITLE)
            .equivalence_key(FIX_TITLE)
            .compute(move |cancellation, mode| {
                cancellation.check()?;
                let plan = plan_fix(&declaring_file, &type_name)?;
                apply_plan(plan, mode)
            })
            .build()?;

        Ok(fix)
    }
}

impl Action<DefaultLanguageIssue> for RestoreDefaultLanguage {
    fn to_fix(ctx: &CheckContext, issue: &DefaultLanguageIssue) -> Result<DeferredFix> {
        let file_path = issue.context.file_path();
        let tree = ctx
            .syntax_tree(file_path)
            .with_context(|| format!("Source file was not parsed: {}", file_path))?;
        Self::register_fix(issue, tree)
    }
}
