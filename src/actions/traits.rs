//! Action trait definition.
//!
//! Actions turn issues into deferred fixes. Each Action can be implemented
//! for multiple Issue types, providing type-safe handling.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::Result;
use colored::Colorize;

use super::{apply::FixOutcome, deferred::DeferredFix, plan::FixPlan};
use crate::core::CheckContext;

/// Statistics from running an action.
#[derive(Debug, Clone, Default)]
pub struct ActionStats {
    /// Number of issues a fix was registered for.
    pub processed: usize,
    /// Number of issues skipped (no enclosing declaration, unparsed file).
    pub skipped: usize,
    /// Number of fixes that changed a file.
    pub changes_applied: usize,
    /// Number of files modified.
    pub files_modified: usize,
    /// Number of fixes whose computation or write failed.
    pub failed: usize,
}

impl std::ops::AddAssign for ActionStats {
    fn add_assign(&mut self, other: Self) {
        self.processed += other.processed;
        self.skipped += other.skipped;
        self.changes_applied += other.changes_applied;
        self.files_modified += other.files_modified;
        self.failed += other.failed;
    }
}

/// Planned changes of a dry run, one per resource file.
#[derive(Debug, Default)]
pub struct ActionPreview {
    pub plans: Vec<FixPlan>,
    pub stats: ActionStats,
}

/// Action trait - registers fixes for issues and executes them.
///
/// # Example
///
/// ```ignore
/// // In command code:
/// if apply {
///     RestoreDefaultLanguage::run(&ctx, &issues)?;
/// } else {
///     RestoreDefaultLanguage::preview(&ctx, &issues)?;
/// }
/// ```
pub trait Action<I> {
    /// Register the fix for one issue.
    ///
    /// This is the only method that must be implemented.
    fn to_fix(ctx: &CheckContext, issue: &I) -> Result<DeferredFix>;

    /// Commit the fix of every issue, one after another.
    ///
    /// Issues sharing a resource file are fixed by the first commit; the
    /// later ones find nothing left to remove. A failed fix is counted and
    /// the batch continues; cancellation stops it.
    fn run(ctx: &CheckContext, issues: &[I]) -> Result<ActionStats> {
        let mut stats = ActionStats::default();
        let mut files_modified = BTreeSet::new();

        for fix in register_fixes::<Self, I>(ctx, issues, &mut stats) {
            match fix.compute_commit(ctx.cancellation()) {
                Ok(FixOutcome::Applied(plan)) => {
                    stats.changes_applied += 1;
                    files_modified.insert(plan.resource_file_path);
                }
                Ok(_) => {}
                Err(e) if e.is_cancelled() => return Err(e.into()),
                Err(e) => {
                    stats.failed += 1;
                    eprintln!("{} {}", "warning:".bold().yellow(), e);
                }
            }
        }

        stats.files_modified = files_modified.len();
        Ok(stats)
    }

    /// Compute the planned changes without writing (dry-run mode).
    fn preview(ctx: &CheckContext, issues: &[I]) -> Result<ActionPreview> {
        let mut stats = ActionStats::default();
        let mut plans = BTreeMap::new();

        for fix in register_fixes::<Self, I>(ctx, issues, &mut stats) {
            if let FixOutcome::Preview(plan) = fix.compute_preview(ctx.cancellation())? {
                plans.entry(plan.resource_file_path.clone()).or_insert(plan);
            }
        }

        stats.files_modified = plans.len();
        Ok(ActionPreview {
            plans: plans.into_values().collect(),
            stats,
        })
    }
}

fn register_fixes<A, I>(ctx: &CheckContext, issues: &[I], stats: &mut ActionStats) -> Vec<DeferredFix>
where
    A: Action<I> + ?Sized,
{
    let mut fixes = Vec::with_capacity(issues.len());
    for issue in issues {
        match A::to_fix(ctx, issue) {
            Ok(fix) => {
                stats.processed += 1;
                fixes.push(fix);
            }
            Err(e) => {
                stats.skipped += 1;
                if ctx.verbose {
                    eprintln!("{} {:#}", "warning:".bold().yellow(), e);
                }
            }
        }
    }
    fixes
}
