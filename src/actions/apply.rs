use std::fs;

use anyhow::{Context, Result};

use super::plan::FixPlan;

/// How a deferred fix is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixMode {
    /// Compute the plan without touching the file system.
    Preview,
    /// Write the planned content.
    Commit,
}

/// Result of executing a fix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixOutcome {
    /// No companion resource file, or nothing to remove.
    NoChange,
    /// Planned change, not written.
    Preview(FixPlan),
    /// Change written to disk.
    Applied(FixPlan),
}

impl FixOutcome {
    pub fn plan(&self) -> Option<&FixPlan> {
        match self {
            FixOutcome::NoChange => None,
            FixOutcome::Preview(plan) | FixOutcome::Applied(plan) => Some(plan),
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, FixOutcome::Applied(_))
    }
}

/// Execute `plan` in `mode`.
///
/// Missing and unchanged plans are a successful no-op in both modes.
pub fn apply_plan(plan: Option<FixPlan>, mode: FixMode) -> Result<FixOutcome> {
    let Some(plan) = plan else {
        return Ok(FixOutcome::NoChange);
    };
    if plan.is_noop() {
        return Ok(FixOutcome::NoChange);
    }

    match mode {
        FixMode::Preview => Ok(FixOutcome::Preview(plan)),
        FixMode::Commit => {
            fs::write(&plan.resource_file_path, plan.new_text()).with_context(|| {
                format!(
                    "Failed to write resource file: {}",
                    plan.resource_file_path.display()
                )
            })?;
            Ok(FixOutcome::Applied(plan))
        }
    }
}
