//! Fix actions for default-language issues.
//!
//! ## Architecture
//!
//! ```text
//! Issue (problem detected)
//!     ↓
//! Action (Issue → DeferredFix registration)
//!     ↓
//! FixPlan (line-oriented edit of the companion resource file)
//!     ↓
//! apply (preview or commit)
//! ```
//!
//! ## Actions
//!
//! - [`RestoreDefaultLanguage`]: remove the `$this.Language` metadata block (fix)

mod apply;
mod deferred;
mod error;
mod plan;
mod restore_default_language;
mod traits;

pub use apply::{FixMode, FixOutcome, apply_plan};
pub use deferred::{DeferredFix, DeferredFixBuilder, FixAllScope};
pub use error::FixError;
pub use plan::{
    CLOSING_TAG_TOKEN, FixPlan, LineEnding, find_companion_resource, plan_fix, strip_marker_lines,
};
pub use restore_default_language::{FIX_TITLE, RestoreDefaultLanguage};
pub use traits::{Action, ActionPreview, ActionStats};
