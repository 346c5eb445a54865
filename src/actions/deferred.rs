//! Deferred two-phase fix.
//!
//! Registering a fix is cheap: it only captures what the fix needs.
//! The plan is computed when the fix is previewed or committed.

use std::fmt;

use super::{
    apply::{FixMode, FixOutcome},
    error::FixError,
};
use crate::core::CancellationToken;

type ComputeFn =
    Box<dyn Fn(&CancellationToken, FixMode) -> anyhow::Result<FixOutcome> + Send + Sync>;

/// Batch scopes a fix can be applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixAllScope {
    Document,
}

pub struct DeferredFix {
    title: String,
    equivalence_key: Option<String>,
    compute: ComputeFn,
}

impl DeferredFix {
    pub fn builder() -> DeferredFixBuilder {
        DeferredFixBuilder::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Fixes with the same key are interchangeable in batch fixing.
    pub fn equivalence_key(&self) -> Option<&str> {
        self.equivalence_key.as_deref()
    }

    pub fn fix_all_scopes(&self) -> &'static [FixAllScope] {
        &[FixAllScope::Document]
    }

    pub fn compute_preview(&self, cancellation: &CancellationToken) -> Result<FixOutcome, FixError> {
        self.compute(cancellation, FixMode::Preview)
    }

    pub fn compute_commit(&self, cancellation: &CancellationToken) -> Result<FixOutcome, FixError> {
        self.compute(cancellation, FixMode::Commit)
    }

    fn compute(&self, cancellation: &CancellationToken, mode: FixMode) -> Result<FixOutcome, FixError> {
        cancellation.check()?;
        Ok((self.compute)(cancellation, mode)?)
    }
}

impl fmt::Debug for DeferredFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredFix")
            .field("title", &self.title)
            .field("equivalence_key", &self.equivalence_key)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
pub struct DeferredFixBuilder {
    title: Option<String>,
    equivalence_key: Option<String>,
    compute: Option<ComputeFn>,
}

impl DeferredFixBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn equivalence_key(mut self, key: impl Into<String>) -> Self {
        self.equivalence_key = Some(key.into());
        self
    }

    pub fn compute<F>(mut self, compute: F) -> Self
    where
        F: Fn(&CancellationToken, FixMode) -> anyhow::Result<FixOutcome> + Send + Sync + 'static,
    {
        self.compute = Some(Box::new(compute));
        self
    }

    /// # Errors
    ///
    /// `FixError::InvalidArgument` when the title is missing or empty, or no
    /// compute callback was given.
    pub fn build(self) -> Result<DeferredFix, FixError> {
        let title = self
            .title
            .filter(|t| !t.is_empty())
            .ok_or(FixError::invalid_argument("title"))?;
        let compute = self
            .compute
            .ok_or(FixError::invalid_argument("compute"))?;

        Ok(DeferredFix {
            title,
            equivalence_key: self.equivalence_key,
            compute,
        })
    }
}
