//! Error types for fix actions.
//!
//! Separates failures that happen while constructing a fix (bad arguments)
//! from failures while computing or committing it.

use thiserror::Error;

use crate::core::Cancelled;

/// The top-level error type for fix actions.
#[derive(Debug, Error)]
pub enum FixError {
    /// A required construction argument was missing or empty.
    #[error("invalid argument: '{name}' must be provided")]
    InvalidArgument {
        /// Name of the offending argument.
        name: &'static str,
    },

    /// Cancellation was requested before the fix ran.
    #[error(transparent)]
    Cancelled(#[from] Cancelled),

    /// Reading or writing the resource file failed.
    #[error("fix failed: {0:#}")]
    Runtime(#[from] anyhow::Error),
}

impl FixError {
    pub fn invalid_argument(name: &'static str) -> Self {
        FixError::InvalidArgument { name }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, FixError::Cancelled(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_message() {
        let err = FixError::invalid_argument("title");
        assert_eq!(err.to_string(), "invalid argument: 'title' must be provided");
        assert!(!err.is_cancelled());
    }

    #[test]
    fn test_cancelled_from() {
        let err: FixError = Cancelled.into();
        assert!(err.is_cancelled());
        assert_eq!(err.to_string(), "operation was cancelled");
    }

    #[test]
    fn test_runtime_keeps_context() {
        let source = anyhow::anyhow!("permission denied").context("Failed to write Foo.resx");
        let err: FixError = source.into();
        assert_eq!(
            err.to_string(),
            "fix failed: Failed to write Foo.resx: permission denied"
        );
    }
}
