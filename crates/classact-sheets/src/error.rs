//! Error types for sheet compilation and rule evaluation.

use thiserror::Error;

/// Error raised inside a user-supplied rule function.
///
/// Dynamic rule functions (and themed style descriptions in `classact`)
/// return this to signal that the input they were given cannot be turned
/// into declarations. The engine wraps it with the name of the rule that
/// was being evaluated, so the failing function never needs to know its
/// own name.
///
/// # Example
///
/// ```rust
/// use classact_sheets::EvalError;
///
/// let err = EvalError::new("expected a color string");
/// assert_eq!(err.message(), "expected a color string");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EvalError {
    message: String,
}

impl EvalError {
    /// Creates an evaluation error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors that can occur when compiling or mutating a sheet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    /// A rule function failed to evaluate against the supplied data.
    ///
    /// This is a caller bug (malformed rule definition or data), so it is
    /// propagated synchronously instead of being recovered locally.
    #[error("rule '{rule}' failed to evaluate: {source}")]
    Rule {
        /// Name of the rule whose function failed.
        rule: String,
        /// The underlying evaluation error.
        source: EvalError,
    },

    /// An operation referenced a rule name the sheet does not define.
    #[error("sheet '{label}' has no rule named '{rule}'")]
    UnknownRule {
        /// Meta label of the sheet.
        label: String,
        /// The missing rule name.
        rule: String,
    },
}

/// Result type for sheet operations.
pub type Result<T> = std::result::Result<T, SheetError>;
