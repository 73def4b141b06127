//! Error types for the style binding.

use classact_sheets::{EvalError, SheetError};
use thiserror::Error;

/// Errors that can occur while binding styles to component instances.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    /// No rendering surface is reachable in the current context.
    ///
    /// Not fatal: styling is an enhancement, so the lifecycle binder
    /// degrades to an empty class mapping instead of failing the
    /// component. Everything below the binder propagates this variant.
    #[error("no rendering surface available in this context")]
    SurfaceUnavailable,

    /// A sheet was released more times than it was acquired.
    ///
    /// Indicates a lifecycle-tracking bug in the caller; never swallowed.
    #[error("sheet released without a matching acquire (index {index})")]
    UnbalancedRelease {
        /// Ordering index of the offending release.
        index: usize,
    },

    /// A dynamic rule set was removed twice.
    #[error("dynamic rules already removed from sheet '{label}'")]
    RulesAlreadyRemoved {
        /// Meta label of the sheet the rules belonged to.
        label: String,
    },

    /// `on_mount` was called on a binding that is already mounted.
    #[error("binding is already mounted")]
    BindingAlreadyMounted,

    /// `on_unmount` was called on a binding that is not mounted.
    #[error("binding is not mounted")]
    BindingNotMounted,

    /// A themed style description failed to evaluate.
    #[error("style description failed to evaluate: {source}")]
    Styles {
        /// The underlying evaluation error.
        source: EvalError,
    },

    /// A sheet-level failure (rule evaluation, unknown rule).
    #[error(transparent)]
    Sheet(#[from] SheetError),
}

/// Result type for binding operations.
pub type Result<T> = std::result::Result<T, StyleError>;
