//! Error types for control component construction.

use thiserror::Error;

/// Result type for control component operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur when building control components.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a component constructor.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
