//! Domain error types.

use thiserror::Error;

/// Errors raised when a todo entity rejects an operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    /// Title is empty or whitespace.
    #[error("Title is required")]
    TitleRequired,

    /// Title exceeds the maximum length.
    #[error("Title is too long: {length} characters (maximum {max})")]
    TitleTooLong { length: usize, max: usize },

    /// Colour code is not one of the supported colours.
    #[error("Unsupported colour: {code}")]
    UnsupportedColour { code: String },

    /// Priority level value is out of range.
    #[error("Unknown priority level: {value}")]
    UnknownPriority { value: i32 },
}
