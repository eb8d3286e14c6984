pub type CountdownResult<T> = Result<T, CountdownError>;

/// Errors produced while resolving, rendering or encoding a countdown.
///
/// All variants are deterministic: retrying with the same input yields the same error.
#[derive(thiserror::Error, Debug)]
pub enum CountdownError {
    /// Malformed or out-of-range input (colors, timestamps, sizes, labels, options).
    #[error("validation error: {0}")]
    Validation(String),

    /// The frame sequence cannot be encoded, e.g. because it is empty.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// A frame's size differs from the first frame's.
    #[error(
        "dimension mismatch: frame {index} is {}x{}, expected {}x{}",
        found.0, found.1, expected.0, expected.1
    )]
    DimensionMismatch {
        /// Position of the offending frame.
        index: usize,
        /// Size of the first frame.
        expected: (u32, u32),
        /// Size of the offending frame.
        found: (u32, u32),
    },

    /// Any other failure.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CountdownError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// `true` for errors caused by the caller's input rather than the encode step.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
