//! Error types for the kairos-plot crate.

use std::path::PathBuf;

/// Error type for all fallible operations in the kairos-plot crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PlotError {
    /// Returned when a figure with no axes is rendered.
    #[error("figure has no axes")]
    EmptyFigure,

    /// Returned when paired inputs have different lengths.
    #[error("{what} length {got} does not match {expected}")]
    LengthMismatch {
        /// Which input was wrong.
        what: &'static str,
        /// Required length.
        expected: usize,
        /// Supplied length.
        got: usize,
    },

    /// Returned when an opacity is outside `[0, 1]`.
    #[error("opacity must be within [0, 1], got {opacity}")]
    InvalidOpacity {
        /// The rejected opacity.
        opacity: f64,
    },

    /// Wraps a failure reported by the drawing backend.
    #[error("render error: {reason}")]
    Render {
        /// Description of the backend failure.
        reason: String,
    },

    /// Returned when the rendered figure cannot be written.
    #[error("failed to write {}: {reason}", path.display())]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Description of the I/O failure.
        reason: String,
    },
}
