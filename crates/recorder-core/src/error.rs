//! Renderer error type.

/// Error type for render operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("Invalid render options: {0}")]
    InvalidOptions(String),

    #[error("Shell not sent before sections")]
    ShellNotSent,

    #[error("Streaming error: {0}")]
    StreamError(String),
}
