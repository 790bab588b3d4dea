/// Crate-level error type for the backbeat pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid parameter value.
    #[error("invalid parameter `{name}`: got {value}, {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// Audio data is empty when a non-empty signal was required.
    #[error("audio data is empty")]
    EmptyAudio,

    /// Input arrays have inconsistent shapes for the operation.
    #[error("shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: String, got: String },

    /// A value cannot be serialized into the output table.
    #[error("unsupported table value: {reason}")]
    UnsupportedValue { reason: String },
}

impl Error {
    /// Shorthand for an [`Error::InvalidParameter`] with a formatted value.
    pub(crate) fn invalid<V: std::fmt::Display>(
        name: &'static str,
        value: V,
        reason: impl Into<String>,
    ) -> Self {
        Error::InvalidParameter {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience Result type for backbeat operations.
pub type Result<T> = std::result::Result<T, Error>;
