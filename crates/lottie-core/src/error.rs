/// Convenience result type used across the crate.
pub type LottieResult<T> = Result<T, LottieError>;

/// Failures surfaced to the caller. Traversal misses are not errors; they
/// degrade to empty lookups and no-op mutations.
#[derive(thiserror::Error, Debug)]
pub enum LottieError {
    /// Bad caller-supplied value, such as a non-finite color channel.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The document handed to a mutator is not an object or array.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// Expression text outside the `layer(..).effect(..)(..)` idiom.
    #[error("unsupported expression: {0}")]
    UnsupportedExpression(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl LottieError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn type_mismatch(msg: impl Into<String>) -> Self {
        Self::TypeMismatch(msg.into())
    }

    pub fn unsupported_expression(msg: impl Into<String>) -> Self {
        Self::UnsupportedExpression(msg.into())
    }
}
