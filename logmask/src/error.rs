//! Error type for engine and operator construction.
//!
//! Configuration mistakes surface here, at setup time. Masking itself is
//! total: an operator that finds nothing returns a no-match result, never an
//! error.

/// Errors raised while building a [`MaskEngine`](crate::MaskEngine), a
/// masking operator, or (with the `config` feature) while binding
/// configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The configured mask value was empty. An empty mask would silently
    /// erase matched spans instead of marking them as masked.
    #[error("mask value must not be empty")]
    EmptyMaskValue,

    /// A custom operator was given an empty or whitespace-only pattern
    /// (parameter `pattern`).
    #[error("regex pattern must not be empty or whitespace (parameter `pattern`)")]
    EmptyPattern,

    /// A custom operator was given a pattern the regex engine rejected.
    #[error("invalid regex pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A configuration entry named an operator the registry does not know.
    #[cfg(feature = "config")]
    #[error("unknown masking operator `{0}`")]
    UnknownOperator(String),

    /// A configuration entry carried a setting of the wrong shape.
    #[cfg(feature = "config")]
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration text failed to deserialize.
    #[cfg(feature = "config")]
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}
