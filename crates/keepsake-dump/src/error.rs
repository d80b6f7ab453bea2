//! Dump error types.

use std::fmt::Display;
use thiserror::Error;

/// Result type for dump operations.
pub type DumpResult<T> = Result<T, DumpError>;

/// Errors raised while capturing a value.
///
/// Rendering itself cannot fail; only user `Serialize` impls can.
#[derive(Debug, Error)]
pub enum DumpError {
    /// A `Serialize` impl reported an error.
    #[error("Serialization error: {0}")]
    Custom(String),

    /// A map value arrived without a preceding key.
    #[error("Map value serialized before its key")]
    MissingMapKey,
}

impl serde::ser::Error for DumpError {
    fn custom<T: Display>(msg: T) -> Self {
        Self::Custom(msg.to_string())
    }
}
