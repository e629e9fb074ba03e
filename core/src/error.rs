//! Error types for the Gemini client core.
//!
//! A response body that is not JSON is not an error here: `report` turns it
//! into `Outcome::Raw`. These variants cover only the typed paths.

use thiserror::Error;

/// Errors returned by `GeminiClient` build and typed parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The decoded response did not match the expected shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}
