//! Error types for the disbursement projection engine.
//!
//! The projection functions themselves never fail: every numeric input is
//! coerced into range. Errors only arise at the edges of the crate, when
//! loading configuration, validating an alternate curve, converting raw
//! values into a [`ProjectionInput`](crate::models::ProjectionInput), or
//! rendering a result on a display surface.

use thiserror::Error;

/// The main error type for the projection engine.
///
/// # Example
///
/// ```
/// use disbursement_projection::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/curve.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/curve.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A disbursement curve violated one of its structural invariants.
    #[error("Invalid disbursement curve: {message}")]
    InvalidCurve {
        /// A description of the violated invariant.
        message: String,
    },

    /// Engine settings contained an unusable value.
    #[error("Invalid setting '{field}': {message}")]
    InvalidSettings {
        /// The setting that was invalid.
        field: String,
        /// A description of what made the setting invalid.
        message: String,
    },

    /// A raw input value could not be turned into a projection input.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The input field that was invalid.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// A display surface failed to render a projection.
    #[error("Render error: {message}")]
    RenderError {
        /// A description of the rendering failure.
        message: String,
    },
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::RenderError {
            message: e.to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
