//! Error types for manager operations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManagerError {
    /// The string is not a valid entity reference for this manager.
    #[error("malformed entity reference: '{0}'")]
    MalformedReference(String),

    /// An entity could not be resolved (missing, no such version, ...).
    #[error("failed to resolve entity '{reference}': {message}")]
    EntityResolution { reference: String, message: String },

    /// The manager declines an optional capability. Callers with a
    /// documented fallback may tolerate this variant; every other variant
    /// must propagate.
    #[error("operation not supported by manager: {0}")]
    OperationUnsupported(String),

    /// Configuration could not be loaded or names an unknown backend.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("'{0}' is not an absolute local file path")]
    InvalidPath(String),

    #[error("'{0}' is not a local file URL")]
    InvalidUrl(String),

    /// Any other backend-reported failure, propagated verbatim.
    #[error("manager error: {0}")]
    Backend(String),
}
