//! Error types for the host adapter.

use kassetio_manager::ManagerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    /// The host asked to publish an asset kind with no registered
    /// strategy (including kinds that are only ever ingested).
    #[error("publishing '{0}' is currently unsupported")]
    UnsupportedAssetKind(String),

    /// A required working entity reference was absent from the host's
    /// field map — a caller protocol violation.
    #[error("existing entity reference not specified in {0}")]
    MissingWorkingReference(&'static str),

    /// The manager declines to accept this kind's trait shape for
    /// writing.
    #[error("manager '{manager}' does not support publishing this kind of entity")]
    PolicyUnsupported { manager: String },

    /// A manager-reported failure, propagated verbatim.
    #[error(transparent)]
    Manager(#[from] ManagerError),
}
