//! Backend-agnostic asset-management abstraction.
//!
//! A *manager* is a swappable backend that owns entity identity,
//! versioning, metadata and storage-location decisions. This crate defines
//! the contract between a host adapter and any such backend:
//! - [`ManagerInterface`] — the trait backends implement
//! - [`Manager`] — the host-facing wrapper adding reference validation
//! - [`ManagerConfig`] / [`ManagerFactory`] — TOML-driven backend selection
//! - [`EntityReference`], [`Context`], access-mode enums, [`ReferencePager`]
//! - [`file_url`] — filesystem-path ↔ `file://` URL conversion
//!
//! All operations are synchronous, blocking round-trips; any timeout or
//! retry behaviour belongs to the backend itself.

mod access;
mod config;
mod context;
mod error;
mod factory;
mod interface;
mod manager;
mod reference;

pub mod file_url;

pub use access::{
    EntityTraitsAccess, PolicyAccess, PublishAccess, RelationsAccess, ResolveAccess,
};
pub use config::{DEFAULT_CONFIG_ENV_VAR, ManagerConfig};
pub use context::Context;
pub use error::ManagerError;
pub use factory::ManagerFactory;
pub use interface::{
    ENTITY_REFERENCES_MATCH_PREFIX, InfoDictionary, ManagerInterface, ReferencePager, Settings,
    VecPager,
};
pub use manager::Manager;
pub use reference::EntityReference;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, ManagerError>;
