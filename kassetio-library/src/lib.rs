//! A minimal versioned asset library, backed by a JSON document.
//!
//! [`LibraryManager`] implements the full [`ManagerInterface`] over an
//! in-memory library loaded from a JSON file (the `library_path` setting)
//! or injected directly. It exists to give adapter integration tests a
//! real backend to publish against, and doubles as a usable
//! single-machine backend for pipelines that keep their asset index in a
//! checked-in document.
//!
//! References take the form `<prefix><name>` (the latest version) or
//! `<prefix><name>?v=<N>` (an explicit version), with the prefix declared
//! by the document (default `lib:///`).

mod document;
mod manager;

pub use document::{EntityRecord, LibraryDocument, VersionRecord};
pub use manager::{LIBRARY_PATH_SETTING, LibraryManager};

/// Identifier under which this backend registers with a manager factory.
pub const IDENTIFIER: &str = "org.kassetio.library";
