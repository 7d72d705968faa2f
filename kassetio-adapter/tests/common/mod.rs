//! Shared fixtures for adapter integration tests: a library-backed
//! adapter and document-building helpers.

#![allow(dead_code)]

use std::sync::Arc;

use kassetio_adapter::{AssetAdapter, StringMap};
use kassetio_library::{EntityRecord, LibraryDocument, LibraryManager, VersionRecord};
use kassetio_manager::Manager;
use kassetio_traits::{TraitsData, mediacreation};

/// Honours `RUST_LOG` so a failing scenario can be re-run with the
/// adapter's call tracing visible.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn adapter_for(document: LibraryDocument) -> AssetAdapter {
    init_logging();
    let manager = Manager::new(Arc::new(LibraryManager::from_document(document)));
    AssetAdapter::new(manager)
}

pub fn string_map(pairs: &[(&str, &str)]) -> StringMap {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// A version whose stored traits carry a display name.
pub fn named_version(name: &str) -> VersionRecord {
    let mut traits = TraitsData::new();
    mediacreation::Entity::imbue_to(&mut traits);
    mediacreation::DisplayName::set_name(&mut traits, name);
    VersionRecord {
        staging: None,
        traits,
    }
}

pub fn with_staging(mut version: VersionRecord, staging: &str) -> VersionRecord {
    version.staging = Some(staging.to_string());
    version
}

/// A library with a single entity `cat` holding one published version and
/// staging configured for the next.
pub fn cat_library(staging_dir: &str) -> LibraryDocument {
    let mut document = LibraryDocument::default();
    document.entities.insert(
        "cat".to_string(),
        EntityRecord {
            staging_dir: Some(staging_dir.to_string()),
            staging: Some("cat.klf".to_string()),
            versions: vec![with_staging(named_version("Cat"), "cat.v1.klf")],
            ..EntityRecord::default()
        },
    );
    document
}
