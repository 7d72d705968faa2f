//! The serialized library document model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use kassetio_traits::TraitsData;

fn default_prefix() -> String {
    "lib:///".to_string()
}

fn default_true() -> bool {
    true
}

/// Root of a library JSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryDocument {
    /// Prefix every entity reference of this library starts with.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Trait sets the library accepts for publishing. A policy query is
    /// approved when the queried set contains one of these as a subset.
    /// Absent means every shape is accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_trait_sets: Option<Vec<Vec<String>>>,

    #[serde(default)]
    pub entities: BTreeMap<String, EntityRecord>,
}

impl Default for LibraryDocument {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            managed_trait_sets: None,
            entities: BTreeMap::new(),
        }
    }
}

/// A logical asset and its version history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Directory the library stages in-flight publishes into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staging_dir: Option<String>,

    /// File name the *next* published version will be staged as.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staging: Option<String>,

    /// Whether the library will answer manager-driven resolves for this
    /// entity. `false` simulates a backend without staging support.
    #[serde(default = "default_true")]
    pub manager_driven: bool,

    /// Whether existing versions may be targeted for writing through a
    /// version-matching relationship query.
    #[serde(default = "default_true")]
    pub overwritable: bool,

    #[serde(default)]
    pub versions: Vec<VersionRecord>,
}

/// One stored version of an entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionRecord {
    /// File name this version was (or would be) staged as; answers
    /// manager-driven resolves targeting the version explicitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staging: Option<String>,

    #[serde(default)]
    pub traits: TraitsData,
}
