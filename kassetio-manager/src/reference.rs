use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque reference to a logical entity in a backend.
///
/// The token's syntax is owned by the manager; hosts must obtain instances
/// through [`crate::Manager::create_entity_reference`] (which validates) and
/// must never inspect or mutate the contents, only carry and serialize
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityReference(String);

impl EntityReference {
    /// Wraps an already-validated reference string.
    ///
    /// Backends construct references directly; host code should go through
    /// the validating [`crate::Manager`] constructors instead.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for EntityReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntityReference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
