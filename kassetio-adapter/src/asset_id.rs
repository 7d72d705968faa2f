use std::fmt;

/// Separator between an entity reference and an appended staging path in a
/// host-facing asset ID. Reserved: the sequence must not occur in a bare
/// reference.
pub const MANAGER_DRIVEN_VALUE_SEP: &str = "#value=";

/// A host-facing asset identifier.
///
/// During a two-phase publish the backend's chosen staging path must
/// travel with the working reference through host code that only carries
/// opaque ID strings. The pair is modeled explicitly here and flattened to
/// `<reference>#value=<path>` only at the host call boundary, so the two
/// parts can never be double-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetId {
    /// The bare entity reference.
    pub reference: String,
    /// Backend-chosen staging path for an in-flight publish, if any.
    pub staged_path: Option<String>,
}

impl AssetId {
    #[must_use]
    pub fn bare(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            staged_path: None,
        }
    }

    #[must_use]
    pub fn with_staged_path(
        reference: impl Into<String>,
        staged_path: impl Into<String>,
    ) -> Self {
        Self {
            reference: reference.into(),
            staged_path: Some(staged_path.into()),
        }
    }

    /// Splits a host-supplied ID at the first separator occurrence. An
    /// absent or empty staging segment yields a bare ID.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text.split_once(MANAGER_DRIVEN_VALUE_SEP) {
            Some((reference, path)) if !path.is_empty() => {
                Self::with_staged_path(reference, path)
            }
            Some((reference, _)) => Self::bare(reference),
            None => Self::bare(text),
        }
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.staged_path {
            Some(path) => write!(f, "{}{MANAGER_DRIVEN_VALUE_SEP}{path}", self.reference),
            None => f.write_str(&self.reference),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bare_id_passes_through() {
        let id = AssetId::parse("lib:///cat?v=1");
        assert_eq!(id, AssetId::bare("lib:///cat?v=1"));
        assert_eq!(id.to_string(), "lib:///cat?v=1");
    }

    #[test]
    fn staged_path_is_split_off() {
        let id = AssetId::parse("lib:///cat#value=/some/staging/area/cat.klf");
        assert_eq!(id.reference, "lib:///cat");
        assert_eq!(id.staged_path.as_deref(), Some("/some/staging/area/cat.klf"));
    }

    #[test]
    fn empty_staged_segment_is_treated_as_absent() {
        let id = AssetId::parse("lib:///cat#value=");
        assert_eq!(id, AssetId::bare("lib:///cat"));
    }

    #[test]
    fn split_happens_at_first_separator() {
        let id = AssetId::parse("lib:///cat#value=/weird#value=path");
        assert_eq!(id.reference, "lib:///cat");
        assert_eq!(id.staged_path.as_deref(), Some("/weird#value=path"));
    }

    #[test]
    fn frame_placeholders_survive_the_round_trip() {
        let id = AssetId::with_staged_path("lib:///cat", "/some/staging/area/cat.####.exr");
        assert_eq!(
            id.to_string(),
            "lib:///cat#value=/some/staging/area/cat.####.exr"
        );
        assert_eq!(AssetId::parse(&id.to_string()), id);
    }
}
