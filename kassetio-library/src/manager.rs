//! [`ManagerInterface`] implementation over a [`LibraryDocument`].

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::debug;

use kassetio_manager::{
    Context, ENTITY_REFERENCES_MATCH_PREFIX, EntityReference, EntityTraitsAccess, InfoDictionary,
    ManagerError, ManagerInterface, PolicyAccess, PublishAccess, ReferencePager, RelationsAccess,
    ResolveAccess, Settings, VecPager, file_url,
};
use kassetio_traits::{TraitSet, TraitsData, mediacreation};

use crate::document::{LibraryDocument, VersionRecord};

/// Setting key naming the JSON document to load.
pub const LIBRARY_PATH_SETTING: &str = "library_path";

/// The reference library backend.
pub struct LibraryManager {
    library: RwLock<LibraryDocument>,
}

/// How a reference addresses an entity's version history.
#[derive(Debug, Clone, PartialEq, Eq)]
enum VersionSelector {
    Latest,
    /// 1-based version number.
    Explicit(usize),
}

impl Default for LibraryManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LibraryManager {
    /// Creates an empty library; populate via `initialize` or start from
    /// [`from_document`](Self::from_document).
    #[must_use]
    pub fn new() -> Self {
        Self::from_document(LibraryDocument::default())
    }

    #[must_use]
    pub fn from_document(document: LibraryDocument) -> Self {
        Self {
            library: RwLock::new(document),
        }
    }

    /// Parses a library document from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ManagerError> {
        let document: LibraryDocument = serde_json::from_str(json)
            .map_err(|err| ManagerError::Config(format!("invalid library document: {err}")))?;
        Ok(Self::from_document(document))
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, LibraryDocument> {
        self.library.read().unwrap_or_else(|err| err.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, LibraryDocument> {
        self.library.write().unwrap_or_else(|err| err.into_inner())
    }

    fn load_document(path: &Path) -> Result<LibraryDocument, ManagerError> {
        let contents = std::fs::read_to_string(path).map_err(|err| {
            ManagerError::Config(format!("failed to read {}: {err}", path.display()))
        })?;
        serde_json::from_str(&contents).map_err(|err| {
            ManagerError::Config(format!("failed to parse {}: {err}", path.display()))
        })
    }

    /// Splits a reference into entity name and version selector.
    fn parse_reference(
        library: &LibraryDocument,
        reference: &EntityReference,
    ) -> Result<(String, VersionSelector), ManagerError> {
        let text = reference.as_str();
        let Some(rest) = text.strip_prefix(&library.prefix) else {
            return Err(ManagerError::MalformedReference(text.to_string()));
        };

        let (name, query) = match rest.split_once('?') {
            Some((name, query)) => (name, Some(query)),
            None => (rest, None),
        };

        if name.is_empty() {
            return Err(ManagerError::MalformedReference(text.to_string()));
        }

        let selector = match query {
            None | Some("") => VersionSelector::Latest,
            Some(query) => {
                let version = query
                    .strip_prefix("v=")
                    .and_then(|tag| tag.parse::<usize>().ok())
                    .filter(|version| *version >= 1)
                    .ok_or_else(|| ManagerError::MalformedReference(text.to_string()))?;
                VersionSelector::Explicit(version)
            }
        };

        Ok((name.to_string(), selector))
    }

    fn versioned_reference(library: &LibraryDocument, name: &str, version: usize) -> EntityReference {
        EntityReference::new(format!("{}{}?v={}", library.prefix, name, version))
    }

    /// Resolves a selector to a 0-based version index.
    fn version_index(
        versions: &[VersionRecord],
        selector: &VersionSelector,
        reference: &EntityReference,
    ) -> Result<usize, ManagerError> {
        let index = match selector {
            VersionSelector::Latest => versions.len().checked_sub(1),
            VersionSelector::Explicit(version) => {
                (*version <= versions.len()).then(|| version - 1)
            }
        };
        index.ok_or_else(|| ManagerError::EntityResolution {
            reference: reference.to_string(),
            message: "no such version".to_string(),
        })
    }
}

impl ManagerInterface for LibraryManager {
    fn identifier(&self) -> &str {
        crate::IDENTIFIER
    }

    fn display_name(&self) -> &str {
        "Reference Asset Library"
    }

    fn info(&self) -> InfoDictionary {
        let library = self.read();
        InfoDictionary::from([(
            ENTITY_REFERENCES_MATCH_PREFIX.to_string(),
            library.prefix.clone(),
        )])
    }

    fn initialize(&self, settings: Settings) -> Result<(), ManagerError> {
        for (key, value) in &settings {
            match key.as_str() {
                LIBRARY_PATH_SETTING => {
                    let document = Self::load_document(&PathBuf::from(value))?;
                    debug!(path = %value, "loaded library document");
                    *self.write() = document;
                }
                other => {
                    debug!(setting = %other, "ignoring unrecognized setting");
                }
            }
        }
        Ok(())
    }

    fn is_entity_reference_string(&self, candidate: &str) -> bool {
        candidate.starts_with(&self.read().prefix)
    }

    fn management_policy(
        &self,
        trait_set: &TraitSet,
        _access: PolicyAccess,
        _context: &Context,
    ) -> TraitsData {
        let library = self.read();
        let accepted = match &library.managed_trait_sets {
            None => true,
            Some(managed) => managed
                .iter()
                .any(|shape| shape.iter().all(|id| trait_set.contains(id))),
        };

        let mut policy = TraitsData::new();
        if accepted {
            mediacreation::Managed::imbue_to(&mut policy);
        }
        policy
    }

    fn resolve(
        &self,
        reference: &EntityReference,
        trait_ids: &TraitSet,
        access: ResolveAccess,
        _context: &Context,
    ) -> Result<TraitsData, ManagerError> {
        let library = self.read();
        let (name, selector) = Self::parse_reference(&library, reference)?;
        let entity = library
            .entities
            .get(&name)
            .ok_or_else(|| ManagerError::EntityResolution {
                reference: reference.to_string(),
                message: "no such entity".to_string(),
            })?;

        match access {
            ResolveAccess::Read => {
                let index = Self::version_index(&entity.versions, &selector, reference)?;
                let mut payload = entity.versions[index].traits.filtered_to(trait_ids);

                if trait_ids.contains(mediacreation::Version::ID) {
                    let specified = match &selector {
                        VersionSelector::Latest => "latest".to_string(),
                        VersionSelector::Explicit(version) => version.to_string(),
                    };
                    mediacreation::Version::set_specified_tag(&mut payload, specified);
                    mediacreation::Version::set_stable_tag(&mut payload, (index + 1).to_string());
                }

                Ok(payload)
            }
            ResolveAccess::ManagerDriven => {
                if !entity.manager_driven {
                    return Err(ManagerError::OperationUnsupported(
                        "manager-driven resolve".to_string(),
                    ));
                }

                // Staged file name: an explicit version stages over its own
                // file, the latest selector stages the next new version.
                let staged_name = match &selector {
                    VersionSelector::Latest => entity.staging.as_deref(),
                    VersionSelector::Explicit(version) => entity
                        .versions
                        .get(version - 1)
                        .and_then(|record| record.staging.as_deref()),
                };

                let (Some(dir), Some(file)) = (entity.staging_dir.as_deref(), staged_name) else {
                    return Err(ManagerError::OperationUnsupported(
                        "manager-driven resolve".to_string(),
                    ));
                };

                let staged_path = Path::new(dir).join(file);
                let url = file_url::path_to_url(&staged_path.to_string_lossy())?;

                let mut payload = TraitsData::new();
                if trait_ids.contains(mediacreation::LocatableContent::ID) {
                    mediacreation::LocatableContent::set_location(&mut payload, url);
                }
                Ok(payload)
            }
        }
    }

    fn preflight(
        &self,
        reference: &EntityReference,
        _payload: &TraitsData,
        _access: PublishAccess,
        _context: &Context,
    ) -> Result<EntityReference, ManagerError> {
        let library = self.read();
        let (name, _) = Self::parse_reference(&library, reference)?;
        if !library.entities.contains_key(&name) {
            return Err(ManagerError::EntityResolution {
                reference: reference.to_string(),
                message: "no such entity".to_string(),
            });
        }
        // The bare reference is the working reference for the in-flight
        // publish; an explicit version in the input is a read-time detail.
        Ok(EntityReference::new(format!("{}{}", library.prefix, name)))
    }

    fn register(
        &self,
        reference: &EntityReference,
        payload: &TraitsData,
        _access: PublishAccess,
        _context: &Context,
    ) -> Result<EntityReference, ManagerError> {
        let mut library = self.write();
        let (name, selector) = Self::parse_reference(&library, reference)?;
        let prefix_snapshot = library.prefix.clone();
        let entity = library
            .entities
            .get_mut(&name)
            .ok_or_else(|| ManagerError::EntityResolution {
                reference: reference.to_string(),
                message: "no such entity".to_string(),
            })?;

        let version = match selector {
            VersionSelector::Explicit(version) => {
                if version > entity.versions.len() {
                    return Err(ManagerError::EntityResolution {
                        reference: reference.to_string(),
                        message: "no such version".to_string(),
                    });
                }
                entity.versions[version - 1].traits = payload.clone();
                version
            }
            VersionSelector::Latest => {
                entity.versions.push(VersionRecord {
                    staging: entity.staging.clone(),
                    traits: payload.clone(),
                });
                entity.versions.len()
            }
        };

        debug!(entity = %name, version, "registered entity version");
        Ok(EntityReference::new(format!(
            "{prefix_snapshot}{name}?v={version}"
        )))
    }

    fn get_with_relationship(
        &self,
        reference: &EntityReference,
        relationship: &TraitsData,
        page_size: usize,
        access: RelationsAccess,
        _context: &Context,
    ) -> Result<Box<dyn ReferencePager>, ManagerError> {
        let library = self.read();
        let (name, _) = Self::parse_reference(&library, reference)?;
        let entity = library
            .entities
            .get(&name)
            .ok_or_else(|| ManagerError::EntityResolution {
                reference: reference.to_string(),
                message: "no such entity".to_string(),
            })?;

        if access == RelationsAccess::Write && !entity.overwritable {
            return Err(ManagerError::OperationUnsupported(
                "write-access relationship query".to_string(),
            ));
        }

        let stable_predicate = mediacreation::Version::stable_tag(relationship);
        let specified_predicate = mediacreation::Version::specified_tag(relationship);

        let references: Vec<EntityReference> = if let Some(tag) = stable_predicate {
            match tag.parse::<usize>() {
                Ok(version) if version >= 1 && version <= entity.versions.len() => {
                    vec![Self::versioned_reference(&library, &name, version)]
                }
                _ => Vec::new(),
            }
        } else if let Some(tag) = specified_predicate {
            // A meta-version tag matches strictly: "latest" addresses the
            // newest version, anything else must be a concrete number.
            let version = if tag == "latest" {
                (!entity.versions.is_empty()).then_some(entity.versions.len())
            } else {
                tag.parse::<usize>()
                    .ok()
                    .filter(|version| *version >= 1 && *version <= entity.versions.len())
            };
            version
                .map(|version| vec![Self::versioned_reference(&library, &name, version)])
                .unwrap_or_default()
        } else {
            (1..=entity.versions.len())
                .map(|version| Self::versioned_reference(&library, &name, version))
                .collect()
        };

        Ok(Box::new(VecPager::new(references, page_size)))
    }

    fn entity_traits(
        &self,
        reference: &EntityReference,
        _access: EntityTraitsAccess,
        _context: &Context,
    ) -> Result<TraitSet, ManagerError> {
        let library = self.read();
        let (name, selector) = Self::parse_reference(&library, reference)?;
        let entity = library
            .entities
            .get(&name)
            .ok_or_else(|| ManagerError::EntityResolution {
                reference: reference.to_string(),
                message: "no such entity".to_string(),
            })?;

        let index = Self::version_index(&entity.versions, &selector, reference)?;
        let mut trait_set = entity.versions[index].traits.trait_set();
        trait_set.insert(mediacreation::Version::ID.to_string());
        Ok(trait_set)
    }
}
